//! Sample output producers
//!
//! Background threads writing into their own channels so the panel has
//! something to switch between. The "Git" channel registers late and goes
//! away again, exercising channel-set changes while the UI is running.

use output_channels::{ChannelId, OutputService};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct ProducerSpec {
    id: &'static str,
    label: &'static str,
    /// Wait before registering the channel
    delay: Duration,
    interval: Duration,
    /// Unregister the channel after this long
    lifetime: Option<Duration>,
    lines: &'static [&'static str],
}

static PRODUCERS: &[ProducerSpec] = &[
    ProducerSpec {
        id: "build",
        label: "Build",
        delay: Duration::ZERO,
        interval: Duration::from_millis(700),
        lifetime: None,
        lines: &[
            "Compiling output-channels v0.1.0",
            "Compiling output-panel-config v0.1.0",
            "Compiling output-panel v0.1.0",
            "warning: unused variable `height`",
            "Finished dev profile [unoptimized + debuginfo]",
        ],
    },
    ProducerSpec {
        id: "tasks",
        label: "Tasks",
        delay: Duration::from_millis(500),
        interval: Duration::from_millis(1500),
        lifetime: None,
        lines: &[
            "> Executing task: watch",
            "File change detected. Starting incremental compilation...",
            "Found 0 errors. Watching for file changes.",
        ],
    },
    ProducerSpec {
        id: "git",
        label: "Git",
        delay: Duration::from_secs(5),
        interval: Duration::from_millis(1200),
        lifetime: Some(Duration::from_secs(30)),
        lines: &[
            "> git fetch --all",
            "> git status -z -uall",
            "> git rev-parse --abbrev-ref HEAD",
        ],
    },
];

/// Handle to the running producer threads
pub struct Producers {
    running: Arc<AtomicBool>,
    handles: Vec<JoinHandle<()>>,
}

impl Producers {
    pub fn start(registry: Arc<OutputService>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let handles = PRODUCERS
            .iter()
            .map(|spec| spawn_producer(spec, registry.clone(), running.clone()))
            .collect();
        Self { running, handles }
    }

    /// Stop all producers and wait for their threads
    pub fn stop(mut self) {
        self.running.store(false, Ordering::SeqCst);
        for handle in self.handles.drain(..) {
            if handle.join().is_err() {
                log::warn!("Output producer thread panicked");
            }
        }
    }
}

impl Drop for Producers {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

/// Sleep in small steps; false once the producers were stopped
fn sleep_while_running(running: &AtomicBool, duration: Duration) -> bool {
    let mut remaining = duration;
    while !remaining.is_zero() {
        if !running.load(Ordering::SeqCst) {
            return false;
        }
        let step = remaining.min(POLL_INTERVAL);
        thread::sleep(step);
        remaining -= step;
    }
    running.load(Ordering::SeqCst)
}

fn spawn_producer(
    spec: &'static ProducerSpec,
    registry: Arc<OutputService>,
    running: Arc<AtomicBool>,
) -> JoinHandle<()> {
    thread::spawn(move || {
        if !sleep_while_running(&running, spec.delay) {
            return;
        }
        if let Err(e) = registry.register_channel(spec.id, spec.label) {
            log::warn!("Producer '{}' not started: {}", spec.label, e);
            return;
        }
        log::info!("Output channel '{}' registered", spec.label);

        let id = ChannelId::from(spec.id);
        let mut elapsed = Duration::ZERO;
        for line in spec.lines.iter().cycle() {
            let stamp = chrono::Local::now().format("%H:%M:%S");
            if registry.append(&id, &format!("[{}] {}", stamp, line)).is_err() {
                break;
            }
            if !sleep_while_running(&running, spec.interval) {
                return;
            }
            elapsed += spec.interval;
            if spec.lifetime.is_some_and(|lifetime| elapsed >= lifetime) {
                match registry.unregister_channel(&id) {
                    Ok(_) => log::info!("Output channel '{}' removed", spec.label),
                    Err(e) => log::warn!("Failed to remove '{}': {}", spec.label, e),
                }
                break;
            }
        }
    })
}
