//! Output Middleware
//!
//! Bridges the store and the channel registry:
//! - runs output commands (toggle, clear, scroll lock, switch) against the registry
//! - keeps the channel selector and scroll lock mirror alive and forwards
//!   their updates as actions
//! - follows the active channel's buffer and publishes its lines
//! - appends application log records to the log channel

use crate::actions::{Action, OutputPanelAction};
use crate::dispatcher::Dispatcher;
use crate::logger::{LOG_CHANNEL_ID, LOG_CHANNEL_LABEL};
use crate::middleware::Middleware;
use crate::state::AppState;
use output_channels::{
    ChangeKind, ChannelId, ChannelRegistry, ChannelSelector, CommandOutcome, OutputCommand,
    OutputService, PanelHost, RegistryError, ScrollLockToggle, Subscription,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Panel host that turns the registry commands' requests into actions
#[derive(Clone)]
pub struct DispatchingPanel {
    dispatcher: Dispatcher,
}

impl PanelHost for DispatchingPanel {
    fn toggle_panel_visibility(&self) {
        self.dispatcher
            .dispatch(Action::OutputPanel(OutputPanelAction::VisibilityToggled));
    }

    fn focus_panel(&self) {
        self.dispatcher
            .dispatch(Action::OutputPanel(OutputPanelAction::Focused));
    }
}

pub struct OutputMiddleware {
    registry: Arc<OutputService>,
    runtime: Handle,
    panel: DispatchingPanel,
    log_channel: ChannelId,
    /// Log lines that could not be appended since the last one that was
    missed_log_lines: usize,
    selector: ChannelSelector,
    scroll_lock: ScrollLockToggle,
    _lines: Subscription,
}

impl OutputMiddleware {
    pub fn new(registry: Arc<OutputService>, runtime: Handle, dispatcher: Dispatcher) -> Self {
        let selector = {
            let dispatcher = dispatcher.clone();
            ChannelSelector::new(registry.clone(), move |projection| {
                dispatcher.dispatch(Action::OutputPanel(OutputPanelAction::SelectorUpdated(
                    projection.clone(),
                )));
            })
        };

        let scroll_lock = {
            let dispatcher = dispatcher.clone();
            ScrollLockToggle::new(registry.clone(), move |checked| {
                dispatcher.dispatch(Action::OutputPanel(OutputPanelAction::ScrollLockChecked(
                    checked,
                )));
            })
        };
        dispatcher.dispatch(Action::OutputPanel(OutputPanelAction::ScrollLockChecked(
            scroll_lock.is_checked(),
        )));

        let lines = Self::follow_active_lines(&registry, dispatcher.clone());
        Self::publish_lines(&registry, &dispatcher);

        Self {
            registry,
            runtime,
            panel: DispatchingPanel { dispatcher },
            log_channel: ChannelId::from(LOG_CHANNEL_ID),
            missed_log_lines: 0,
            selector,
            scroll_lock,
            _lines: lines,
        }
    }

    /// Publish the active channel's lines whenever its content changes or
    /// another channel becomes active
    fn follow_active_lines(registry: &Arc<OutputService>, dispatcher: Dispatcher) -> Subscription {
        let registry_ref = Arc::downgrade(registry);
        registry.subscribe(
            ChangeKind::CONTENT | ChangeKind::ACTIVE_CHANNEL,
            Box::new(move |_, _| {
                // Read fresh: emissions from producer threads may arrive out of order
                if let Some(registry) = registry_ref.upgrade() {
                    Self::publish_lines(&registry, &dispatcher);
                }
            }),
        )
    }

    fn publish_lines(registry: &OutputService, dispatcher: &Dispatcher) {
        let (channel, lines, appended) = match registry.active_content() {
            Some(content) => (Some(content.channel), content.lines, content.appended),
            None => (None, Vec::new(), 0),
        };
        dispatcher.dispatch(Action::OutputPanel(OutputPanelAction::LinesUpdated {
            channel,
            lines,
            appended,
        }));
    }

    /// Append a log line, bringing the log channel back if it was removed
    fn record_log_line(&self, line: &str) -> Result<usize, RegistryError> {
        match self.registry.append(&self.log_channel, line) {
            Err(RegistryError::ChannelNotFound(_)) => {
                match self
                    .registry
                    .register_channel(self.log_channel.clone(), LOG_CHANNEL_LABEL)
                {
                    Ok(_) | Err(RegistryError::DuplicateChannel(_)) => {}
                    Err(e) => return Err(e),
                }
                self.registry.append(&self.log_channel, line)
            }
            result => result,
        }
    }

    /// Run a registry command on the runtime
    fn execute(&self, command: OutputCommand) -> JoinHandle<CommandOutcome> {
        let registry = self.registry.clone();
        let panel = self.panel.clone();
        self.runtime.spawn(async move {
            let outcome = command.execute(&*registry, &panel).await;
            log::debug!("Output command finished: {:?}", outcome);
            outcome
        })
    }

    /// Channel next to the active one, cycling through channels ordered by
    /// label (registration order breaks ties)
    fn neighbour_channel(&self, forward: bool) -> Option<ChannelId> {
        let mut channels = self.registry.list_channels();
        if channels.is_empty() {
            return None;
        }
        channels.sort_by(|a, b| a.label.cmp(&b.label));

        let len = channels.len();
        let next = match self.registry.active_channel() {
            Some(active) => {
                let current = channels.iter().position(|c| c.id == active.id).unwrap_or(0);
                if forward {
                    (current + 1) % len
                } else {
                    (current + len - 1) % len
                }
            }
            None => 0,
        };
        Some(channels[next].id.clone())
    }
}

impl Middleware for OutputMiddleware {
    fn handle(&mut self, action: &Action, _state: &AppState, _dispatcher: &Dispatcher) -> bool {
        let Action::OutputPanel(output_action) = action else {
            return true;
        };

        match output_action {
            OutputPanelAction::LogRecorded(line) => {
                match self.record_log_line(line) {
                    Ok(_) if self.missed_log_lines > 0 => {
                        log::warn!(
                            "{} log lines did not reach the output panel, see the log file",
                            self.missed_log_lines
                        );
                        self.missed_log_lines = 0;
                    }
                    Ok(_) => {}
                    // Logging the failure here would feed straight back into this arm
                    Err(_) => self.missed_log_lines += 1,
                }
                return false;
            }
            OutputPanelAction::Toggle => {
                self.execute(OutputCommand::ToggleVisibility);
            }
            OutputPanelAction::Clear => {
                self.execute(OutputCommand::Clear);
            }
            OutputPanelAction::ToggleScrollLock => {
                if self.scroll_lock.run().is_none() {
                    log::debug!("No active output channel to lock");
                }
            }
            OutputPanelAction::SwitchTo(channel_id) => {
                self.execute(OutputCommand::Switch(channel_id.clone()));
            }
            OutputPanelAction::SelectOption(option) => {
                let channel_id = self.selector.resolve_option(option);
                self.execute(OutputCommand::Switch(Some(channel_id)));
            }
            OutputPanelAction::SelectNext | OutputPanelAction::SelectPrevious => {
                let forward = matches!(output_action, OutputPanelAction::SelectNext);
                if let Some(channel_id) = self.neighbour_channel(forward) {
                    self.execute(OutputCommand::Switch(Some(channel_id)));
                }
            }
            _ => {}
        }

        true
    }
}
