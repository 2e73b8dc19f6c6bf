//! Logging setup
//!
//! Log records go to two sinks: a log file (simplelog `WriteLogger`) and the
//! "Log (Main)" output channel. Records for the channel travel through the
//! dispatcher as `LogRecorded` actions, so producing a record never touches
//! the registry from inside a registry callback.

use crate::actions::{Action, OutputPanelAction};
use crate::dispatcher::Dispatcher;
use anyhow::Context;
use log::{LevelFilter, Log, Metadata, Record};
use output_panel_config::PanelConfig;
use simplelog::{CombinedLogger, Config, SharedLogger, WriteLogger};
use std::fs::File;
use std::path::PathBuf;
use std::str::FromStr;

/// Id of the channel receiving the application log
pub const LOG_CHANNEL_ID: &str = "log.main";
pub const LOG_CHANNEL_LABEL: &str = "Log (Main)";

/// Install the combined logger, returning the log file path
pub fn init(config: &PanelConfig, dispatcher: Dispatcher) -> anyhow::Result<PathBuf> {
    let level = LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::Debug);
    let log_file = PathBuf::from(&config.log_file);
    let file = File::create(&log_file)
        .with_context(|| format!("Failed to create log file {}", log_file.display()))?;

    let loggers: Vec<Box<dyn SharedLogger>> = vec![
        WriteLogger::new(level, Config::default(), file),
        Box::new(ChannelLogger::new(level, dispatcher)),
    ];
    CombinedLogger::init(loggers).context("Failed to install logger")?;

    Ok(log_file)
}

/// Forwards formatted records to the log output channel
pub struct ChannelLogger {
    level: LevelFilter,
    dispatcher: Dispatcher,
}

impl ChannelLogger {
    pub fn new(level: LevelFilter, dispatcher: Dispatcher) -> Self {
        Self { level, dispatcher }
    }

    fn format(record: &Record) -> String {
        format!(
            "[{}] [{}] {}",
            chrono::Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    }
}

impl Log for ChannelLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.dispatcher
                .dispatch(Action::OutputPanel(OutputPanelAction::LogRecorded(
                    Self::format(record),
                )));
        }
    }

    fn flush(&self) {}
}

impl SharedLogger for ChannelLogger {
    fn level(&self) -> LevelFilter {
        self.level
    }

    fn config(&self) -> Option<&Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}
