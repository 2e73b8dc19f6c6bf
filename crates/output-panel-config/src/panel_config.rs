//! Panel configuration
//!
//! Configuration loaded from output-panel.toml.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;

/// Extra key binding layered on top of the default keymap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindingOverride {
    /// Key spec, e.g. "x", "ctrl+l", "f5"
    pub key: String,
    /// Command id in snake_case, e.g. "output_clear"
    pub command: String,
}

/// Application configuration loaded from output-panel.toml
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Channel shown when a switch names no channel and nothing is active
    #[serde(default)]
    pub default_channel: Option<String>,

    /// Lines kept per channel before the oldest are dropped
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Show the output panel at startup
    #[serde(default = "default_true")]
    pub open_on_start: bool,

    /// Start the sample output producers
    #[serde(default = "default_true")]
    pub demo_producers: bool,

    /// Log file path
    #[serde(default = "default_log_file")]
    pub log_file: String,

    /// Log level filter ("error", "warn", "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub keybindings: Vec<KeyBindingOverride>,
}

fn default_max_lines() -> usize {
    10_000
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> String {
    env::temp_dir()
        .join("output-panel.log")
        .to_string_lossy()
        .to_string()
}

fn default_log_level() -> String {
    "debug".to_string()
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            default_channel: None,
            max_lines: default_max_lines(),
            open_on_start: true,
            demo_producers: true,
            log_file: default_log_file(),
            log_level: default_log_level(),
            keybindings: Vec::new(),
        }
    }
}

impl PanelConfig {
    /// Load config from CWD first, then home directory
    ///
    /// Without a config file this is the default config. A file that does
    /// not parse is an error, left for the caller to report once logging is
    /// up.
    pub fn load() -> anyhow::Result<Self> {
        match crate::load_config_file() {
            Some(content) => Self::parse(&content),
            None => Ok(Self::default()),
        }
    }

    /// Parse config text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse config file")
    }
}
