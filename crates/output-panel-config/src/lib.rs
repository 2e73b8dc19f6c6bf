//! Configuration for output-panel
//!
//! The config file is looked up in the current directory first, then in the
//! user's home directory.

mod panel_config;

pub use panel_config::{KeyBindingOverride, PanelConfig};

use std::fs;
use std::path::PathBuf;

/// Name of the configuration file
pub const CONFIG_FILE_NAME: &str = "output-panel.toml";

/// Candidate config file locations, in lookup order
pub fn config_file_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
    if let Some(home) = dirs::home_dir() {
        candidates.push(home.join(format!(".{}", CONFIG_FILE_NAME)));
    }
    candidates
}

/// Read the first config file that exists
pub fn load_config_file() -> Option<String> {
    config_file_candidates().into_iter().find_map(|path| {
        let content = fs::read_to_string(&path).ok()?;
        log::debug!("Read config file {:?}", path);
        Some(content)
    })
}
