//! Bootstrap actions
//!
//! Actions for application initialization.

/// Actions for application bootstrap/initialization
#[derive(Debug, Clone)]
pub enum BootstrapAction {
    /// Bootstrap process started
    Start,
    /// Panel configuration loaded
    ConfigLoaded(output_panel_config::PanelConfig),
    /// Bootstrap process completed
    End,
}
