//! Actions represent all possible state changes in the application.
//!
//! Actions are grouped by the part of the app they affect.

mod bootstrap;
mod command_palette;
mod global;
mod output_panel;

pub use bootstrap::BootstrapAction;
pub use command_palette::CommandPaletteAction;
pub use global::GlobalAction;
pub use output_panel::OutputPanelAction;

#[derive(Debug, Clone)]
pub enum Action {
    Global(GlobalAction),
    Bootstrap(BootstrapAction),
    OutputPanel(OutputPanelAction),
    CommandPalette(CommandPaletteAction),
}

impl Action {
    /// Actions produced by logging or by channel output, which would flood
    /// the log (or feed back into it) if logged themselves
    pub fn is_output_traffic(&self) -> bool {
        matches!(
            self,
            Action::OutputPanel(
                OutputPanelAction::LogRecorded(_) | OutputPanelAction::LinesUpdated { .. }
            )
        )
    }
}
