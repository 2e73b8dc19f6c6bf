//! Command identifiers
//!
//! Every command a user can trigger, from a key binding or the command
//! palette. Ids are snake_case in config files (e.g. `OutputClear` ->
//! `"output_clear"`).

use crate::actions::{Action, CommandPaletteAction, GlobalAction, OutputPanelAction};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum CommandId {
    // === Output panel ===
    /// Show or hide the output panel
    OutputTogglePanel,
    /// Clear the active output channel
    OutputClear,
    /// Toggle scroll lock of the active output channel
    OutputToggleScrollLock,
    /// Switch to the next output channel
    OutputNextChannel,
    /// Switch to the previous output channel
    OutputPreviousChannel,
    /// Switch to the default output channel
    OutputShowDefault,

    // === Scrolling ===
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // === Command palette ===
    CommandPaletteOpen,

    // === General ===
    /// Close the current overlay
    GlobalClose,
    /// Quit the application
    GlobalQuit,
}

impl CommandId {
    /// Convert this command ID to an Action
    pub fn to_action(self) -> Action {
        match self {
            Self::OutputTogglePanel => Action::OutputPanel(OutputPanelAction::Toggle),
            Self::OutputClear => Action::OutputPanel(OutputPanelAction::Clear),
            Self::OutputToggleScrollLock => {
                Action::OutputPanel(OutputPanelAction::ToggleScrollLock)
            }
            Self::OutputNextChannel => Action::OutputPanel(OutputPanelAction::SelectNext),
            Self::OutputPreviousChannel => Action::OutputPanel(OutputPanelAction::SelectPrevious),
            Self::OutputShowDefault => Action::OutputPanel(OutputPanelAction::SwitchTo(None)),

            Self::ScrollUp => Action::OutputPanel(OutputPanelAction::ScrollUp),
            Self::ScrollDown => Action::OutputPanel(OutputPanelAction::ScrollDown),
            Self::ScrollPageUp => Action::OutputPanel(OutputPanelAction::ScrollPageUp),
            Self::ScrollPageDown => Action::OutputPanel(OutputPanelAction::ScrollPageDown),
            Self::ScrollToTop => Action::OutputPanel(OutputPanelAction::ScrollToTop),
            Self::ScrollToBottom => Action::OutputPanel(OutputPanelAction::ScrollToBottom),

            Self::CommandPaletteOpen => Action::CommandPalette(CommandPaletteAction::Open),

            Self::GlobalClose => Action::Global(GlobalAction::Close),
            Self::GlobalQuit => Action::Global(GlobalAction::Quit),
        }
    }

    /// Title shown in the command palette
    pub fn title(&self) -> &'static str {
        match self {
            Self::OutputTogglePanel => "Toggle Output",
            Self::OutputClear => "Clear Output",
            Self::OutputToggleScrollLock => "Toggle Output Scroll Lock",
            Self::OutputNextChannel => "Next Output Channel",
            Self::OutputPreviousChannel => "Previous Output Channel",
            Self::OutputShowDefault => "Show Default Output",

            Self::ScrollUp => "Scroll up",
            Self::ScrollDown => "Scroll down",
            Self::ScrollPageUp => "Scroll page up",
            Self::ScrollPageDown => "Scroll page down",
            Self::ScrollToTop => "Scroll to top",
            Self::ScrollToBottom => "Scroll to bottom",

            Self::CommandPaletteOpen => "Open command palette",

            Self::GlobalClose => "Close",
            Self::GlobalQuit => "Quit",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::OutputTogglePanel => "Show or hide the output panel",
            Self::OutputClear => "Clear the active output channel",
            Self::OutputToggleScrollLock => "Stop or resume following new output",
            Self::OutputNextChannel => "Switch to the next output channel",
            Self::OutputPreviousChannel => "Switch to the previous output channel",
            Self::OutputShowDefault => "Switch to the default output channel",

            Self::ScrollUp => "Scroll the output up one line",
            Self::ScrollDown => "Scroll the output down one line",
            Self::ScrollPageUp => "Scroll the output up one page",
            Self::ScrollPageDown => "Scroll the output down one page",
            Self::ScrollToTop => "Jump to the oldest output",
            Self::ScrollToBottom => "Jump to the newest output",

            Self::CommandPaletteOpen => "Search and run commands",

            Self::GlobalClose => "Close the palette or the output panel",
            Self::GlobalQuit => "Exit the application",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            Self::OutputTogglePanel
            | Self::OutputClear
            | Self::OutputToggleScrollLock
            | Self::OutputNextChannel
            | Self::OutputPreviousChannel
            | Self::OutputShowDefault => "Output",

            Self::ScrollUp
            | Self::ScrollDown
            | Self::ScrollPageUp
            | Self::ScrollPageDown
            | Self::ScrollToTop
            | Self::ScrollToBottom => "Scroll",

            Self::CommandPaletteOpen | Self::GlobalClose | Self::GlobalQuit => "General",
        }
    }

    /// Whether the command is offered in the command palette
    pub fn show_in_palette(&self) -> bool {
        !matches!(self, Self::CommandPaletteOpen | Self::ScrollUp | Self::ScrollDown)
    }

    /// Commands listed in the command palette
    pub fn palette_command_ids() -> Vec<CommandId> {
        Self::iter().filter(|id| id.show_in_palette()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_parse_snake_case_id() {
        assert_eq!(
            CommandId::from_str("output_toggle_scroll_lock").unwrap(),
            CommandId::OutputToggleScrollLock
        );
        assert!(CommandId::from_str("does_not_exist").is_err());
    }

    #[test]
    fn test_palette_hides_open_palette() {
        let ids = CommandId::palette_command_ids();
        assert!(!ids.contains(&CommandId::CommandPaletteOpen));
        assert!(ids.contains(&CommandId::OutputClear));
    }

    #[test]
    fn test_show_default_switches_without_id() {
        assert!(matches!(
            CommandId::OutputShowDefault.to_action(),
            Action::OutputPanel(OutputPanelAction::SwitchTo(None))
        ));
    }
}
