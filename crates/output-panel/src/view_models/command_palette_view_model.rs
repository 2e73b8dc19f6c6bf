//! View model for command palette
//!
//! Pre-computes all display data for the command palette view, separating
//! data preparation from rendering logic.

use crate::commands::{filter_commands, get_all_commands};
use crate::state::AppState;

/// View model for the command palette
#[derive(Debug, Clone)]
pub struct CommandPaletteViewModel {
    /// Total number of commands (before filtering)
    pub total_commands: usize,
    /// Pre-formatted input text for display
    pub input_text: String,
    /// Is input empty (for placeholder styling)
    pub input_is_empty: bool,
    /// Command rows (after filtering)
    pub rows: Vec<CommandRow>,
    /// Description of the selected command
    pub selected_description: Option<String>,
    /// Maximum category width for column sizing
    pub max_category_width: u16,
}

/// A single row in the command list
#[derive(Debug, Clone)]
pub struct CommandRow {
    pub is_selected: bool,
    /// Selection indicator ("> " or "  ")
    pub indicator: &'static str,
    pub shortcut_hint: String,
    pub title: String,
    pub category: String,
}

impl CommandPaletteViewModel {
    /// Build view model from application state
    pub fn from_state(state: &AppState) -> Self {
        let all_commands = get_all_commands(state);
        let total_commands = all_commands.len();
        let filtered_commands = filter_commands(&all_commands, &state.command_palette.query);
        let selected_index = state.command_palette.selected_index;

        let max_category_width = filtered_commands
            .iter()
            .map(|cmd| cmd.category().len())
            .max()
            .unwrap_or(10) as u16
            + 4;

        let rows = filtered_commands
            .iter()
            .enumerate()
            .map(|(idx, cmd)| {
                let is_selected = idx == selected_index;
                CommandRow {
                    is_selected,
                    indicator: if is_selected { "> " } else { "  " },
                    shortcut_hint: cmd.shortcut_hint.clone().unwrap_or_default(),
                    title: cmd.title().to_string(),
                    category: format!("[{}]", cmd.category()),
                }
            })
            .collect();

        Self {
            total_commands,
            input_text: state.command_palette.query.clone(),
            input_is_empty: state.command_palette.query.is_empty(),
            rows,
            selected_description: filtered_commands
                .get(selected_index)
                .map(|cmd| cmd.description().to_string()),
            max_category_width,
        }
    }

    /// First row to render so the selected row stays inside `height` rows
    pub fn scroll_start(&self, height: usize) -> usize {
        let selected = self
            .rows
            .iter()
            .position(|row| row.is_selected)
            .unwrap_or(0);
        if height == 0 || selected < height {
            0
        } else {
            selected + 1 - height
        }
    }
}
