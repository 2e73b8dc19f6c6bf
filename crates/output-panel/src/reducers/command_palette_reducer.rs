use crate::actions::{Action, CommandPaletteAction};
use crate::commands::{filter_commands, Command};
use crate::state::CommandPaletteState;

/// Reducer for command palette state
pub fn reduce(
    mut state: CommandPaletteState,
    action: &Action,
    commands: &[Command],
) -> CommandPaletteState {
    let Action::CommandPalette(action) = action else {
        return state;
    };

    match action {
        CommandPaletteAction::Open => {
            state.visible = true;
            state.query.clear();
            state.selected_index = 0;
        }
        CommandPaletteAction::Close | CommandPaletteAction::Execute => {
            state = CommandPaletteState::default();
        }
        CommandPaletteAction::InsertChar(c) => {
            state.query.push(*c);
            state.selected_index = 0; // Reset selection when query changes
        }
        CommandPaletteAction::Backspace => {
            state.query.pop();
            state.selected_index = 0;
        }
        CommandPaletteAction::NavigateNext => {
            let filtered = filter_commands(commands, &state.query);
            if !filtered.is_empty() {
                state.selected_index = (state.selected_index + 1).min(filtered.len() - 1);
            }
        }
        CommandPaletteAction::NavigatePrevious => {
            state.selected_index = state.selected_index.saturating_sub(1);
        }
    }
    state
}
