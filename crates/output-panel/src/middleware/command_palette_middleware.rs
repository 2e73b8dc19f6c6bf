//! Command Palette Middleware
//!
//! Executes the selected command when CommandPalette::Execute is dispatched.

use crate::actions::{Action, CommandPaletteAction};
use crate::commands::{filter_commands, get_all_commands};
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;

pub struct CommandPaletteMiddleware;

impl CommandPaletteMiddleware {
    pub fn new() -> Self {
        Self
    }
}

impl Middleware for CommandPaletteMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::CommandPalette(CommandPaletteAction::Execute) = action {
            let all_commands = get_all_commands(state);
            let filtered = filter_commands(&all_commands, &state.command_palette.query);

            if let Some(cmd) = filtered.get(state.command_palette.selected_index) {
                log::debug!("Command palette executing: {}", cmd.title());
                dispatcher.dispatch(cmd.to_action());
            }
        }

        // Let the action continue to the reducer to close the palette
        true
    }
}
