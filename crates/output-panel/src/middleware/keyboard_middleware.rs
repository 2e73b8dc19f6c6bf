//! KeyboardMiddleware - translates keyboard events into actions
//!
//! Intercepts `GlobalAction::KeyPressed` and either:
//! - types into the command palette when it is open, or
//! - looks the key up in the keymap and dispatches the bound command

use crate::actions::{Action, CommandPaletteAction, GlobalAction};
use crate::command_id::CommandId;
use crate::dispatcher::Dispatcher;
use crate::middleware::Middleware;
use crate::state::AppState;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct KeyboardMiddleware;

impl KeyboardMiddleware {
    pub fn new() -> Self {
        Self
    }

    fn handle_key(&self, key: &KeyEvent, state: &AppState, dispatcher: &Dispatcher) {
        let capabilities = state.capabilities();
        if capabilities.accepts_text_input() {
            Self::handle_text_input_key(key, dispatcher);
            return;
        }

        let Some(command) = state.keymap.match_key(key) else {
            return;
        };
        if Self::is_scroll_command(command) && !capabilities.scrolls() {
            log::debug!("Ignoring {:?}: nothing to scroll", command);
            return;
        }

        log::debug!("Keymap matched command: {:?}", command);
        dispatcher.dispatch(command.to_action());
    }

    fn is_scroll_command(command: CommandId) -> bool {
        matches!(
            command,
            CommandId::ScrollUp
                | CommandId::ScrollDown
                | CommandId::ScrollPageUp
                | CommandId::ScrollPageDown
                | CommandId::ScrollToTop
                | CommandId::ScrollToBottom
        )
    }

    /// Keys while the command palette's search field has focus
    fn handle_text_input_key(key: &KeyEvent, dispatcher: &Dispatcher) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let action = match key.code {
            KeyCode::Char('c') if ctrl => Action::Global(GlobalAction::Quit),
            KeyCode::Char('p') if ctrl => Action::CommandPalette(CommandPaletteAction::Close),
            KeyCode::Esc => Action::CommandPalette(CommandPaletteAction::Close),
            KeyCode::Enter => Action::CommandPalette(CommandPaletteAction::Execute),
            KeyCode::Up => Action::CommandPalette(CommandPaletteAction::NavigatePrevious),
            KeyCode::Down | KeyCode::Tab => {
                Action::CommandPalette(CommandPaletteAction::NavigateNext)
            }
            KeyCode::Backspace => Action::CommandPalette(CommandPaletteAction::Backspace),
            KeyCode::Char(c) if !ctrl => Action::CommandPalette(CommandPaletteAction::InsertChar(c)),
            _ => return,
        };
        dispatcher.dispatch(action);
    }
}

impl Middleware for KeyboardMiddleware {
    fn handle(&mut self, action: &Action, state: &AppState, dispatcher: &Dispatcher) -> bool {
        if let Action::Global(GlobalAction::KeyPressed(key)) = action {
            self.handle_key(key, state, dispatcher);
            // Raw key presses never reach the reducer
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::OutputPanelAction;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Action {
        Action::Global(GlobalAction::KeyPressed(KeyEvent::new(code, modifiers)))
    }

    #[test]
    fn test_key_dispatches_bound_command() {
        let mut middleware = KeyboardMiddleware::new();
        let dispatcher = Dispatcher::new();

        let pass = middleware.handle(
            &press(KeyCode::Char('c'), KeyModifiers::NONE),
            &AppState::default(),
            &dispatcher,
        );

        assert!(!pass);
        assert!(matches!(
            dispatcher.pop(),
            Some(Action::OutputPanel(OutputPanelAction::Clear))
        ));
    }

    #[test]
    fn test_palette_receives_typed_text() {
        let mut middleware = KeyboardMiddleware::new();
        let dispatcher = Dispatcher::new();
        let mut state = AppState::default();
        state.command_palette.visible = true;

        middleware.handle(&press(KeyCode::Char('c'), KeyModifiers::NONE), &state, &dispatcher);

        assert!(matches!(
            dispatcher.pop(),
            Some(Action::CommandPalette(CommandPaletteAction::InsertChar('c')))
        ));
    }

    #[test]
    fn test_scroll_keys_ignored_with_hidden_panel() {
        let mut middleware = KeyboardMiddleware::new();
        let dispatcher = Dispatcher::new();
        let mut state = AppState::default();
        state.output_panel.visible = false;

        middleware.handle(&press(KeyCode::Char('j'), KeyModifiers::NONE), &state, &dispatcher);

        assert!(dispatcher.pop().is_none());
    }
}
