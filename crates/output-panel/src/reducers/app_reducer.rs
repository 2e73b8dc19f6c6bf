use crate::actions::{Action, BootstrapAction, GlobalAction};
use crate::commands::get_all_commands;
use crate::keymap::default_keymap;
use crate::reducers::{command_palette_reducer, output_panel_reducer};
use crate::state::{AppState, CommandPaletteState};

/// Root reducer
///
/// Handles global actions itself and hands everything else to the
/// sub-reducers, each of which ignores actions outside its scope.
pub fn reduce(mut state: AppState, action: &Action) -> AppState {
    match action {
        Action::Global(GlobalAction::Quit) => {
            state.running = false;
            return state;
        }

        Action::Global(GlobalAction::Close) => {
            // Close the top-most thing that is open
            if state.command_palette.visible {
                log::debug!("Closing command palette");
                state.command_palette = CommandPaletteState::default();
            } else if state.output_panel.visible {
                log::debug!("Hiding output panel");
                state.output_panel.visible = false;
                state.output_panel.focused = false;
            } else {
                log::debug!("Nothing left to close - quitting application");
                state.running = false;
            }
            return state;
        }

        Action::Bootstrap(BootstrapAction::ConfigLoaded(config)) => {
            state.keymap = default_keymap().with_overrides(&config.keybindings);
            state.output_panel.visible = config.open_on_start;
            state.config = config.clone();
            log::info!("Panel config loaded into state");
        }

        _ => {}
    }

    state.output_panel = output_panel_reducer::reduce(state.output_panel, action);

    if let Action::CommandPalette(_) = action {
        let commands = get_all_commands(&state);
        state.command_palette =
            command_palette_reducer::reduce(state.command_palette, action, &commands);
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::{CommandPaletteAction, OutputPanelAction};
    use output_panel_config::{KeyBindingOverride, PanelConfig};
    use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_close_unwinds_palette_then_panel_then_quits() {
        let mut state = AppState::default();
        state = reduce(state, &Action::CommandPalette(CommandPaletteAction::Open));
        assert!(state.command_palette.visible);

        let close = Action::Global(GlobalAction::Close);
        state = reduce(state, &close);
        assert!(!state.command_palette.visible);
        assert!(state.output_panel.visible);

        state = reduce(state, &close);
        assert!(!state.output_panel.visible);
        assert!(state.running);

        state = reduce(state, &close);
        assert!(!state.running);
    }

    #[test]
    fn test_config_loaded_applies_visibility_and_keymap() {
        let config = PanelConfig {
            open_on_start: false,
            keybindings: vec![KeyBindingOverride {
                key: "x".to_string(),
                command: "output_clear".to_string(),
            }],
            ..PanelConfig::default()
        };

        let state = reduce(
            AppState::default(),
            &Action::Bootstrap(BootstrapAction::ConfigLoaded(config)),
        );

        assert!(!state.output_panel.visible);
        assert_eq!(
            state
                .keymap
                .match_key(&KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE)),
            Some(crate::command_id::CommandId::OutputClear)
        );
    }

    #[test]
    fn test_output_actions_reach_panel_reducer() {
        let state = reduce(
            AppState::default(),
            &Action::OutputPanel(OutputPanelAction::ScrollLockChecked(true)),
        );

        assert!(state.output_panel.scroll_lock);
    }
}
