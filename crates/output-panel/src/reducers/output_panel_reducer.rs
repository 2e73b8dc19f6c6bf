use crate::actions::{Action, OutputPanelAction};
use crate::state::OutputPanelState;

/// Largest useful scroll offset: the oldest line at the top of the viewport
fn max_offset(state: &OutputPanelState) -> usize {
    state.lines.len().saturating_sub(state.visible_height)
}

/// Reducer for output panel state
pub fn reduce(mut state: OutputPanelState, action: &Action) -> OutputPanelState {
    let Action::OutputPanel(action) = action else {
        return state;
    };
    let is_active = state.visible;

    match action {
        OutputPanelAction::VisibilityToggled => {
            state.visible = !state.visible;
            if !state.visible {
                state.focused = false;
            }
        }
        OutputPanelAction::Focused => {
            state.visible = true;
            state.focused = true;
        }
        OutputPanelAction::SelectorUpdated(projection) => {
            state.selector = projection.clone();
        }
        OutputPanelAction::ScrollLockChecked(scroll_lock) => {
            state.scroll_lock = *scroll_lock;
        }
        OutputPanelAction::LinesUpdated {
            channel,
            lines,
            appended,
        } => {
            let same_channel = state.active_channel.as_ref().map(|c| &c.id)
                == channel.as_ref().map(|c| &c.id);

            if same_channel && *appended < state.appended {
                // Older than what is already shown
                return state;
            }

            if same_channel && state.scroll_lock {
                // Keep the viewport on the same lines while output arrives,
                // including when the cap drops as many lines as were added
                let added = usize::try_from(*appended - state.appended).unwrap_or(usize::MAX);
                state.scroll_offset = state.scroll_offset.saturating_add(added);
            } else {
                // Follow the tail
                state.scroll_offset = 0;
            }

            state.active_channel = channel.clone();
            state.lines = lines.clone();
            state.appended = *appended;
            state.scroll_offset = state.scroll_offset.min(max_offset(&state));
        }
        OutputPanelAction::SetVisibleHeight(height) => {
            state.visible_height = *height;
            state.scroll_offset = state.scroll_offset.min(max_offset(&state));
        }
        OutputPanelAction::ScrollUp if is_active => {
            state.scroll_offset = (state.scroll_offset + 1).min(max_offset(&state));
        }
        OutputPanelAction::ScrollDown if is_active => {
            state.scroll_offset = state.scroll_offset.saturating_sub(1);
        }
        OutputPanelAction::ScrollPageUp if is_active => {
            state.scroll_offset =
                (state.scroll_offset + state.visible_height).min(max_offset(&state));
        }
        OutputPanelAction::ScrollPageDown if is_active => {
            state.scroll_offset = state.scroll_offset.saturating_sub(state.visible_height);
        }
        OutputPanelAction::ScrollToTop if is_active => {
            state.scroll_offset = max_offset(&state);
        }
        OutputPanelAction::ScrollToBottom if is_active => {
            state.scroll_offset = 0;
        }
        _ => {
            // Commands are carried out by the output middleware
        }
    }

    state
}
