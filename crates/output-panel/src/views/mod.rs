use crate::state::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

pub mod command_palette;
pub mod output_panel;
pub mod status_bar;
pub mod workspace;

/// Share of the screen taken by the output panel when visible
const PANEL_HEIGHT_PERCENT: u16 = 45;

/// Workspace, output panel and status bar areas
fn split(area: Rect, panel_visible: bool) -> (Rect, Rect, Rect) {
    let panel = if panel_visible {
        Constraint::Percentage(PANEL_HEIGHT_PERCENT)
    } else {
        Constraint::Length(0)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), panel, Constraint::Length(1)])
        .split(area);

    (chunks[0], chunks[1], chunks[2])
}

/// Rows available for output lines at the given terminal size
pub fn output_content_height(area: Rect, state: &AppState) -> usize {
    let (_, panel, _) = split(area, state.output_panel.visible);
    output_panel::content_height(panel)
}

/// Render the entire application UI
///
/// The command palette floats on top of everything else.
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let (workspace_area, panel_area, status_area) = split(area, state.output_panel.visible);

    workspace::render(state, workspace_area, f);
    if state.output_panel.visible {
        output_panel::render(state, panel_area, f);
    }
    status_bar::render(state, status_area, f);

    if state.command_palette.visible {
        command_palette::render(state, area, f);
    }
}
