use crate::state::AppState;
use crate::view_models::OutputPanelViewModel;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Borders plus the channel selector row
const CHROME_HEIGHT: u16 = 3;

/// Rows left for output lines in a panel of the given area
pub fn content_height(panel_area: Rect) -> usize {
    panel_area.height.saturating_sub(CHROME_HEIGHT) as usize
}

/// Render the output panel: channel selector on top, active channel below
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let panel = &state.output_panel;
    let view_model = OutputPanelViewModel::new(panel);

    f.render_widget(Clear, area);

    let border_style = if panel.focused {
        theme.panel_border_focused()
    } else {
        theme.panel_border()
    };
    let block = Block::default()
        .title(view_model.title())
        .borders(Borders::ALL)
        .border_style(border_style)
        .title_style(theme.panel_title())
        .style(theme.panel_background());

    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        Paragraph::new(view_model.selector_line(theme)).style(theme.panel_background()),
        chunks[0],
    );

    let formatted_lines: Vec<_> = view_model
        .visible_lines(content_height(area))
        .iter()
        .map(|line| OutputPanelViewModel::format_line(line, theme))
        .collect();

    f.render_widget(
        Paragraph::new(formatted_lines).style(theme.panel_background()),
        chunks[1],
    );
}
