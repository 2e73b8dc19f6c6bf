use crate::command_id::CommandId;
use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One-line status bar: active channel on the left, key hints on the right
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let panel = &state.output_panel;

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut left = match &panel.active_channel {
        Some(channel) => vec![
            Span::styled(format!(" {} ", channel.label), theme.selected()),
            Span::styled(format!(" {} lines", panel.lines.len()), theme.muted()),
        ],
        None => vec![Span::styled(" no output channel", theme.muted())],
    };
    if panel.scroll_lock {
        left.push(Span::styled("  scroll lock", theme.scroll_locked()));
    }
    f.render_widget(
        Paragraph::new(Line::from(left)).style(theme.panel_background()),
        chunks[0],
    );

    let mut right = Vec::new();
    for (command, label) in [
        (CommandId::CommandPaletteOpen, "commands"),
        (CommandId::OutputTogglePanel, "output"),
        (CommandId::GlobalQuit, "quit"),
    ] {
        if let Some(hint) = state.keymap.compact_hint_for_command(command) {
            right.push(Span::styled(hint, theme.key_hint()));
            right.push(Span::styled(format!(" {}  ", label), theme.muted()));
        }
    }
    f.render_widget(
        Paragraph::new(Line::from(right))
            .style(theme.panel_background())
            .alignment(Alignment::Right),
        chunks[1],
    );
}
