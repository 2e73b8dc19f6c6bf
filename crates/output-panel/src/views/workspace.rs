use crate::state::AppState;
use ratatui::{
    layout::{Alignment, Rect},
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Area above the output panel, listing the available key bindings
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;

    let mut lines = vec![
        Line::from(Span::styled("Output Panel", theme.panel_title().bold())),
        Line::from(""),
    ];
    lines.extend(state.keymap.bindings().iter().map(|binding| {
        Line::from(vec![
            Span::styled(format!("{:>10}", binding.hint), theme.key_hint()),
            Span::raw("  "),
            Span::styled(binding.command.title(), theme.muted()),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border())
                .style(theme.panel_background()),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    f.render_widget(paragraph, area);
}
