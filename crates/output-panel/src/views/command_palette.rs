use crate::state::AppState;
use crate::view_models::CommandPaletteViewModel;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Modifier, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

/// Render the command palette as a centered floating panel
pub fn render(state: &AppState, area: Rect, f: &mut Frame) {
    let theme = &state.theme;
    let view_model = CommandPaletteViewModel::from_state(state);

    // Calculate centered area (70% width, 60% height)
    let popup_width = (area.width * 70 / 100).min(100);
    let popup_height = (area.height * 60 / 100).min(30);
    let popup_area = Rect {
        x: area.x + area.width.saturating_sub(popup_width) / 2,
        y: area.y + area.height.saturating_sub(popup_height) / 2,
        width: popup_width,
        height: popup_height,
    };

    f.render_widget(Clear, popup_area);

    let title = format!(
        " Command Palette ({}/{} commands) ",
        view_model.rows.len(),
        view_model.total_commands
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_style(theme.panel_title().add_modifier(Modifier::BOLD))
        .border_style(theme.panel_border_focused())
        .style(theme.panel_background());
    f.render_widget(block, popup_area);

    let inner = popup_area.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input box
            Constraint::Min(3),    // Results list
            Constraint::Length(2), // Details area
            Constraint::Length(1), // Footer
        ])
        .split(inner);

    // Input box
    let input_text = if view_model.input_is_empty {
        Line::from(Span::styled(
            "Type to search commands...",
            theme.muted().italic(),
        ))
    } else {
        Line::from(Span::styled(view_model.input_text.clone(), theme.text()))
    };
    f.render_widget(
        Paragraph::new(input_text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.panel_border())
                .style(theme.panel_background()),
        ),
        chunks[0],
    );

    // Results
    if view_model.rows.is_empty() {
        f.render_widget(
            Paragraph::new("No matching commands")
                .style(theme.muted())
                .alignment(Alignment::Center),
            chunks[1],
        );
    } else {
        let height = chunks[1].height as usize;
        let rows: Vec<Row> = view_model
            .rows
            .iter()
            .skip(view_model.scroll_start(height))
            .take(height)
            .map(|row| {
                let style = if row.is_selected {
                    theme.selected()
                } else {
                    theme.text()
                };
                Row::new(vec![
                    Cell::from(row.indicator),
                    Cell::from(row.shortcut_hint.clone()).style(theme.key_hint()),
                    Cell::from(row.title.clone()),
                    Cell::from(row.category.clone()).style(theme.muted()),
                ])
                .style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(2),
                Constraint::Length(10),
                Constraint::Min(20),
                Constraint::Length(view_model.max_category_width),
            ],
        )
        .style(theme.panel_background());
        f.render_widget(table, chunks[1]);
    }

    // Details
    if let Some(description) = &view_model.selected_description {
        f.render_widget(
            Paragraph::new(Span::styled(description.clone(), theme.muted()))
                .wrap(Wrap { trim: false }),
            chunks[2],
        );
    }

    // Footer with keyboard hints
    let footer_line = Line::from(vec![
        Span::styled("Enter", theme.key_hint()),
        Span::styled(" execute  ", theme.muted()),
        Span::styled("↑/↓", theme.key_hint()),
        Span::styled(" navigate  ", theme.muted()),
        Span::styled("Esc", theme.key_hint()),
        Span::styled(" close", theme.muted()),
    ]);
    f.render_widget(
        Paragraph::new(footer_line).alignment(Alignment::Center),
        chunks[3],
    );
}
