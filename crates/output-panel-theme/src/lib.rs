//! Colors and styles for output-panel

use ratatui::style::{Color, Modifier, Style};

/// Application theme
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg_panel: Color,
    pub bg_selected: Color,
    pub border: Color,
    pub border_focused: Color,
    pub title: Color,
    pub text_primary: Color,
    pub text_muted: Color,
    pub accent: Color,
    pub status_warning: Color,
    pub status_error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg_panel: Color::Rgb(24, 24, 28),
            bg_selected: Color::Rgb(48, 64, 96),
            border: Color::Rgb(80, 80, 90),
            border_focused: Color::Rgb(120, 170, 255),
            title: Color::Rgb(200, 200, 210),
            text_primary: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(130, 130, 140),
            accent: Color::Rgb(120, 170, 255),
            status_warning: Color::Rgb(230, 190, 90),
            status_error: Color::Rgb(230, 100, 100),
        }
    }
}

impl Theme {
    pub fn panel_background(&self) -> Style {
        Style::default().bg(self.bg_panel)
    }

    pub fn panel_border(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn panel_border_focused(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    pub fn panel_title(&self) -> Style {
        Style::default().fg(self.title)
    }

    pub fn text(&self) -> Style {
        Style::default().fg(self.text_primary)
    }

    pub fn muted(&self) -> Style {
        Style::default().fg(self.text_muted)
    }

    /// Selected entry in a list or selector
    pub fn selected(&self) -> Style {
        Style::default()
            .fg(self.text_primary)
            .bg(self.bg_selected)
            .add_modifier(Modifier::BOLD)
    }

    pub fn key_hint(&self) -> Style {
        Style::default().fg(self.accent).add_modifier(Modifier::BOLD)
    }

    /// Scroll lock indicator when engaged
    pub fn scroll_locked(&self) -> Style {
        Style::default()
            .fg(self.status_warning)
            .add_modifier(Modifier::BOLD)
    }

    pub fn error(&self) -> Style {
        Style::default().fg(self.status_error)
    }
}
