use crate::state::OutputPanelState;
use output_panel_theme::Theme;
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};

const SELECTOR_SEPARATOR: &str = " │ ";

/// View model for the output panel - handles presentation logic
pub struct OutputPanelViewModel<'a> {
    state: &'a OutputPanelState,
}

impl<'a> OutputPanelViewModel<'a> {
    pub fn new(state: &'a OutputPanelState) -> Self {
        Self { state }
    }

    /// Get the visible lines based on scroll offset and available height
    pub fn visible_lines(&self, available_height: usize) -> &[String] {
        let total_lines = self.state.lines.len();

        // Calculate the end index (where to stop showing lines)
        let end_index = total_lines.saturating_sub(self.state.scroll_offset);

        // Calculate the start index (where to start showing lines)
        let start_index = end_index.saturating_sub(available_height);

        if start_index < end_index && start_index < total_lines {
            &self.state.lines[start_index..end_index]
        } else {
            &[]
        }
    }

    /// Style an output line, highlighting warnings and errors
    pub fn format_line(line: &str, theme: &Theme) -> Line<'static> {
        let lower = line.to_lowercase();
        let style = if lower.contains("[error]") || lower.contains("error:") {
            theme.error()
        } else if lower.contains("[warn]") || lower.contains("warning:") {
            theme.scroll_locked()
        } else {
            theme.text()
        };
        Line::from(Span::styled(line.to_string(), style))
    }

    /// Panel title with the active channel and scroll indicator
    pub fn title(&self) -> String {
        let channel = self
            .state
            .active_channel
            .as_ref()
            .map(|channel| channel.label.as_str())
            .unwrap_or("no channel");

        if self.state.scroll_offset > 0 {
            format!(" Output: {} - ↑{} ", channel, self.state.scroll_offset)
        } else {
            format!(" Output: {} ", channel)
        }
    }

    /// Channel switcher row: all selector options, the selected one highlighted
    pub fn selector_line(&self, theme: &Theme) -> Line<'static> {
        let selector = &self.state.selector;
        if selector.is_empty() {
            return Line::from(Span::styled("No output channels", theme.muted().italic()));
        }

        let mut spans = Vec::with_capacity(selector.sorted_labels.len() * 2 + 2);
        for (index, label) in selector.sorted_labels.iter().enumerate() {
            if index > 0 {
                spans.push(Span::styled(SELECTOR_SEPARATOR, theme.muted()));
            }
            let style = if index == selector.selected_index {
                theme.selected()
            } else {
                theme.muted()
            };
            spans.push(Span::styled(format!(" {} ", label), style));
        }

        spans.push(Span::raw("  "));
        spans.push(self.scroll_lock_span(theme));
        Line::from(spans)
    }

    fn scroll_lock_span(&self, theme: &Theme) -> Span<'static> {
        if self.state.scroll_lock {
            Span::styled("[scroll lock]", theme.scroll_locked())
        } else {
            Span::styled("[follow]", Style::default().patch(theme.muted()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use output_channels::{ChannelDescriptor, SelectorProjection};

    fn state_with_lines(count: usize) -> OutputPanelState {
        OutputPanelState {
            lines: (0..count).map(|i| format!("line {}", i)).collect(),
            ..OutputPanelState::default()
        }
    }

    #[test]
    fn test_visible_lines_follow_tail() {
        let state = state_with_lines(20);
        let vm = OutputPanelViewModel::new(&state);

        let visible = vm.visible_lines(5);
        assert_eq!(visible.len(), 5);
        assert_eq!(visible[4], "line 19");
    }

    #[test]
    fn test_visible_lines_with_scroll_offset() {
        let mut state = state_with_lines(20);
        state.scroll_offset = 3;
        let vm = OutputPanelViewModel::new(&state);

        let visible = vm.visible_lines(5);
        assert_eq!(visible.first().map(String::as_str), Some("line 12"));
        assert_eq!(visible.last().map(String::as_str), Some("line 16"));
    }

    #[test]
    fn test_visible_lines_empty_buffer() {
        let state = state_with_lines(0);
        assert!(OutputPanelViewModel::new(&state).visible_lines(5).is_empty());
    }

    #[test]
    fn test_title_shows_channel_and_scroll() {
        let mut state = state_with_lines(20);
        state.active_channel = Some(ChannelDescriptor::new("build", "Build"));
        assert_eq!(OutputPanelViewModel::new(&state).title(), " Output: Build ");

        state.scroll_offset = 4;
        assert_eq!(
            OutputPanelViewModel::new(&state).title(),
            " Output: Build - ↑4 "
        );
    }

    #[test]
    fn test_selector_line_highlights_selected_option() {
        let theme = Theme::default();
        let mut state = state_with_lines(0);
        state.selector = SelectorProjection {
            sorted_labels: vec!["Build".to_string(), "Git".to_string()],
            selected_index: 1,
        };

        let line = OutputPanelViewModel::new(&state).selector_line(&theme);
        let selected: Vec<_> = line
            .spans
            .iter()
            .filter(|span| span.style == theme.selected())
            .map(|span| span.content.to_string())
            .collect();
        assert_eq!(selected, vec![" Git "]);
    }

    #[test]
    fn test_selector_line_without_channels() {
        let theme = Theme::default();
        let state = state_with_lines(0);
        let line = OutputPanelViewModel::new(&state).selector_line(&theme);
        assert_eq!(line.spans[0].content, "No output channels");
    }
}
