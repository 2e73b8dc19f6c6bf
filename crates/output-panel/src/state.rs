use crate::capabilities::PanelCapabilities;
use crate::keybindings::Keymap;
use crate::keymap::default_keymap;
use output_channels::{ChannelDescriptor, SelectorProjection};
use output_panel_config::PanelConfig;
use output_panel_theme::Theme;

/// Output panel state
#[derive(Debug, Clone)]
pub struct OutputPanelState {
    pub visible: bool,
    pub focused: bool,
    /// Channel switcher options, as published by the channel selector
    pub selector: SelectorProjection,
    /// Channel whose lines are shown
    pub active_channel: Option<ChannelDescriptor>,
    pub lines: Vec<String>,
    /// Append count of `active_channel` as of `lines`
    pub appended: u64,
    /// Mirrors the active channel's scroll lock
    pub scroll_lock: bool,
    pub scroll_offset: usize, // Lines scrolled up from the bottom (0 = following the tail)
    pub visible_height: usize,
}

impl Default for OutputPanelState {
    fn default() -> Self {
        Self {
            visible: true,
            focused: false,
            selector: SelectorProjection::default(),
            active_channel: None,
            lines: Vec::new(),
            appended: 0,
            scroll_lock: false,
            scroll_offset: 0,
            visible_height: 10,
        }
    }
}

/// Command palette state
#[derive(Debug, Clone, Default)]
pub struct CommandPaletteState {
    pub visible: bool,
    pub query: String,
    pub selected_index: usize,
}

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    pub running: bool,
    pub output_panel: OutputPanelState,
    pub command_palette: CommandPaletteState,
    pub config: PanelConfig,
    pub keymap: Keymap,
    pub theme: Theme,
}

impl AppState {
    /// Key handling capabilities of whatever currently has focus
    pub fn capabilities(&self) -> PanelCapabilities {
        if self.command_palette.visible {
            PanelCapabilities::TEXT_INPUT
        } else if self.output_panel.visible {
            PanelCapabilities::SCROLL_VERTICAL
        } else {
            PanelCapabilities::empty()
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            running: true,
            output_panel: OutputPanelState::default(),
            command_palette: CommandPaletteState::default(),
            config: PanelConfig::default(),
            keymap: default_keymap(),
            theme: Theme::default(),
        }
    }
}
