//! Output panel actions
//!
//! Requests coming from keys and the command palette, and updates published
//! by the channel registry.

use output_channels::{ChannelDescriptor, ChannelId, SelectorProjection};

#[derive(Debug, Clone)]
pub enum OutputPanelAction {
    // Commands
    /// Show or hide the panel
    Toggle,
    /// Clear the active channel
    Clear,
    /// Flip scroll lock on the active channel
    ToggleScrollLock,
    /// Show a channel by id; `None` shows the registry's default channel
    SwitchTo(Option<ChannelId>),
    /// Show the channel behind a selector option (label text)
    SelectOption(String),
    /// Cycle to the next channel in selector order
    SelectNext,
    /// Cycle to the previous channel in selector order
    SelectPrevious,

    // Panel host requests
    VisibilityToggled,
    Focused,

    // Registry updates
    /// Selector projection recomputed
    SelectorUpdated(SelectorProjection),
    /// Active channel's scroll lock, mirrored for the toolbar
    ScrollLockChecked(bool),
    /// Active channel's buffer changed, or another channel became active
    LinesUpdated {
        channel: Option<ChannelDescriptor>,
        lines: Vec<String>,
        /// Lines ever appended to `channel`, counting those the cap dropped
        appended: u64,
    },
    /// Formatted log line for the application log channel
    LogRecorded(String),

    // Scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,
    /// Update visible height (for proper scroll bounds)
    SetVisibleHeight(usize),
}
