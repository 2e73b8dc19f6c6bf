pub use crate::{
    command_id::CommandId,
    keybindings::{KeyBinding, Keymap},
};

/// Get the default keymap
pub fn default_keymap() -> Keymap {
    use CommandId::*;

    let bindings = vec![
        // Output panel
        KeyBinding::new("o", "o", OutputTogglePanel),
        KeyBinding::new("c", "c", OutputClear),
        KeyBinding::new("s", "s", OutputToggleScrollLock),
        KeyBinding::new("tab", "Tab", OutputNextChannel),
        KeyBinding::new("shift+tab", "Shift+Tab", OutputPreviousChannel),
        KeyBinding::new("d", "d", OutputShowDefault),
        // Scrolling
        KeyBinding::new("k", "k", ScrollUp),
        KeyBinding::new("up", "↑", ScrollUp),
        KeyBinding::new("j", "j", ScrollDown),
        KeyBinding::new("down", "↓", ScrollDown),
        KeyBinding::new("pageup", "PgUp", ScrollPageUp),
        KeyBinding::new("pagedown", "PgDn", ScrollPageDown),
        KeyBinding::new("g", "g", ScrollToTop),
        KeyBinding::new("G", "G", ScrollToBottom),
        // Command palette
        KeyBinding::new("ctrl+p", "Ctrl+P", CommandPaletteOpen),
        // General
        KeyBinding::new("q", "q", GlobalClose),
        KeyBinding::new("esc", "Esc", GlobalClose),
        KeyBinding::new("ctrl+c", "Ctrl+C", GlobalQuit),
    ];

    Keymap::new(bindings)
}
