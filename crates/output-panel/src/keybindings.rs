//! Key bindings
//!
//! A binding maps a key spec such as `"ctrl+p"`, `"tab"` or `"G"` to a
//! [`CommandId`].

use crate::command_id::CommandId;
use output_panel_config::KeyBindingOverride;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::str::FromStr;

/// Parsed key spec
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPattern {
    code: KeyCode,
    modifiers: KeyModifiers,
}

impl KeyPattern {
    /// Parse a key spec; modifiers are `ctrl`, `alt` and `shift`, joined with `+`
    pub fn parse(spec: &str) -> Option<Self> {
        let parts: Vec<&str> = spec.split('+').map(str::trim).collect();
        let (key, modifier_names) = parts.split_last()?;

        let mut modifiers = KeyModifiers::NONE;
        for name in modifier_names {
            modifiers |= match name.to_lowercase().as_str() {
                "ctrl" | "control" => KeyModifiers::CONTROL,
                "alt" => KeyModifiers::ALT,
                "shift" => KeyModifiers::SHIFT,
                _ => return None,
            };
        }

        let code = match key.to_lowercase().as_str() {
            "tab" if modifiers.contains(KeyModifiers::SHIFT) => {
                modifiers.remove(KeyModifiers::SHIFT);
                KeyCode::BackTab
            }
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "space" => KeyCode::Char(' '),
            "backspace" => KeyCode::Backspace,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdown" => KeyCode::PageDown,
            lower => {
                if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
                    KeyCode::F(n)
                } else {
                    let mut chars = key.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => KeyCode::Char(c),
                        _ => return None,
                    }
                }
            }
        };

        Some(Self { code, modifiers })
    }

    /// Whether a key event matches; shift is implied by the character itself
    pub fn matches(&self, key: &KeyEvent) -> bool {
        let relevant = KeyModifiers::CONTROL | KeyModifiers::ALT;
        self.code == key.code && (key.modifiers & relevant) == (self.modifiers & relevant)
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// Key spec, parsed on match
    pub key: String,
    /// Display form, e.g. "Ctrl+P"
    pub hint: String,
    pub command: CommandId,
}

impl KeyBinding {
    pub fn new(key: impl Into<String>, hint: impl Into<String>, command: CommandId) -> Self {
        Self {
            key: key.into(),
            hint: hint.into(),
            command,
        }
    }

    fn matches(&self, key: &KeyEvent) -> bool {
        KeyPattern::parse(&self.key).is_some_and(|pattern| pattern.matches(key))
    }
}

/// Ordered list of key bindings; the first match wins
#[derive(Debug, Clone, Default)]
pub struct Keymap {
    bindings: Vec<KeyBinding>,
}

impl Keymap {
    pub fn new(bindings: Vec<KeyBinding>) -> Self {
        Self { bindings }
    }

    pub fn bindings(&self) -> &[KeyBinding] {
        &self.bindings
    }

    /// Command bound to a key event
    pub fn match_key(&self, key: &KeyEvent) -> Option<CommandId> {
        self.bindings
            .iter()
            .find(|binding| binding.matches(key))
            .map(|binding| binding.command)
    }

    /// All hints for a command, e.g. "q/Esc"
    pub fn compact_hint_for_command(&self, command: CommandId) -> Option<String> {
        let hints: Vec<&str> = self
            .bindings
            .iter()
            .filter(|binding| binding.command == command)
            .map(|binding| binding.hint.as_str())
            .collect();

        if hints.is_empty() {
            None
        } else {
            Some(hints.join("/"))
        }
    }

    /// Layer configured bindings in front of the existing ones
    ///
    /// Overrides with an unknown command or key spec are skipped with a
    /// warning.
    pub fn with_overrides(&self, overrides: &[KeyBindingOverride]) -> Self {
        let mut bindings: Vec<KeyBinding> = overrides
            .iter()
            .filter_map(|binding| {
                let Ok(command) = CommandId::from_str(&binding.command) else {
                    log::warn!("Unknown command in key binding: {}", binding.command);
                    return None;
                };
                if KeyPattern::parse(&binding.key).is_none() {
                    log::warn!("Invalid key in key binding: {}", binding.key);
                    return None;
                }
                Some(KeyBinding::new(&binding.key, &binding.key, command))
            })
            .collect();

        bindings.extend(self.bindings.iter().cloned());
        Self { bindings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_parse_modifiers_and_named_keys() {
        let pattern = KeyPattern::parse("ctrl+p").unwrap();
        assert!(pattern.matches(&key(KeyCode::Char('p'), KeyModifiers::CONTROL)));
        assert!(!pattern.matches(&key(KeyCode::Char('p'), KeyModifiers::NONE)));

        let back = KeyPattern::parse("shift+tab").unwrap();
        assert!(back.matches(&key(KeyCode::BackTab, KeyModifiers::SHIFT)));

        assert_eq!(
            KeyPattern::parse("f5"),
            KeyPattern::parse("F5"),
        );
        assert!(KeyPattern::parse("hyper+x").is_none());
        assert!(KeyPattern::parse("xyz").is_none());
    }

    #[test]
    fn test_uppercase_char_ignores_shift() {
        let pattern = KeyPattern::parse("G").unwrap();
        assert!(pattern.matches(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)));
        assert!(!pattern.matches(&key(KeyCode::Char('g'), KeyModifiers::NONE)));
    }

    #[test]
    fn test_compact_hint_joins_all_bindings() {
        let keymap = Keymap::new(vec![
            KeyBinding::new("q", "q", CommandId::GlobalClose),
            KeyBinding::new("esc", "Esc", CommandId::GlobalClose),
        ]);

        assert_eq!(
            keymap.compact_hint_for_command(CommandId::GlobalClose),
            Some("q/Esc".to_string())
        );
        assert_eq!(keymap.compact_hint_for_command(CommandId::GlobalQuit), None);
    }

    #[test]
    fn test_overrides_take_precedence() {
        let keymap = Keymap::new(vec![KeyBinding::new("c", "c", CommandId::OutputClear)]);
        let overrides = vec![
            KeyBindingOverride {
                key: "c".to_string(),
                command: "output_toggle_scroll_lock".to_string(),
            },
            KeyBindingOverride {
                key: "x".to_string(),
                command: "not_a_command".to_string(),
            },
        ];

        let keymap = keymap.with_overrides(&overrides);

        assert_eq!(keymap.bindings().len(), 2);
        assert_eq!(
            keymap.match_key(&key(KeyCode::Char('c'), KeyModifiers::NONE)),
            Some(CommandId::OutputToggleScrollLock)
        );
    }
}
