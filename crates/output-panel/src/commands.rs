//! Command registry
//!
//! Commands wrap CommandIds with display metadata for the command palette.
//! Besides the static commands there is one dynamic "Switch to Output"
//! command per entry of the channel selector.

use crate::actions::{Action, OutputPanelAction};
use crate::command_id::CommandId;
use crate::keybindings::Keymap;
use crate::state::AppState;
use output_channels::SelectorProjection;

/// Source of a command - either a static CommandId or a dynamic action
#[derive(Debug, Clone)]
pub enum CommandSource {
    /// Static command from CommandId enum
    Static(CommandId),
    /// Dynamic command with custom action and metadata
    Dynamic {
        action: Box<Action>,
        title: String,
        description: String,
        category: String,
    },
}

/// A command that can be executed via command palette or keybinding
#[derive(Debug, Clone)]
pub struct Command {
    pub source: CommandSource,
    /// The keyboard shortcut hint (populated from keybindings)
    pub shortcut_hint: Option<String>,
}

impl Command {
    pub fn new(id: CommandId) -> Self {
        Self {
            source: CommandSource::Static(id),
            shortcut_hint: None,
        }
    }

    pub fn with_shortcut(id: CommandId, hint: impl Into<String>) -> Self {
        Self {
            source: CommandSource::Static(id),
            shortcut_hint: Some(hint.into()),
        }
    }

    pub fn dynamic(
        action: Action,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            source: CommandSource::Dynamic {
                action: Box::new(action),
                title: title.into(),
                description: description.into(),
                category: category.into(),
            },
            shortcut_hint: None,
        }
    }

    pub fn title(&self) -> &str {
        match &self.source {
            CommandSource::Static(id) => id.title(),
            CommandSource::Dynamic { title, .. } => title,
        }
    }

    pub fn description(&self) -> &str {
        match &self.source {
            CommandSource::Static(id) => id.description(),
            CommandSource::Dynamic { description, .. } => description,
        }
    }

    pub fn category(&self) -> &str {
        match &self.source {
            CommandSource::Static(id) => id.category(),
            CommandSource::Dynamic { category, .. } => category,
        }
    }

    /// Get the action to dispatch
    pub fn to_action(&self) -> Action {
        match &self.source {
            CommandSource::Static(id) => id.to_action(),
            CommandSource::Dynamic { action, .. } => (**action).clone(),
        }
    }
}

/// Static palette commands with shortcut hints from the keymap
pub fn get_palette_commands_with_hints(keymap: &Keymap) -> Vec<Command> {
    CommandId::palette_command_ids()
        .into_iter()
        .map(|id| match keymap.compact_hint_for_command(id) {
            Some(hint) => Command::with_shortcut(id, hint),
            None => Command::new(id),
        })
        .collect()
}

/// One "Switch to Output" command per selector option, in selector order
///
/// Duplicate labels produce duplicate entries; every one of them resolves
/// the same way the selector resolves the label.
pub fn get_channel_switch_commands(selector: &SelectorProjection) -> Vec<Command> {
    selector
        .sorted_labels
        .iter()
        .map(|label| {
            Command::dynamic(
                Action::OutputPanel(OutputPanelAction::SelectOption(label.clone())),
                format!("Switch to Output: {}", label),
                format!("Show the {} channel in the output panel", label),
                "Output",
            )
        })
        .collect()
}

/// Everything the command palette offers for the current state
pub fn get_all_commands(state: &AppState) -> Vec<Command> {
    let mut commands = get_palette_commands_with_hints(&state.keymap);
    commands.extend(get_channel_switch_commands(&state.output_panel.selector));
    commands
}

/// Filter commands based on a search query
///
/// Case-insensitive substring match on title, description, and category.
pub fn filter_commands(commands: &[Command], query: &str) -> Vec<Command> {
    if query.is_empty() {
        return commands.to_vec();
    }

    let query_lower = query.to_lowercase();
    commands
        .iter()
        .filter(|cmd| {
            cmd.title().to_lowercase().contains(&query_lower)
                || cmd.description().to_lowercase().contains(&query_lower)
                || cmd.category().to_lowercase().contains(&query_lower)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keymap::default_keymap;

    fn projection(labels: &[&str]) -> SelectorProjection {
        SelectorProjection {
            sorted_labels: labels.iter().map(|l| l.to_string()).collect(),
            selected_index: 0,
        }
    }

    #[test]
    fn test_hints_come_from_keymap() {
        let commands = get_palette_commands_with_hints(&default_keymap());
        let close = commands
            .iter()
            .find(|cmd| cmd.title() == "Close")
            .unwrap();

        assert_eq!(close.shortcut_hint.as_deref(), Some("q/Esc"));
    }

    #[test]
    fn test_switch_commands_follow_selector_order() {
        let commands = get_channel_switch_commands(&projection(&["Ant", "Build", "Build"]));
        let titles: Vec<&str> = commands.iter().map(Command::title).collect();

        assert_eq!(
            titles,
            vec![
                "Switch to Output: Ant",
                "Switch to Output: Build",
                "Switch to Output: Build",
            ]
        );
        assert!(matches!(
            commands[0].to_action(),
            Action::OutputPanel(OutputPanelAction::SelectOption(ref label)) if label == "Ant"
        ));
    }

    #[test]
    fn test_filter_matches_dynamic_titles() {
        let mut state = AppState::default();
        state.output_panel.selector = projection(&["Build", "Tasks"]);
        let commands = get_all_commands(&state);

        let filtered = filter_commands(&commands, "tasks");

        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].title(), "Switch to Output: Tasks");
    }

    #[test]
    fn test_empty_query_keeps_everything() {
        let state = AppState::default();
        let commands = get_all_commands(&state);

        assert_eq!(filter_commands(&commands, "").len(), commands.len());
    }
}
