//! Global actions
//!
//! Actions that are not tied to a specific part of the UI.

use ratatui::crossterm::event::KeyEvent;

#[derive(Debug, Clone)]
pub enum GlobalAction {
    /// Raw key press, translated by the keyboard middleware
    KeyPressed(KeyEvent),
    /// Close the top-most overlay, or quit when nothing is open
    Close,
    /// Quit the application
    Quit,
}
