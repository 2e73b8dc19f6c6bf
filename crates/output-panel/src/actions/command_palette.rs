//! Command palette actions

#[derive(Debug, Clone)]
pub enum CommandPaletteAction {
    Open,
    Close,
    /// Character typed into the search field
    InsertChar(char),
    /// Delete the last character of the query
    Backspace,
    NavigateNext,
    NavigatePrevious,
    /// Run the selected command and close the palette
    Execute,
}
