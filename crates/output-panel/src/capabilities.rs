use bitflags::bitflags;

bitflags! {
    /// What the focused part of the UI does with keys
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PanelCapabilities: u8 {
        /// Printable keys are typed into a text field instead of running commands
        const TEXT_INPUT = 0b0001;
        /// Scroll keys move a viewport
        const SCROLL_VERTICAL = 0b0010;
    }
}

impl PanelCapabilities {
    pub fn accepts_text_input(self) -> bool {
        self.contains(Self::TEXT_INPUT)
    }

    pub fn scrolls(self) -> bool {
        self.contains(Self::SCROLL_VERTICAL)
    }
}
