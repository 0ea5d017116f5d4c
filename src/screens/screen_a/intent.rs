use crate::ui::mvi::Intent;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenAIntent {
    /// Replace the whole text buffer.
    UpdateText { text: String },
    InsertChar(char),
    DeleteChar,
    /// Advance to the next screen with the current text.
    Submit,
}

impl Intent for ScreenAIntent {}
