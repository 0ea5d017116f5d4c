use serde::{Deserialize, Serialize};

use crate::ui::mvi::UiState;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScreenAState {
    pub text: String,
}

impl UiState for ScreenAState {}

impl ScreenAState {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
