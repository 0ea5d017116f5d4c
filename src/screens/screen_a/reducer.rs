use crate::screens::screen_a::intent::ScreenAIntent;
use crate::screens::screen_a::state::ScreenAState;
use crate::ui::mvi::Reducer;

pub struct ScreenAReducer;

impl Reducer for ScreenAReducer {
    type State = ScreenAState;
    type Intent = ScreenAIntent;

    fn reduce(state: Self::State, intent: Self::Intent) -> Self::State {
        match intent {
            ScreenAIntent::UpdateText { text } => ScreenAState { text },
            ScreenAIntent::InsertChar(ch) => {
                let mut text = state.text;
                text.push(ch);
                ScreenAState { text }
            }
            ScreenAIntent::DeleteChar => {
                let mut text = state.text;
                text.pop();
                ScreenAState { text }
            }
            // Navigation side effect, handled by the controller.
            ScreenAIntent::Submit => state,
        }
    }
}
