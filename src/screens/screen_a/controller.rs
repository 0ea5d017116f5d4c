use std::fmt;

use crate::navigation::{ComponentContext, MutableValue, Value};
use crate::screens::screen_a::intent::ScreenAIntent;
use crate::screens::screen_a::reducer::ScreenAReducer;
use crate::screens::screen_a::state::ScreenAState;
use crate::ui::mvi::Reducer;

const STATE_KEY: &str = "screen_a";

/// State holder for the text-entry screen.
pub struct ScreenAController {
    context: ComponentContext,
    state: MutableValue<ScreenAState>,
    on_submit: Box<dyn Fn(String)>,
}

impl ScreenAController {
    /// `on_submit` receives the current text when the user submits. The
    /// controller never navigates by itself.
    pub fn new(context: ComponentContext, on_submit: impl Fn(String) + 'static) -> Self {
        let restored = match context.state_keeper().consume::<ScreenAState>(STATE_KEY) {
            Ok(restored) => restored.unwrap_or_default(),
            Err(err) => {
                tracing::warn!(context = context.key(), error = %err, "ignoring saved text");
                ScreenAState::default()
            }
        };
        let state = MutableValue::new(restored);

        let saved = state.as_value();
        context
            .state_keeper()
            .register(STATE_KEY, move || saved.value());

        Self {
            context,
            state,
            on_submit: Box::new(on_submit),
        }
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn state(&self) -> Value<ScreenAState> {
        self.state.as_value()
    }

    pub fn text(&self) -> String {
        self.state.value().text
    }

    pub fn on_intent(&self, intent: ScreenAIntent) {
        match intent {
            ScreenAIntent::Submit => {
                let text = self.text();
                tracing::debug!(chars = text.chars().count(), "screen A submit");
                (self.on_submit)(text);
            }
            intent => self
                .state
                .update(|state| ScreenAReducer::reduce(state, intent)),
        }
    }

    pub fn update_text(&self, text: impl Into<String>) {
        self.on_intent(ScreenAIntent::UpdateText { text: text.into() });
    }

    pub fn submit(&self) {
        self.on_intent(ScreenAIntent::Submit);
    }
}

impl fmt::Debug for ScreenAController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenAController")
            .field("context", &self.context.key())
            .field("state", &self.state.value())
            .finish()
    }
}
