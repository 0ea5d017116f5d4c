use std::fmt;

use crate::navigation::ComponentContext;

/// State holder for the screen that displays the submitted text.
pub struct ScreenBController {
    text: String,
    context: ComponentContext,
    on_back: Box<dyn Fn()>,
}

impl ScreenBController {
    pub fn new(
        text: impl Into<String>,
        context: ComponentContext,
        on_back: impl Fn() + 'static,
    ) -> Self {
        Self {
            text: text.into(),
            context,
            on_back: Box::new(on_back),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn back(&self) {
        (self.on_back)();
    }
}

impl fmt::Debug for ScreenBController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScreenBController")
            .field("context", &self.context.key())
            .field("text", &self.text)
            .finish()
    }
}
