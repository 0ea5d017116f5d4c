//! The application's screens and the root controller that navigates between
//! them.

pub mod screen_a;
pub mod screen_b;

use serde::{Deserialize, Serialize};

use crate::navigation::{
    ChildStack, ChildStackController, ComponentContext, StackNavigation, Value,
};
use crate::screens::screen_a::ScreenAController;
use crate::screens::screen_b::ScreenBController;

/// State-keeper key of the screen stack.
pub const SCREEN_STACK_KEY: &str = "screen_stack";

/// Navigable destinations and their parameters.
///
/// Serialized as `{"screen":"ScreenA"}` / `{"screen":"ScreenB","text":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen")]
pub enum ScreenConfiguration {
    ScreenA,
    ScreenB { text: String },
}

impl ScreenConfiguration {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ScreenA => "Screen A",
            Self::ScreenB { .. } => "Screen B",
        }
    }
}

/// Controller instance for one stack entry.
#[derive(Debug)]
pub enum Screen {
    ScreenA(ScreenAController),
    ScreenB(ScreenBController),
}

pub type ScreenStack = ChildStack<ScreenConfiguration, Screen>;

/// Root of the component tree. Owns the screen stack.
pub struct RootController {
    context: ComponentContext,
    navigation: StackNavigation<ScreenConfiguration>,
    stack: ChildStackController<ScreenConfiguration, Screen>,
}

impl RootController {
    /// `on_exit` is called when back is pressed on the last remaining screen.
    pub fn new(context: ComponentContext, on_exit: impl Fn() + 'static) -> Self {
        let navigation = StackNavigation::new();
        let factory_navigation = navigation.clone();
        let stack = ChildStackController::new(
            &context,
            &navigation,
            SCREEN_STACK_KEY,
            ScreenConfiguration::ScreenA,
            move |configuration, child_context| {
                create_screen(configuration, child_context, &factory_navigation)
            },
            on_exit,
        );
        Self {
            context,
            navigation,
            stack,
        }
    }

    pub fn screen_stack(&self) -> Value<ScreenStack> {
        self.stack.stack()
    }

    pub fn configurations(&self) -> Vec<ScreenConfiguration> {
        self.stack.configurations()
    }

    pub fn push(&self, configuration: ScreenConfiguration) {
        self.navigation.push(configuration);
    }

    pub fn pop(&self) {
        self.navigation.pop();
    }

    /// System back: pops, or signals exit on the last screen.
    pub fn on_back_pressed(&self) {
        self.pop();
    }

    pub fn context(&self) -> &ComponentContext {
        &self.context
    }

    pub fn stack_controller(&self) -> &ChildStackController<ScreenConfiguration, Screen> {
        &self.stack
    }
}

fn create_screen(
    configuration: ScreenConfiguration,
    context: ComponentContext,
    navigation: &StackNavigation<ScreenConfiguration>,
) -> Screen {
    match configuration {
        ScreenConfiguration::ScreenA => {
            let navigation = navigation.clone();
            Screen::ScreenA(ScreenAController::new(context, move |text| {
                navigation.push(ScreenConfiguration::ScreenB { text });
            }))
        }
        ScreenConfiguration::ScreenB { text } => {
            let navigation = navigation.clone();
            Screen::ScreenB(ScreenBController::new(text, context, move || {
                navigation.pop();
            }))
        }
    }
}
