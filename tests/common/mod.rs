//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use navstack::config::UiConfig;
use navstack::navigation::{ComponentContext, SavedState};
use navstack::screens::screen_a::ScreenAController;
use navstack::screens::screen_b::ScreenBController;
use navstack::screens::{RootController, Screen, ScreenConfiguration};
use navstack::ui::app::App;
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

/// Root controller plus a counter of exit signals.
pub fn make_root() -> (RootController, Rc<Cell<u32>>) {
    make_root_with(None)
}

pub fn make_root_with(restored: Option<SavedState>) -> (RootController, Rc<Cell<u32>>) {
    let exits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&exits);
    let root = RootController::new(ComponentContext::root(restored), move || {
        counter.set(counter.get() + 1)
    });
    (root, exits)
}

/// App without slide animation so every change is visible immediately.
pub fn make_app() -> App {
    let config = UiConfig {
        transition_frames: 0,
        ..UiConfig::default()
    };
    App::new(ComponentContext::root(None), &config)
}

pub fn active(root: &RootController) -> Rc<Screen> {
    Rc::clone(&root.screen_stack().value().active.instance)
}

pub fn with_screen_a<R>(screen: &Screen, f: impl FnOnce(&ScreenAController) -> R) -> R {
    match screen {
        Screen::ScreenA(controller) => f(controller),
        other => panic!("expected Screen A, got {other:?}"),
    }
}

pub fn with_screen_b<R>(screen: &Screen, f: impl FnOnce(&ScreenBController) -> R) -> R {
    match screen {
        Screen::ScreenB(controller) => f(controller),
        other => panic!("expected Screen B, got {other:?}"),
    }
}

pub fn screen_b(text: &str) -> ScreenConfiguration {
    ScreenConfiguration::ScreenB {
        text: text.to_string(),
    }
}

pub fn press_key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

pub fn ctrl_key(ch: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
}

pub fn type_text(app: &mut App, text: &str) {
    for ch in text.chars() {
        navstack::ui::input::handle_key(app, press_key(KeyCode::Char(ch)));
    }
}

/// Any configuration, including empty and non-ASCII Screen B text.
pub fn configuration() -> impl Strategy<Value = ScreenConfiguration> {
    prop_oneof![
        Just(ScreenConfiguration::ScreenA),
        ".{0,12}".prop_map(|text| ScreenConfiguration::ScreenB { text }),
    ]
}
