use crate::screens::screen_a::ScreenAIntent;
use crate::screens::Screen;
use crate::ui::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if is_ctrl_char(key, 'q') || is_ctrl_char(key, 'c') {
        app.request_quit();
        return;
    }

    // Held outside the view borrow: intents may navigate synchronously.
    let screen = app.active_screen();
    match screen.as_ref() {
        Screen::ScreenA(controller) => match key.code {
            KeyCode::Enter => controller.on_intent(ScreenAIntent::Submit),
            KeyCode::Backspace => controller.on_intent(ScreenAIntent::DeleteChar),
            KeyCode::Esc => app.root().on_back_pressed(),
            KeyCode::Char(ch) if !has_command_modifier(key) => {
                controller.on_intent(ScreenAIntent::InsertChar(ch))
            }
            _ => {}
        },
        Screen::ScreenB(controller) => match key.code {
            KeyCode::Esc | KeyCode::Backspace | KeyCode::Left => controller.back(),
            _ => {}
        },
    }
}

fn has_command_modifier(key: KeyEvent) -> bool {
    key.modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER)
}

fn is_ctrl_char(key: KeyEvent, needle: char) -> bool {
    matches!(key.code, KeyCode::Char(ch) if ch.eq_ignore_ascii_case(&needle))
        && key.modifiers.contains(KeyModifiers::CONTROL)
}
