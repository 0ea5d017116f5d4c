mod common;

use common::*;
use crossterm::event::KeyCode;
use navstack::ui::app::App;
use navstack::ui::input::handle_key;
use navstack::ui::render::draw;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|frame| draw(frame, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                out.push_str(cell.symbol());
            }
        }
        out.push('\n');
    }
    out
}

#[test]
fn screen_a_shows_prompt_and_typed_text() {
    let mut app = make_app();
    type_text(&mut app, "hello");

    let screen = render(&app, 80, 20);
    assert!(screen.contains("Screen A"));
    assert!(screen.contains("Type some text"));
    assert!(screen.contains("hello"));
    assert!(screen.contains("5 characters"));
}

#[test]
fn screen_b_shows_submitted_text() {
    let mut app = make_app();
    type_text(&mut app, "hello");
    handle_key(&mut app, press_key(KeyCode::Enter));

    let screen = render(&app, 80, 20);
    assert!(screen.contains("You entered:"));
    assert!(screen.contains("hello"));
    assert!(screen.contains("Screen A  ›  Screen B"));
}

#[test]
fn screen_b_with_empty_text_shows_placeholder() {
    let mut app = make_app();
    handle_key(&mut app, press_key(KeyCode::Enter));

    let screen = render(&app, 80, 20);
    assert!(screen.contains("(nothing)"));
}

#[test]
fn back_renders_screen_a_with_preserved_text() {
    let mut app = make_app();
    type_text(&mut app, "kept");
    handle_key(&mut app, press_key(KeyCode::Enter));
    handle_key(&mut app, press_key(KeyCode::Esc));

    let screen = render(&app, 80, 20);
    assert!(screen.contains("Type some text"));
    assert!(screen.contains("kept"));
    assert!(!screen.contains("You entered:"));
}

#[test]
fn transition_frames_render_without_panicking() {
    let config = navstack::config::UiConfig {
        transition_frames: 3,
        ..Default::default()
    };
    let mut app = App::new(navstack::navigation::ComponentContext::root(None), &config);
    type_text(&mut app, "slide");
    handle_key(&mut app, press_key(KeyCode::Enter));
    assert!(app.is_animating());

    while app.is_animating() {
        render(&app, 40, 12);
        app.on_tick();
    }
    assert!(render(&app, 40, 12).contains("slide"));
}

#[test]
fn input_wider_than_u16_renders() {
    let app = make_app();
    with_screen_a(&app.active_screen(), |a| a.update_text("x".repeat(70_000)));

    let screen = render(&app, 80, 20);
    assert!(screen.contains("70000 characters"));
}

#[test]
fn tiny_terminal_does_not_panic() {
    let app = make_app();
    render(&app, 3, 2);
}
