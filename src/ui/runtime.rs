use crate::config::UiConfig;
use crate::ui::app::{App, ExitReason};
use crate::ui::events::{AppEvent, EventHandler};
use crate::ui::input::handle_key;
use crate::ui::render::draw;
use crate::ui::terminal_guard::TerminalGuard;
use std::io;
use std::sync::mpsc::RecvTimeoutError;

/// Run the UI until the user quits or backs out of the last screen.
///
/// The caller owns `app` and collects its state after this returns, before
/// dropping it.
pub fn run(app: &mut App, config: &UiConfig) -> io::Result<ExitReason> {
    let mut guard = TerminalGuard::enter()?;
    let events = EventHandler::new(config.tick_rate());
    tracing::info!(stack = ?app.root().configurations(), "ui started");

    loop {
        guard.terminal_mut().draw(|frame| draw(frame, app))?;
        if app.should_quit() {
            break;
        }

        let wait = if app.is_animating() {
            config.frame_rate()
        } else {
            config.tick_rate()
        };
        match events.next(wait) {
            Ok(AppEvent::Key(key)) => handle_key(app, key),
            Ok(AppEvent::Tick) => app.on_tick(),
            // The next draw picks up the new size.
            Ok(AppEvent::Resize(cols, rows)) => tracing::debug!(cols, rows, "terminal resized"),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
        events.set_tick_rate(if app.is_animating() {
            config.frame_rate()
        } else {
            config.tick_rate()
        });
    }

    let reason = app.exit_reason();
    tracing::info!(?reason, stack = ?app.root().configurations(), "ui stopped");
    drop(events);
    drop(guard);
    Ok(reason)
}
