//! Terminal session for the UI: raw mode, the alternate screen and a bar
//! cursor for the Screen A input field.
//!
//! Everything is undone when the guard drops, and from the panic hook if the
//! UI thread panics while the session is active.

use std::io::{self, Stdout};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Once;

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

pub type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Set between a successful `enter` and the matching restore.
static SESSION_ACTIVE: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK: Once = Once::new();

/// Owns the terminal for the lifetime of the UI.
///
/// The cursor is only visible while a frame places it (Screen A's input
/// field); ratatui hides it on every other frame.
pub struct TerminalGuard {
    terminal: CrosstermTerminal,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();
        enable_raw_mode()?;
        SESSION_ACTIVE.store(true, Ordering::SeqCst);

        match Self::open() {
            Ok(guard) => Ok(guard),
            Err(err) => {
                restore_terminal();
                Err(err)
            }
        }
    }

    fn open() -> io::Result<Self> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, SetCursorStyle::SteadyBar)?;
        let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        terminal.hide_cursor()?;
        terminal.clear()?;
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut CrosstermTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore_terminal();
    }
}

/// Leave raw mode and the alternate screen. Only the first call after
/// `enter` has an effect.
fn restore_terminal() {
    if !SESSION_ACTIVE.swap(false, Ordering::SeqCst) {
        return;
    }
    let _ = disable_raw_mode();
    let _ = execute!(
        io::stdout(),
        SetCursorStyle::DefaultUserShape,
        LeaveAlternateScreen,
        Show
    );
}

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            restore_terminal();
            default_hook(info);
        }));
    });
}
