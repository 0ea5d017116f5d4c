use crossterm::event::{self, Event, KeyEvent};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    Tick,
}

/// Reads terminal input on a background thread and forwards it, with
/// periodic ticks, to the UI thread.
pub struct EventHandler {
    rx: Receiver<AppEvent>,
    tick_rate_ms: Arc<AtomicU64>,
    stop: Arc<AtomicBool>,
    reader: Option<JoinHandle<()>>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate_ms = Arc::new(AtomicU64::new(duration_ms(tick_rate)));
        let stop = Arc::new(AtomicBool::new(false));

        let thread_tick = Arc::clone(&tick_rate_ms);
        let thread_stop = Arc::clone(&stop);
        let reader = thread::Builder::new()
            .name("input-reader".to_string())
            .spawn(move || {
                let mut last_tick = Instant::now();
                while !thread_stop.load(Ordering::Relaxed) {
                    let tick_rate = Duration::from_millis(thread_tick.load(Ordering::Relaxed));
                    // Short poll timeout so the stop flag is checked frequently
                    let timeout = tick_rate
                        .saturating_sub(last_tick.elapsed())
                        .min(Duration::from_millis(50));

                    let forwarded = match event::poll(timeout) {
                        Ok(true) => match event::read() {
                            Ok(Event::Key(key)) => tx.send(AppEvent::Key(key)).is_ok(),
                            Ok(Event::Resize(cols, rows)) => {
                                tx.send(AppEvent::Resize(cols, rows)).is_ok()
                            }
                            Ok(_) => true,
                            Err(err) => {
                                tracing::error!(error = %err, "terminal read failed");
                                false
                            }
                        },
                        Ok(false) => true,
                        Err(err) => {
                            tracing::error!(error = %err, "terminal poll failed");
                            false
                        }
                    };
                    if !forwarded {
                        break;
                    }

                    if last_tick.elapsed() >= tick_rate {
                        if tx.send(AppEvent::Tick).is_err() {
                            break;
                        }
                        last_tick = Instant::now();
                    }
                }
            });

        let reader = match reader {
            Ok(handle) => Some(handle),
            Err(err) => {
                tracing::error!(error = %err, "failed to spawn input reader");
                None
            }
        };

        Self {
            rx,
            tick_rate_ms,
            stop,
            reader,
        }
    }

    pub fn next(&self, timeout: Duration) -> Result<AppEvent, mpsc::RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }

    /// Faster ticks while animating, slower when idle.
    pub fn set_tick_rate(&self, tick_rate: Duration) {
        self.tick_rate_ms
            .store(duration_ms(tick_rate), Ordering::Relaxed);
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(reader) = self.reader.take() {
            let _ = reader.join();
        }
    }
}

fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX).max(1)
}
