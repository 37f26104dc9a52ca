use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    /// No input arrived within the tick rate; a chance to poll the clock and redraw.
    Tick,
    Resize,
}

/// Reads terminal events on a background thread and hands them to the UI
/// loop one at a time.
pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    stop: Arc<AtomicBool>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let stop = Arc::new(AtomicBool::new(false));
        let reader_stop = Arc::clone(&stop);

        thread::spawn(move || {
            while !reader_stop.load(Ordering::Relaxed) {
                let event = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        // Terminals with enhanced keyboard reporting also send releases.
                        Ok(Event::Key(key)) if key.kind != KeyEventKind::Release => {
                            AppEvent::Key(key)
                        }
                        Ok(Event::Resize(_, _)) => AppEvent::Resize,
                        _ => continue,
                    }
                } else {
                    AppEvent::Tick
                };
                if tx.send(event).is_err() {
                    return;
                }
            }
        });

        Self { rx, stop }
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}

impl Drop for EventHandler {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
