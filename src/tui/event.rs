//! Event handling for the TUI.
//!
//! A separate thread polls for terminal events and timer ticks and forwards
//! them into an async channel consumed by the single-threaded app loop.

use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

/// Application events.
#[derive(Debug)]
pub enum Event {
    /// Timer tick, fires when no input arrived within the tick rate.
    Tick,
    /// Keyboard input.
    Key(KeyEvent),
    /// Terminal resize.
    Resize,
}

/// Polls terminal events on a dedicated thread.
pub struct EventHandler {
    rx: UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Spawns the polling thread with the given tick rate.
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = unbounded_channel();

        thread::spawn(move || {
            loop {
                let sent = if event::poll(tick_rate).unwrap_or(false) {
                    match event::read() {
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            tx.send(Event::Key(key))
                        }
                        Ok(CrosstermEvent::Resize(_, _)) => tx.send(Event::Resize),
                        Ok(_) => continue,
                        Err(_) => break,
                    }
                } else {
                    tx.send(Event::Tick)
                };
                if sent.is_err() {
                    // Receiver gone, app is shutting down.
                    break;
                }
            }
        });

        Self { rx }
    }

    /// Receives the next event. `None` means the polling thread exited.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
