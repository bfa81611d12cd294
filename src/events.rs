//! Event types and the main event loop driver for Reelspot.
//!
//! This module defines the [`Event`] enum (keyboard input, ticks, search
//! completions and the location result) and the [`EventHandler`], which runs
//! a background task that polls crossterm for key events and emits periodic
//! [`Event::Tick`]s. The main loop in `main.rs` receives events via
//! [`EventHandler::next`] and the search and location tasks send events via
//! [`EventHandler::tx`].

use crate::errors::{LocationError, SearchError};
use crate::models::{LocationFix, MovieRecord};
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::error;

/// Events processed by the application event loop.
///
/// The main loop in `main.rs` matches on these to update [`App`](crate::app::App) state.
#[derive(Debug)]
pub enum Event {
    /// Periodic tick used for UI refresh.
    Tick,
    /// User key press from the terminal.
    Input(KeyEvent),
    /// A search task resolved.
    SearchFinished {
        /// Sequence number handed out when the search was submitted.
        seq: u64,
        result: Result<MovieRecord, SearchError>,
    },
    /// The startup location task resolved.
    LocationResolved(Result<LocationFix, LocationError>),
    /// Terminal input can no longer be read; the app should shut down.
    TerminalLost,
}

/// Multiplexes terminal input and ticks into a single event stream.
///
/// Holds an unbounded channel: the sender ([`tx`](EventHandler::tx)) can be
/// cloned and given to other tasks, while the receiver is consumed by
/// [`next`](EventHandler::next) in the main loop.
pub struct EventHandler {
    /// Sender for posting events from search and location tasks.
    pub tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    /// Creates a new event handler and spawns the input/tick task.
    ///
    /// The spawned task polls crossterm with a timeout of `tick_rate_ms`. On a
    /// poll or read failure it logs the error, sends [`Event::TerminalLost`]
    /// and exits. The handler keeps its own sender, so the channel never
    /// closes and [`next`](EventHandler::next) does not return `None` on its
    /// own.
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        tokio::spawn(async move {
            let tick_rate = Duration::from_millis(tick_rate_ms);
            let mut last_tick = Instant::now();
            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::from_secs(0));
                match event::poll(timeout) {
                    Ok(true) => match event::read() {
                        // Windows reports releases too; only act on presses.
                        Ok(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
                            if event_tx.send(Event::Input(key)).is_err() {
                                break;
                            }
                        }
                        Ok(_) => {}
                        Err(e) => {
                            error!("Terminal read failed: {}", e);
                            let _ = event_tx.send(Event::TerminalLost);
                            break;
                        }
                    },
                    Ok(false) => {}
                    Err(e) => {
                        error!("Terminal poll failed: {}", e);
                        let _ = event_tx.send(Event::TerminalLost);
                        break;
                    }
                }
                if last_tick.elapsed() >= tick_rate {
                    if event_tx.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { tx, rx }
    }

    /// Receives the next event from the channel.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
