//! Unified event loop that merges crossterm terminal events, API worker
//! events, and a fixed-rate tick into a single async stream.
//!
//! The TUI main loop `select!`s over `EventHandler::next()` to process all
//! three sources without blocking the render path.

use std::time::Duration;

use color_eyre::Result;
use crossterm::event::{
    Event as CrosstermEvent, EventStream, KeyEvent, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::api::types::ApiEvent;

/// Unified event type consumed by the TUI main loop.
#[derive(Debug)]
pub enum Event {
    /// A key was pressed (only `Press` kind — ignores release/repeat on
    /// platforms that emit them).
    Key(KeyEvent),
    /// A left mouse button press (movement and drag are ignored).
    Mouse(MouseEvent),
    /// Terminal was resized.
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Animation / state tick.
    Tick,
    /// An event from the API worker task.
    Api(ApiEvent),
}

/// Multiplexes crossterm events, a tick timer, and the API event channel
/// into a single `Event` stream.
pub struct EventHandler {
    /// Async crossterm event reader.
    crossterm_stream: EventStream,
    /// Tick interval for animations.
    tick_interval: tokio::time::Interval,
    /// Receiver end of the API worker → UI channel.
    api_rx: mpsc::Receiver<ApiEvent>,
}

impl EventHandler {
    pub fn new(api_rx: mpsc::Receiver<ApiEvent>) -> Self {
        let tick_ms = crate::config::get().general.tick_rate_ms;
        let mut tick_interval = tokio::time::interval(Duration::from_millis(tick_ms));
        // Don't try to "catch up" missed ticks — just keep going.
        tick_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        Self {
            crossterm_stream: EventStream::new(),
            tick_interval,
            api_rx,
        }
    }

    /// Await the next event from any source. Returns `None` only when all
    /// sources are exhausted (which shouldn't happen during normal operation).
    pub async fn next(&mut self) -> Result<Event> {
        loop {
            tokio::select! {
                // ── API events (highest priority) ───────────────────────
                Some(api_event) = self.api_rx.recv() => {
                    return Ok(Event::Api(api_event));
                }

                // ── Terminal events ─────────────────────────────────────
                Some(ct_result) = self.crossterm_stream.next() => {
                    match ct_result? {
                        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                            return Ok(Event::Key(key));
                        }
                        CrosstermEvent::Mouse(mouse)
                            if mouse.kind == MouseEventKind::Down(MouseButton::Left) =>
                        {
                            return Ok(Event::Mouse(mouse));
                        }
                        CrosstermEvent::Resize(w, h) => return Ok(Event::Resize(w, h)),
                        // Swallow key release/repeat and mouse movement — loop
                        // again instead of emitting a Tick that would trigger
                        // a redraw.
                        _ => continue,
                    }
                }

                // ── Tick timer ──────────────────────────────────────────
                _ = self.tick_interval.tick() => {
                    return Ok(Event::Tick);
                }
            }
        }
    }
}
