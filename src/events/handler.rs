//! Event handler implementation.
//!
//! Polls for terminal events and converts them to application events.

use std::time::Duration;

use crossterm::event::{
    self, Event as CrosstermEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};

use super::Event;

/// The tick rate for the event loop in milliseconds.
const TICK_RATE_MS: u64 = 100;

/// Handles application events by polling crossterm for terminal events.
pub struct EventHandler {
    /// The tick rate duration.
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler with the default tick rate.
    pub fn new() -> Self {
        Self::with_tick_rate(TICK_RATE_MS)
    }

    /// Create a new event handler with a custom tick rate.
    pub fn with_tick_rate(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Poll for the next event.
    ///
    /// Blocks until an event is available or the tick rate elapses.
    pub fn next(&self) -> std::io::Result<Event> {
        if event::poll(self.tick_rate)? {
            Ok(convert(event::read()?))
        } else {
            Ok(Event::Tick)
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a crossterm event; anything the table view ignores becomes a tick.
fn convert(event: CrosstermEvent) -> Event {
    match event {
        // Key release/repeat events are reported on some platforms only.
        CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Event::Key(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse(mouse),
        CrosstermEvent::Resize(width, height) => Event::Resize(width, height),
        _ => Event::Tick,
    }
}

fn convert_mouse(mouse: MouseEvent) -> Event {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Event::Click {
            x: mouse.column,
            y: mouse.row,
        },
        MouseEventKind::ScrollDown => Event::Scroll(1),
        MouseEventKind::ScrollUp => Event::Scroll(-1),
        _ => Event::Tick,
    }
}
