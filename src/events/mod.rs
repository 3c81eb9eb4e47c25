//! Event handling for the application.
//!
//! This module turns terminal input into application events and maps keys to
//! table actions.

mod handler;
mod keys;

use crossterm::event::KeyEvent;

pub use handler::EventHandler;
pub use keys::{Action, KeyBindings};

/// An application event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// The left mouse button went down at a terminal cell.
    Click {
        /// Column (x) of the cell.
        x: u16,
        /// Row (y) of the cell.
        y: u16,
    },
    /// The mouse wheel moved; positive is down.
    Scroll(i8),
    /// The terminal was resized.
    Resize(u16, u16),
    /// No input within the tick rate.
    Tick,
}
