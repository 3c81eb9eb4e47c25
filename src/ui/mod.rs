//! User interface components.
//!
//! This module contains the terminal rendering of a sortable table and the
//! status bar below it.

mod components;
pub mod theme;

pub use components::{StatusBar, StatusKind, StatusMessage, TableView};
pub use theme::Theme;
