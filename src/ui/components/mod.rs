//! Reusable UI components.

mod status_bar;
mod table;

pub use status_bar::{StatusBar, StatusKind, StatusMessage};
pub use table::TableView;
