//! Table document model.
//!
//! This module provides the table that sorting operates on:
//! - Cells with class-token lists
//! - A header section and body rows with stable identity
//! - Loading from JSON, TOML, or delimited text

mod class_list;
mod document;
mod loader;

pub use class_list::ClassList;
pub use document::{Cell, Row, RowId, Table};
pub use loader::{load, parse_delimited, render_plain, CellRepr, TableDocument, TableError};
