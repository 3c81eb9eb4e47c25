//! tablesort - click-to-sort tables in the terminal
//!
//! A [`TableSorter`](sort::TableSorter) binds to one [`Table`](table::Table)
//! and sorts its body rows whenever a header cell is activated. Header cells
//! name their comparator through a class token such as `sort-numeric`.

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod sort;
pub mod table;
pub mod ui;
