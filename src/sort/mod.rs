//! Click-to-sort logic for tables.
//!
//! This module provides:
//! - Sort directions and per-column sort state
//! - A registry of named comparators with the built-in methods
//! - The table sorter that handles header activations

mod algorithm;
mod direction;
mod error;
mod methods;
mod options;
mod sorter;

pub use algorithm::stable_sort_by;
pub use direction::{SortDirection, SortState};
pub use error::{Result, SortError};
pub use methods::{
    compare_alphabetical, compare_date, compare_float, compare_numeric, parse_date,
    parse_float_prefix, parse_int_prefix, BuiltinMethod, Comparator, SortMethodRegistry,
};
pub use options::{SortOptions, DEFAULT_PREFIX};
pub use sorter::{Activation, IgnoreReason, SortHook, TableSorter, TableSorterBuilder};
