//! Options recognized by [`TableSorter`](super::TableSorter).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::SortDirection;

/// Default class prefix for sort-method and direction tokens.
pub const DEFAULT_PREFIX: &str = "sort-";

/// Sorter options.
///
/// Comparators and hooks cannot be expressed in a config file, so they are
/// registered on the [`TableSorterBuilder`](super::TableSorterBuilder).
/// `method_aliases` is the file-friendly way to extend the registry: each
/// entry names a new method after an existing one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Class prefix. A missing trailing `-` is added.
    pub prefix: String,
    /// Direction a column takes on its first activation.
    pub order: SortDirection,
    /// Column to sort once right after initialization.
    pub auto_sort: Option<usize>,
    /// Columns that never sort. Negative values count from the end.
    pub exclude_sort_columns: Vec<isize>,
    /// Promote the first body row to the header before binding.
    pub fix_table_head: bool,
    /// Extra method names mapped to existing methods.
    pub method_aliases: BTreeMap<String, String>,
}

impl Default for SortOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            order: SortDirection::Ascending,
            auto_sort: None,
            exclude_sort_columns: Vec::new(),
            fix_table_head: false,
            method_aliases: BTreeMap::new(),
        }
    }
}

impl SortOptions {
    /// Return the options with the prefix ending in `-`.
    pub fn normalized(mut self) -> Self {
        if !self.prefix.ends_with('-') {
            self.prefix.push('-');
        }
        self
    }

    /// Check whether `column` is excluded in a table of `columns` columns.
    pub fn is_excluded(&self, column: usize, columns: usize) -> bool {
        self.exclude_sort_columns.iter().any(|&value| {
            let resolved = if value < 0 {
                columns as isize + value
            } else {
                value
            };
            resolved >= 0 && resolved as usize == column
        })
    }
}
