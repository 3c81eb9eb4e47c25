//! Sort direction and per-column sort state.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The direction a column is sorted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    #[serde(rename = "asc", alias = "ascending")]
    Ascending,
    /// Largest first.
    #[serde(rename = "desc", alias = "descending")]
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn toggled(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Suffix used for the header class marker (`<prefix>asc`).
    pub fn marker(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    /// Apply this direction to a comparator result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }

    /// Arrow shown next to a sorted header.
    pub fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Ascending),
            "desc" | "descending" => Ok(Self::Descending),
            other => Err(format!(
                "unknown sort order '{}', expected 'asc' or 'desc'",
                other
            )),
        }
    }
}

/// Per-column sort directions of one table.
///
/// A column has no entry until it has been sorted once. Each column keeps its
/// own last direction, independently of which column was sorted last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    directions: HashMap<usize, SortDirection>,
    last_sorted: Option<usize>,
}

impl SortState {
    /// Create an empty state where every column is unsorted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current direction of a column, `None` while unsorted.
    pub fn direction(&self, column: usize) -> Option<SortDirection> {
        self.directions.get(&column).copied()
    }

    /// The column sorted most recently.
    pub fn last_sorted(&self) -> Option<usize> {
        self.last_sorted
    }

    /// Advance a column's state and return `(previous, current)`.
    ///
    /// An unsorted column moves to `initial`; a sorted one flips.
    pub fn toggle(
        &mut self,
        column: usize,
        initial: SortDirection,
    ) -> (Option<SortDirection>, SortDirection) {
        let previous = self.direction(column);
        let next = previous.map_or(initial, SortDirection::toggled);
        self.directions.insert(column, next);
        self.last_sorted = Some(column);
        (previous, next)
    }
}
