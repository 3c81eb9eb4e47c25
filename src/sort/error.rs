//! Sort error types.

use thiserror::Error;

/// Errors raised while configuring or running a sort.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SortError {
    /// A header names a method that is not registered.
    #[error("no suitable sort method found: '{0}'")]
    UnknownSortMethod(String),

    /// A method name that can never appear in a class token.
    #[error("invalid sort method name: '{0}'")]
    InvalidMethodName(String),

    /// A column index past the end of the header.
    #[error("column {column} is out of range for a table with {columns} columns")]
    ColumnOutOfRange {
        /// The requested column.
        column: usize,
        /// Number of header cells.
        columns: usize,
    },
}

/// Result type for sort operations.
pub type Result<T> = std::result::Result<T, SortError>;
