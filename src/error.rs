//! Centralized error types for tablesort.
//!
//! This module provides a unified error hierarchy for the application with
//! user-friendly error messages. All error types use `thiserror`.

use thiserror::Error;

use crate::config::ConfigError;
use crate::sort::SortError;
use crate::table::TableError;

/// The main application error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration-related errors.
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// Sorting errors.
    #[error("{0}")]
    Sort(#[from] SortError),

    /// Table document errors.
    #[error("{0}")]
    Table(#[from] TableError),

    /// IO errors (file system, terminal).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Terminal-related errors.
    #[error("Terminal error: {0}")]
    Terminal(String),
}

impl AppError {
    /// Create a terminal error.
    pub fn terminal(msg: impl Into<String>) -> Self {
        AppError::Terminal(msg.into())
    }

    /// Get a user-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Config(e) => match e {
                ConfigError::NoConfigDir => {
                    "Could not find configuration directory. Please check your system settings."
                        .to_string()
                }
                ConfigError::ParseError(_) => {
                    "Configuration file is invalid. Please check the file format.".to_string()
                }
                ConfigError::ValidationError(msg) => format!("Configuration error: {}", msg),
                other => other.to_string(),
            },
            AppError::Sort(e) => match e {
                SortError::UnknownSortMethod(name) => {
                    format!("No sort method named '{}'. Check the header's class.", name)
                }
                SortError::InvalidMethodName(name) => {
                    format!("'{}' cannot be used as a sort method name.", name)
                }
                SortError::ColumnOutOfRange { column, columns } => format!(
                    "Column {} does not exist; the table has {} columns.",
                    column, columns
                ),
            },
            AppError::Table(e) => format!("Could not load table: {}", e),
            AppError::Io(_) => "A file operation failed. Please check file permissions.".to_string(),
            AppError::Terminal(msg) => format!("Terminal error: {}", msg),
        }
    }

    /// Check if the user can keep working after this error.
    ///
    /// A failed activation leaves the table untouched, so sort errors raised
    /// while the table is open are recoverable.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AppError::Sort(SortError::UnknownSortMethod(_)))
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_sort_error() {
        let app_err: AppError = SortError::UnknownSortMethod("bogus".to_string()).into();
        assert!(matches!(app_err, AppError::Sort(SortError::UnknownSortMethod(_))));
    }

    #[test]
    fn test_app_error_from_config_error() {
        let app_err: AppError = ConfigError::NoConfigDir.into();
        assert!(matches!(app_err, AppError::Config(ConfigError::NoConfigDir)));
    }

    #[test]
    fn test_user_message_unknown_method() {
        let err = AppError::Sort(SortError::UnknownSortMethod("bogus".to_string()));
        let msg = err.user_message();
        assert!(msg.contains("bogus"));
        assert!(msg.contains("class"));
    }

    #[test]
    fn test_user_message_column_out_of_range() {
        let err = AppError::Sort(SortError::ColumnOutOfRange {
            column: 7,
            columns: 3,
        });
        assert_eq!(
            err.user_message(),
            "Column 7 does not exist; the table has 3 columns."
        );
    }

    #[test]
    fn test_user_message_config_validation() {
        let err = AppError::Config(ConfigError::ValidationError("bad prefix".to_string()));
        assert!(err.user_message().contains("bad prefix"));
    }

    #[test]
    fn test_user_message_table_error() {
        let err = AppError::Table(TableError::Empty);
        assert_eq!(err.user_message(), "Could not load table: table is empty");
    }

    #[test]
    fn test_is_recoverable() {
        assert!(AppError::Sort(SortError::UnknownSortMethod("x".to_string())).is_recoverable());
        assert!(!AppError::Table(TableError::Empty).is_recoverable());
        assert!(!AppError::terminal("gone").is_recoverable());
    }

    #[test]
    fn test_terminal_error() {
        let err = AppError::terminal("test error");
        assert!(matches!(err, AppError::Terminal(_)));
        assert_eq!(err.user_message(), "Terminal error: test error");
    }
}
