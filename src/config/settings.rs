//! Terminal UI settings.

use serde::{Deserialize, Serialize};

/// Settings for the interactive table view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The UI theme to use (`dark` or `light`).
    pub theme: String,
    /// Whether header cells can be clicked with the mouse.
    pub mouse: bool,
    /// Event poll interval in milliseconds.
    pub tick_rate_ms: u64,
    /// Blank columns between table columns.
    pub column_spacing: u16,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse: true,
            tick_rate_ms: 100,
            column_spacing: 2,
        }
    }
}
