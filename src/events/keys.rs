//! Key binding definitions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the table view can do in response to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Move header focus one column left.
    FocusLeft,
    /// Move header focus one column right.
    FocusRight,
    /// Activate the focused header cell.
    ActivateFocused,
    /// Activate a header cell by 0-based index.
    ActivateColumn(usize),
    /// Scroll the body by a number of rows.
    Scroll(i32),
    /// Jump to the first row.
    Top,
    /// Jump to the last row.
    Bottom,
}

/// Key binding configuration.
pub struct KeyBindings {
    /// Rows moved by page up/down.
    page_size: i32,
}

impl KeyBindings {
    /// Create new key bindings.
    pub fn new(page_size: u16) -> Self {
        Self {
            page_size: i32::from(page_size.max(1)),
        }
    }

    /// Update the page size after a resize.
    pub fn set_page_size(&mut self, page_size: u16) {
        self.page_size = i32::from(page_size.max(1));
    }

    /// Map a key to an action.
    ///
    /// Digits `1`-`9` activate columns 0-8 directly.
    pub fn action(&self, key: KeyEvent) -> Option<Action> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) | (KeyCode::Esc, _) => Some(Action::Quit),
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Action::Quit),
            (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => {
                Some(Action::FocusLeft)
            }
            (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => {
                Some(Action::FocusRight)
            }
            (KeyCode::Enter, _) | (KeyCode::Char(' '), KeyModifiers::NONE) => {
                Some(Action::ActivateFocused)
            }
            (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => c
                .to_digit(10)
                .map(|d| Action::ActivateColumn(d as usize - 1)),
            (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => Some(Action::Scroll(1)),
            (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => Some(Action::Scroll(-1)),
            (KeyCode::PageDown, _) => Some(Action::Scroll(self.page_size)),
            (KeyCode::PageUp, _) => Some(Action::Scroll(-self.page_size)),
            (KeyCode::Home, _) | (KeyCode::Char('g'), KeyModifiers::NONE) => Some(Action::Top),
            (KeyCode::End, _) | (KeyCode::Char('G'), _) => Some(Action::Bottom),
            _ => None,
        }
    }

    /// Hint line for the help bar.
    pub fn hints(&self) -> &'static str {
        "[←/→] column  [Enter] sort  [1-9] sort column  [j/k] scroll  [q] quit"
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new(10)
    }
}
