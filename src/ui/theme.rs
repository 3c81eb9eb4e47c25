//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

/// Color theme for the table view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Border color.
    pub border: Color,
    /// Header cells that can be sorted.
    pub sortable: Color,
    /// Header cells without a sort method.
    pub inert: Color,
    /// The column sorted most recently.
    pub sorted: Color,
    /// Background of the keyboard-focused header cell.
    pub focus: Color,
}

impl Theme {
    /// Look up a theme by name, falling back to dark.
    pub fn named(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Light text on a dark terminal.
    pub fn dark() -> Self {
        Self {
            fg: Color::White,
            border: Color::DarkGray,
            sortable: Color::Cyan,
            inert: Color::Gray,
            sorted: Color::Yellow,
            focus: Color::DarkGray,
        }
    }

    /// Dark text on a light terminal.
    pub fn light() -> Self {
        Self {
            fg: Color::Black,
            border: Color::Gray,
            sortable: Color::Blue,
            inert: Color::DarkGray,
            sorted: Color::Magenta,
            focus: Color::Gray,
        }
    }

    /// Style of a header cell.
    pub fn header_style(&self, sortable: bool, sorted: bool, focused: bool) -> Style {
        let fg = match (sortable, sorted) {
            (_, true) => self.sorted,
            (true, false) => self.sortable,
            (false, false) => self.inert,
        };
        let mut style = Style::default().fg(fg).add_modifier(Modifier::BOLD);
        if focused {
            style = style.bg(self.focus);
        }
        style
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
