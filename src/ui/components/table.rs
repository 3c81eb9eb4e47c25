//! Sortable table component.
//!
//! Renders a [`TableSorter`]'s table and maps clicks on the header line back
//! to column indices. Direction arrows are derived from the header cells'
//! class markers, not from sorter state.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Cell as TuiCell, Row as TuiRow, Table as TuiTable},
    Frame,
};

use crate::sort::{SortDirection, TableSorter};
use crate::table::Cell;
use crate::ui::theme::Theme;

/// Interactive view over a sorted table.
pub struct TableView {
    /// Title shown in the border.
    title: String,
    /// Keyboard-focused header column.
    focused: usize,
    /// Index of the first visible body row.
    scroll: usize,
    /// Blank columns between table columns.
    column_spacing: u16,
    /// Header line area from the last render.
    header_area: Option<Rect>,
    /// Column areas from the last render, for hit testing.
    column_areas: Vec<Rect>,
    /// Number of body rows that fit, from the last render.
    visible_rows: usize,
}

impl TableView {
    /// Create a new table view.
    pub fn new(title: impl Into<String>, column_spacing: u16) -> Self {
        Self {
            title: title.into(),
            focused: 0,
            scroll: 0,
            column_spacing,
            header_area: None,
            column_areas: Vec::new(),
            visible_rows: 0,
        }
    }

    /// The focused header column.
    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Focus a column, clamped to the column count.
    pub fn focus(&mut self, column: usize, columns: usize) {
        self.focused = column.min(columns.saturating_sub(1));
    }

    /// Move focus by `delta` columns, clamped.
    pub fn move_focus(&mut self, delta: isize, columns: usize) {
        let target = self.focused.saturating_add_signed(delta);
        self.focus(target, columns);
    }

    /// First visible body row.
    pub fn scroll(&self) -> usize {
        self.scroll
    }

    /// Scroll by `delta` rows, clamped so the last row stays reachable.
    pub fn scroll_by(&mut self, delta: i32, rows: usize) {
        let max = rows.saturating_sub(1);
        let target = if delta < 0 {
            self.scroll.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.scroll.saturating_add(delta as usize)
        };
        self.scroll = target.min(max);
    }

    /// Jump to the first row.
    pub fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    /// Jump so the last page of rows is visible.
    pub fn scroll_to_bottom(&mut self, rows: usize) {
        self.scroll = rows.saturating_sub(self.visible_rows.max(1));
    }

    /// Number of body rows visible in the last render.
    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    /// Map a terminal cell to the header column under it.
    ///
    /// Returns `None` for clicks outside the header line or between columns.
    pub fn column_at(&self, x: u16, y: u16) -> Option<usize> {
        let header = self.header_area?;
        if y != header.y {
            return None;
        }
        self.column_areas
            .iter()
            .position(|area| x >= area.x && x < area.x + area.width)
    }

    /// Render the table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, sorter: &TableSorter, theme: &Theme) {
        let table = sorter.table();
        let prefix = sorter.options().prefix.as_str();
        let columns = table.column_count();

        let block = Block::default()
            .title(format!(" {} ({} rows) ", self.title, table.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border));
        let inner = block.inner(area);

        let head: Vec<(String, Style)> = (0..columns)
            .map(|c| {
                let cell = table.header_cell(c);
                let label = cell.map(|cell| header_label(cell, prefix)).unwrap_or_default();
                let style = theme.header_style(
                    sorter.method_for(c).is_some(),
                    sorter.last_sorted() == Some(c),
                    c == self.focused,
                );
                (label, style)
            })
            .collect();

        let widths: Vec<Constraint> = (0..columns)
            .map(|c| {
                let body_width = table
                    .rows()
                    .iter()
                    .map(|r| r.text(c).map_or(0, |t| t.chars().count()))
                    .max()
                    .unwrap_or(0);
                let head_width = head[c].0.chars().count();
                Constraint::Length(column_width(body_width.max(head_width)))
            })
            .collect();

        self.header_area = table.head().map(|_| Rect { height: 1, ..inner });
        self.column_areas = Layout::horizontal(widths.iter().copied())
            .flex(Flex::Start)
            .spacing(self.column_spacing)
            .split(inner)
            .to_vec();
        let header_height = u16::from(table.head().is_some());
        self.visible_rows = inner.height.saturating_sub(header_height) as usize;

        let rows = table.rows().iter().skip(self.scroll).map(|row| {
            TuiRow::new(
                (0..columns).map(|c| TuiCell::from(row.text(c).unwrap_or("").to_string())),
            )
            .style(Style::default().fg(theme.fg))
        });

        let mut widget = TuiTable::new(rows, widths)
            .column_spacing(self.column_spacing)
            .flex(Flex::Start)
            .block(block);
        if table.head().is_some() {
            let header = TuiRow::new(
                head.into_iter()
                    .map(|(label, style)| TuiCell::from(Line::styled(label, style))),
            );
            widget = widget.header(header);
        }

        frame.render_widget(widget, area);
    }
}

/// Terminal width of a column, saturating at the largest representable width.
fn column_width(chars: usize) -> u16 {
    u16::try_from(chars).unwrap_or(u16::MAX)
}

/// Header text with an arrow for the direction marker it carries.
fn header_label(cell: &Cell, prefix: &str) -> String {
    [SortDirection::Ascending, SortDirection::Descending]
        .into_iter()
        .find(|d| cell.classes.contains(&format!("{prefix}{}", d.marker())))
        .map_or_else(|| cell.text.clone(), |d| format!("{} {}", cell.text, d.arrow()))
}
