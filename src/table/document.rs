//! In-memory table document: header cells and body rows.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::ClassList;

/// Stable identity of a body row.
///
/// Ids are assigned once when the table is built and never reused, so
/// reordering moves rows rather than recreating them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(usize);

impl RowId {
    /// The raw index this id was created with.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A single table cell: its text and class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The cell's text content.
    pub text: String,
    /// Class tokens on the cell.
    #[serde(default, rename = "class", skip_serializing_if = "ClassList::is_empty")]
    pub classes: ClassList,
}

impl Cell {
    /// Create a cell with text and no classes.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            classes: ClassList::new(),
        }
    }

    /// Create a cell with text and a class attribute.
    pub fn with_class(text: impl Into<String>, class: &str) -> Self {
        Self {
            text: text.into(),
            classes: ClassList::parse(class),
        }
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

/// A body row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    id: RowId,
    /// Cells in column order.
    pub cells: Vec<Cell>,
}

impl Row {
    /// The row's stable id.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Text of the cell in `column`, if the row has that many cells.
    pub fn text(&self, column: usize) -> Option<&str> {
        self.cells.get(column).map(|c| c.text.as_str())
    }
}

/// A table with an optional header section and a body of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    head: Option<Vec<Cell>>,
    body: Vec<Row>,
    next_id: usize,
}

impl Table {
    /// Create a table with a header row and body rows.
    pub fn new<R, C>(head: Vec<Cell>, rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: Into<Cell>,
    {
        let mut table = Self::from_rows(rows);
        table.head = Some(head);
        table
    }

    /// Create a table without a header section.
    pub fn from_rows<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = Vec<C>>,
        C: Into<Cell>,
    {
        let mut table = Self::default();
        for cells in rows {
            table.push_row(cells.into_iter().map(Into::into).collect());
        }
        table
    }

    /// Append a new row to the body and return its id.
    pub fn push_row(&mut self, cells: Vec<Cell>) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.body.push(Row { id, cells });
        id
    }

    /// The header cells, if the table has a header section.
    pub fn head(&self) -> Option<&[Cell]> {
        self.head.as_deref()
    }

    /// Mutable access to a header cell.
    pub fn header_cell_mut(&mut self, column: usize) -> Option<&mut Cell> {
        self.head.as_mut().and_then(|h| h.get_mut(column))
    }

    /// A header cell by column index.
    pub fn header_cell(&self, column: usize) -> Option<&Cell> {
        self.head.as_ref().and_then(|h| h.get(column))
    }

    /// Body rows in their current order.
    pub fn rows(&self) -> &[Row] {
        &self.body
    }

    /// Ids of the body rows in their current order.
    pub fn row_ids(&self) -> Vec<RowId> {
        self.body.iter().map(Row::id).collect()
    }

    /// Look up a row by id.
    pub fn row(&self, id: RowId) -> Option<&Row> {
        self.body.iter().find(|r| r.id == id)
    }

    /// Text of a cell, or `None` if the row or column does not exist.
    pub fn cell_text(&self, id: RowId, column: usize) -> Option<&str> {
        self.row(id).and_then(|r| r.text(column))
    }

    /// Number of columns: the header length, or the widest row when there is
    /// no header.
    pub fn column_count(&self) -> usize {
        match &self.head {
            Some(head) => head.len(),
            None => self.body.iter().map(|r| r.cells.len()).max().unwrap_or(0),
        }
    }

    /// Move existing rows to the end of the body, in the order given.
    ///
    /// Same result as appending each row in turn, in one pass. Rows not
    /// listed keep their relative order in front; unknown ids are ignored.
    pub fn append_rows(&mut self, ids: &[RowId]) {
        let order: HashMap<RowId, usize> =
            ids.iter().enumerate().map(|(i, &id)| (id, i)).collect();
        self.body
            .sort_by_key(|row| order.get(&row.id).map_or((false, 0), |&i| (true, i)));
    }

    /// Promote the first body row into the header section.
    ///
    /// Returns false and leaves the table unchanged when a header already
    /// exists or the body is empty.
    pub fn promote_first_row(&mut self) -> bool {
        if self.head.is_some() || self.body.is_empty() {
            return false;
        }
        let first = self.body.remove(0);
        self.head = Some(first.cells);
        true
    }

    /// Number of body rows.
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check whether the body has no rows.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}
