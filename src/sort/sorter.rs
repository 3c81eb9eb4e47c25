//! The table sorter: activation handling, toggling, sorting and rendering.

use std::cmp::Ordering;

use tracing::{debug, error, info};

use super::algorithm::stable_sort_by;
use super::{Result, SortDirection, SortError, SortMethodRegistry, SortOptions, SortState};
use crate::table::{RowId, Table};

/// Side-effect hook receiving the activated column index.
pub type SortHook = Box<dyn FnMut(usize)>;

/// Why an activation did not sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The table has no header cell at that index.
    NoSuchColumn,
    /// The header cell carries no sort-method token.
    NotSortable,
    /// The column is listed in `exclude_sort_columns`.
    Excluded,
}

/// Outcome of activating a header cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Rows were sorted.
    Sorted {
        /// The activated column.
        column: usize,
        /// The column's new direction.
        direction: SortDirection,
    },
    /// Nothing happened.
    Ignored(IgnoreReason),
}

impl Activation {
    /// True when the activation sorted the rows.
    pub fn is_sorted(&self) -> bool {
        matches!(self, Activation::Sorted { .. })
    }
}

/// Collects comparators and hooks before binding a sorter to a table.
pub struct TableSorterBuilder {
    options: SortOptions,
    registry: SortMethodRegistry,
    on_before_sort: Option<SortHook>,
    on_after_sort: Option<SortHook>,
}

impl TableSorterBuilder {
    fn new(options: SortOptions) -> Self {
        Self {
            options: options.normalized(),
            registry: SortMethodRegistry::with_builtins(),
            on_before_sort: None,
            on_after_sort: None,
        }
    }

    /// Register a comparator, overriding a built-in of the same name.
    ///
    /// # Errors
    ///
    /// Returns `SortError::InvalidMethodName` for names that cannot appear in
    /// a class token.
    pub fn sort_method<F>(mut self, name: &str, compare: F) -> Result<Self>
    where
        F: Fn(&str, &str) -> Ordering + Send + Sync + 'static,
    {
        self.registry.register(name, compare)?;
        Ok(self)
    }

    /// Hook called before a column is sorted.
    pub fn on_before_sort(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.on_before_sort = Some(Box::new(hook));
        self
    }

    /// Hook called after a column is sorted and rendered.
    pub fn on_after_sort(mut self, hook: impl FnMut(usize) + 'static) -> Self {
        self.on_after_sort = Some(Box::new(hook));
        self
    }

    /// Bind to `table`.
    ///
    /// Applies `fix_table_head`, registers `method_aliases`, and runs
    /// `auto_sort`. An unknown method on the auto-sorted column is reported
    /// like any other activation and does not fail initialization.
    ///
    /// # Errors
    ///
    /// Returns an error if an alias is invalid or points at an unknown method,
    /// or if `auto_sort` is past the last header cell.
    pub fn initialize(self, mut table: Table) -> Result<TableSorter> {
        let Self {
            options,
            mut registry,
            on_before_sort,
            on_after_sort,
        } = self;

        for (alias, target) in &options.method_aliases {
            registry.alias(alias, target)?;
        }

        if options.fix_table_head && table.promote_first_row() {
            debug!("Promoted first row to table header");
        }

        let columns = table.column_count();
        if let Some(column) = options.auto_sort {
            if table.header_cell(column).is_none() {
                return Err(SortError::ColumnOutOfRange { column, columns });
            }
        }

        let rows = table.row_ids();
        let auto_sort = options.auto_sort;
        let mut sorter = TableSorter {
            table,
            rows,
            state: SortState::new(),
            registry,
            options,
            on_before_sort,
            on_after_sort,
        };
        debug!(
            columns,
            rows = sorter.rows.len(),
            prefix = %sorter.options.prefix,
            "Table sorter initialized"
        );

        if let Some(column) = auto_sort {
            if let Err(e) = sorter.activate(column) {
                debug!(column, error = %e, "Skipped auto-sort");
            }
        }
        Ok(sorter)
    }
}

/// Sorts the body rows of one table in response to header activations.
///
/// Each sorter owns its table, state and registry; sorters never share state.
pub struct TableSorter {
    table: Table,
    /// In-memory row sequence, sorted in place on each activation.
    rows: Vec<RowId>,
    state: SortState,
    registry: SortMethodRegistry,
    options: SortOptions,
    on_before_sort: Option<SortHook>,
    on_after_sort: Option<SortHook>,
}

impl TableSorter {
    /// Start building a sorter with custom comparators or hooks.
    pub fn builder(options: SortOptions) -> TableSorterBuilder {
        TableSorterBuilder::new(options)
    }

    /// Bind a sorter with built-in comparators and no hooks.
    ///
    /// # Errors
    ///
    /// See [`TableSorterBuilder::initialize`].
    pub fn initialize(table: Table, options: SortOptions) -> Result<Self> {
        Self::builder(options).initialize(table)
    }

    /// Handle activation of the header cell at `column`.
    ///
    /// # Errors
    ///
    /// Returns `SortError::UnknownSortMethod` when the header names a method
    /// that is not registered. Neither row order nor state changes.
    pub fn activate(&mut self, column: usize) -> Result<Activation> {
        if self.table.header_cell(column).is_none() {
            return Ok(Activation::Ignored(IgnoreReason::NoSuchColumn));
        }
        let Some(method) = self.method_for(column).map(str::to_string) else {
            return Ok(Activation::Ignored(IgnoreReason::NotSortable));
        };
        let Some(compare) = self.registry.get(&method).cloned() else {
            error!(column, method = %method, "No suitable sort method found");
            return Err(SortError::UnknownSortMethod(method));
        };
        if self.options.is_excluded(column, self.table.column_count()) {
            debug!(column, "Ignoring excluded column");
            return Ok(Activation::Ignored(IgnoreReason::Excluded));
        }

        if let Some(hook) = self.on_before_sort.as_mut() {
            hook(column);
        }

        let (_, direction) = self.state.toggle(column, self.options.order);
        self.render_markers(column);
        self.sort_rows(column, direction, |a, b| compare(a, b));
        self.render();

        if let Some(hook) = self.on_after_sort.as_mut() {
            hook(column);
        }

        info!(column, method = %method, %direction, "Sorted table");
        Ok(Activation::Sorted { column, direction })
    }

    /// The sort method named by the header cell at `column`.
    ///
    /// Direction markers are never taken as a method name.
    pub fn method_for(&self, column: usize) -> Option<&str> {
        let prefix = self.options.prefix.as_str();
        self.table.header_cell(column).and_then(|cell| {
            cell.classes.suffixes(prefix).find(|name| {
                *name != SortDirection::Ascending.marker() && *name != SortDirection::Descending.marker()
            })
        })
    }

    /// Make the header markers of `column` reflect its state.
    fn render_markers(&mut self, column: usize) {
        let prefix = self.options.prefix.clone();
        let direction = self.state.direction(column);
        if let Some(cell) = self.table.header_cell_mut(column) {
            for marker in [SortDirection::Ascending, SortDirection::Descending] {
                cell.classes.remove(&format!("{prefix}{}", marker.marker()));
            }
            if let Some(direction) = direction {
                cell.classes.add(&format!("{prefix}{}", direction.marker()));
            }
        }
    }

    /// Sort the in-memory row sequence by the text in `column`.
    ///
    /// Rows whose cell is empty or missing compare equal to everything, so
    /// they keep their slots and the other rows are sorted around them.
    fn sort_rows<F>(&mut self, column: usize, direction: SortDirection, compare: F)
    where
        F: Fn(&str, &str) -> Ordering,
    {
        let keyed: Vec<(RowId, &str)> = self
            .table
            .rows()
            .iter()
            .map(|row| (row.id(), row.text(column).unwrap_or("")))
            .collect();

        let mut sortable: Vec<(RowId, &str)> = keyed
            .iter()
            .copied()
            .filter(|(_, text)| !text.is_empty())
            .collect();
        stable_sort_by(&mut sortable, |(_, a), (_, b)| direction.apply(compare(*a, *b)));

        let mut sorted = sortable.into_iter().map(|(id, _)| id);
        self.rows = keyed
            .iter()
            .map(|&(id, text)| {
                if text.is_empty() {
                    id
                } else {
                    sorted.next().unwrap_or(id)
                }
            })
            .collect();
    }

    /// Re-append every row in sorted order so the body matches it.
    fn render(&mut self) {
        self.table.append_rows(&self.rows);
    }

    /// The table, rows in their rendered order.
    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Release the table.
    pub fn into_table(self) -> Table {
        self.table
    }

    /// Current direction of a column, `None` until it has been sorted.
    pub fn direction(&self, column: usize) -> Option<SortDirection> {
        self.state.direction(column)
    }

    /// The column sorted most recently.
    pub fn last_sorted(&self) -> Option<usize> {
        self.state.last_sorted()
    }

    /// The sorter's method registry.
    pub fn registry(&self) -> &SortMethodRegistry {
        &self.registry
    }

    /// The normalized options.
    pub fn options(&self) -> &SortOptions {
        &self.options
    }
}
