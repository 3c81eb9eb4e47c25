//! Main application state and update loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: [`App::update`]
//! folds events into state and [`App::view`] renders it.

use tracing::{debug, info, trace, warn};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
};

use crate::config::UiSettings;
use crate::error::AppError;
use crate::events::{Action, Event, KeyBindings};
use crate::sort::{Activation, IgnoreReason, TableSorter};
use crate::table::Table;
use crate::ui::{StatusBar, TableView, Theme};

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// Whether the application should quit.
    should_quit: bool,
    /// The sorter owning the displayed table.
    sorter: TableSorter,
    /// The table widget.
    table_view: TableView,
    /// Transient messages and key hints.
    status_bar: StatusBar,
    /// Key to action mapping.
    keys: KeyBindings,
    /// Active color theme.
    theme: Theme,
    /// Whether header clicks are handled.
    mouse: bool,
}

impl App {
    /// Create an application around an initialized sorter.
    pub fn new(sorter: TableSorter, title: impl Into<String>, settings: &UiSettings) -> Self {
        debug!(theme = %settings.theme, mouse = settings.mouse, "Creating application");
        let keys = KeyBindings::default();
        let status_bar = StatusBar::new(keys.hints());
        let mut table_view = TableView::new(title, settings.column_spacing);
        if let Some(column) = sorter.last_sorted() {
            table_view.focus(column, sorter.table().column_count());
        }

        Self {
            should_quit: false,
            sorter,
            table_view,
            status_bar,
            keys,
            theme: Theme::named(&settings.theme),
            mouse: settings.mouse,
        }
    }

    /// Check if the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The sorter driving the view.
    pub fn sorter(&self) -> &TableSorter {
        &self.sorter
    }

    /// The table as currently ordered.
    pub fn table(&self) -> &Table {
        self.sorter.table()
    }

    /// Consume the application, returning the sorted table.
    pub fn into_table(self) -> Table {
        self.sorter.into_table()
    }

    /// Handle an incoming event and update state accordingly.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                trace!(?key, "Key event");
                if let Some(action) = self.keys.action(key) {
                    self.handle_action(action);
                }
            }
            Event::Click { x, y } => self.handle_click(x, y),
            Event::Scroll(delta) => {
                self.table_view
                    .scroll_by(i32::from(delta), self.sorter.table().len());
            }
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                // Border, header and status line.
                self.keys.set_page_size(height.saturating_sub(4));
            }
            Event::Tick => self.status_bar.tick(),
        }
    }

    fn handle_action(&mut self, action: Action) {
        let columns = self.sorter.table().column_count();
        let rows = self.sorter.table().len();
        match action {
            Action::Quit => {
                info!("Quit requested");
                self.should_quit = true;
            }
            Action::FocusLeft => self.table_view.move_focus(-1, columns),
            Action::FocusRight => self.table_view.move_focus(1, columns),
            Action::ActivateFocused => self.activate(self.table_view.focused()),
            Action::ActivateColumn(column) => {
                if column < columns {
                    self.table_view.focus(column, columns);
                }
                self.activate(column);
            }
            Action::Scroll(delta) => self.table_view.scroll_by(delta, rows),
            Action::Top => self.table_view.scroll_to_top(),
            Action::Bottom => self.table_view.scroll_to_bottom(rows),
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        if !self.mouse {
            return;
        }
        match self.table_view.column_at(x, y) {
            Some(column) => {
                trace!(x, y, column, "Header click");
                self.table_view
                    .focus(column, self.sorter.table().column_count());
                self.activate(column);
            }
            None => trace!(x, y, "Click outside header cells"),
        }
    }

    /// Activate a header cell and report the outcome on the status bar.
    fn activate(&mut self, column: usize) {
        match self.sorter.activate(column) {
            Ok(Activation::Sorted { column, direction }) => {
                let label = self
                    .sorter
                    .table()
                    .header_cell(column)
                    .map_or_else(|| format!("column {}", column + 1), |c| c.text.clone());
                self.status_bar
                    .info(format!("Sorted by {} ({})", label, direction));
            }
            Ok(Activation::Ignored(reason)) => {
                debug!(column, ?reason, "Activation ignored");
                match reason {
                    IgnoreReason::NoSuchColumn => {
                        self.status_bar.warning(format!("No column {}", column + 1));
                    }
                    IgnoreReason::NotSortable => {
                        self.status_bar.info("This column has no sort method");
                    }
                    IgnoreReason::Excluded => {
                        self.status_bar.info("Sorting is disabled for this column");
                    }
                }
            }
            Err(e) => {
                let err = AppError::from(e);
                if !err.is_recoverable() {
                    warn!(column, error = %err, "Unexpected sort failure");
                }
                self.status_bar.error(err.user_message());
            }
        }
    }

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Table
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        self.table_view
            .render(frame, chunks[0], &self.sorter, &self.theme);
        self.status_bar.render(frame, chunks[1]);
    }

    #[cfg(test)]
    fn status(&self) -> Option<&crate::ui::StatusMessage> {
        self.status_bar.message()
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::sort::{SortDirection, SortOptions};
    use crate::table::Cell;
    use crate::ui::StatusKind;

    fn create_app() -> App {
        create_app_with(SortOptions::default())
    }

    fn create_app_with(options: SortOptions) -> App {
        let table = Table::new(
            vec![
                Cell::with_class("Name", "sort-alphabetical"),
                Cell::with_class("Age", "sort-numeric"),
                Cell::new("Notes"),
                Cell::with_class("Joined", "sort-bogus"),
            ],
            vec![
                vec!["Bob", "30", "x", "2020-01-01"],
                vec!["Al", "5", "y", "2019-01-01"],
                vec!["Cy", "100", "z", "2021-01-01"],
            ],
        );
        let sorter = TableSorter::initialize(table, options).unwrap();
        App::new(sorter, "people", &UiSettings::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn names(app: &App) -> Vec<&str> {
        app.table()
            .rows()
            .iter()
            .map(|r| r.text(0).unwrap_or(""))
            .collect()
    }

    fn draw(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(40, 10)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
    }

    #[test]
    fn test_quit_on_q_key() {
        let mut app = create_app();
        app.update(key(KeyCode::Char('q')));
        assert!(app.should_quit());
    }

    #[test]
    fn test_quit_on_ctrl_c() {
        let mut app = create_app();
        app.update(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.should_quit());
    }

    #[test]
    fn test_digit_key_sorts_column() {
        let mut app = create_app();
        app.update(key(KeyCode::Char('2')));
        assert_eq!(names(&app), vec!["Al", "Bob", "Cy"]);
        assert_eq!(app.table_view.focused(), 1);

        app.update(key(KeyCode::Char('2')));
        assert_eq!(names(&app), vec!["Cy", "Bob", "Al"]);
        assert_eq!(app.sorter().direction(1), Some(SortDirection::Descending));

        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Info);
        assert_eq!(status.text, "Sorted by Age (desc)");
    }

    #[test]
    fn test_enter_sorts_focused_column() {
        let mut app = create_app();
        app.update(key(KeyCode::Enter));
        assert_eq!(names(&app), vec!["Al", "Bob", "Cy"]);
        assert_eq!(app.sorter().last_sorted(), Some(0));
    }

    #[test]
    fn test_unknown_method_shows_error_and_keeps_order() {
        let mut app = create_app();
        app.update(key(KeyCode::Char('4')));
        assert_eq!(names(&app), vec!["Bob", "Al", "Cy"]);
        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.contains("bogus"));
        assert!(!app.should_quit());
    }

    #[test]
    fn test_unsortable_and_missing_columns() {
        let mut app = create_app();
        app.update(key(KeyCode::Char('3')));
        assert_eq!(app.status().unwrap().kind, StatusKind::Info);
        app.update(key(KeyCode::Char('9')));
        assert_eq!(app.status().unwrap().kind, StatusKind::Warning);
        assert_eq!(names(&app), vec!["Bob", "Al", "Cy"]);
        // Focus does not move past the last column.
        assert_eq!(app.table_view.focused(), 2);
    }

    #[test]
    fn test_excluded_column_reports_info() {
        let mut app = create_app_with(SortOptions {
            exclude_sort_columns: vec![-3],
            ..SortOptions::default()
        });
        app.update(key(KeyCode::Char('2')));
        assert_eq!(names(&app), vec!["Bob", "Al", "Cy"]);
        assert_eq!(app.status().unwrap().text, "Sorting is disabled for this column");
    }

    #[test]
    fn test_header_click_sorts_column() {
        let mut app = create_app();
        draw(&mut app);
        // Border at (0, 0); the header line is y = 1 and "Name" starts at x = 1.
        app.update(Event::Click { x: 1, y: 1 });
        assert_eq!(names(&app), vec!["Al", "Bob", "Cy"]);

        // Body clicks do nothing.
        app.update(Event::Click { x: 1, y: 3 });
        assert_eq!(app.sorter().direction(0), Some(SortDirection::Ascending));
    }

    #[test]
    fn test_clicks_ignored_without_mouse() {
        let table = Table::new(
            vec![Cell::with_class("N", "sort-numeric")],
            vec![vec!["2"], vec!["1"]],
        );
        let sorter = TableSorter::initialize(table, SortOptions::default()).unwrap();
        let settings = UiSettings {
            mouse: false,
            ..UiSettings::default()
        };
        let mut app = App::new(sorter, "t", &settings);
        draw(&mut app);
        app.update(Event::Click { x: 1, y: 1 });
        assert_eq!(app.sorter().last_sorted(), None);
    }

    #[test]
    fn test_auto_sorted_column_is_focused() {
        let app = create_app_with(SortOptions {
            auto_sort: Some(1),
            ..SortOptions::default()
        });
        assert_eq!(app.table_view.focused(), 1);
        assert_eq!(names(&app), vec!["Al", "Bob", "Cy"]);
    }

    #[test]
    fn test_focus_keys_and_scroll() {
        let mut app = create_app();
        app.update(key(KeyCode::Right));
        app.update(key(KeyCode::Right));
        assert_eq!(app.table_view.focused(), 2);
        app.update(key(KeyCode::Left));
        assert_eq!(app.table_view.focused(), 1);

        app.update(key(KeyCode::Char('j')));
        assert_eq!(app.table_view.scroll(), 1);
        app.update(Event::Scroll(-1));
        assert_eq!(app.table_view.scroll(), 0);
    }

    #[test]
    fn test_view_renders_status_hints() {
        let mut app = create_app();
        let mut terminal = Terminal::new(TestBackend::new(80, 6)).unwrap();
        terminal.draw(|frame| app.view(frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let last: String = buffer.content[80 * 5..]
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(last.contains("[q] quit"));
    }

    #[test]
    fn test_into_table_returns_sorted_rows() {
        let mut app = create_app();
        app.update(key(KeyCode::Char('1')));
        let table = app.into_table();
        assert_eq!(table.rows()[0].text(0), Some("Al"));
    }
}
