//! End-to-end sorting behavior through the public API.

use std::cell::Cell as Counter;
use std::rc::Rc;

use tablesort::sort::{
    parse_int_prefix, Activation, SortDirection, SortError, SortOptions, TableSorter,
};
use tablesort::table::{self, Cell, Table, TableDocument};

fn people() -> Table {
    Table::new(
        vec![
            Cell::with_class("Name", "sort-alphabetical"),
            Cell::with_class("Age", "sort-numeric"),
        ],
        vec![vec!["Bob", "30"], vec!["Al", "5"], vec!["Cy", "100"]],
    )
}

fn column(table: &Table, col: usize) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|r| r.text(col).unwrap_or("").to_string())
        .collect()
}

fn single_column(class: &str, values: &[&str]) -> Table {
    Table::new(
        vec![Cell::with_class("Value", class)],
        values.iter().map(|v| vec![*v]),
    )
}

#[test]
fn test_people_example() {
    let mut sorter = TableSorter::initialize(people(), SortOptions::default()).unwrap();

    sorter.activate(1).unwrap();
    assert_eq!(column(sorter.table(), 0), vec!["Al", "Bob", "Cy"]);

    sorter.activate(1).unwrap();
    assert_eq!(column(sorter.table(), 0), vec!["Cy", "Bob", "Al"]);
}

#[test]
fn test_numeric_ascending_is_non_decreasing() {
    let values = ["10", "-2", "0x1A", "7abc", "abc", "3.5", "+4", "0"];
    let mut sorter =
        TableSorter::initialize(single_column("sort-numeric", &values), SortOptions::default())
            .unwrap();

    sorter.activate(0).unwrap();
    let ascending = column(sorter.table(), 0);
    // Unparseable values sort after every number.
    let keys: Vec<f64> = ascending
        .iter()
        .map(|v| parse_int_prefix(v).unwrap_or(f64::INFINITY))
        .collect();
    assert!(keys.windows(2).all(|w| w[0] <= w[1]), "{ascending:?}");
    assert_eq!(ascending.last().map(String::as_str), Some("abc"));

    sorter.activate(0).unwrap();
    let descending = column(sorter.table(), 0);
    let mut reversed = ascending.clone();
    reversed.reverse();
    assert_eq!(descending, reversed);
}

#[test]
fn test_direction_oscillates() {
    let mut sorter = TableSorter::initialize(people(), SortOptions::default()).unwrap();
    let directions: Vec<SortDirection> = (0..4)
        .map(|_| match sorter.activate(0).unwrap() {
            Activation::Sorted { direction, .. } => direction,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(
        directions,
        vec![
            SortDirection::Ascending,
            SortDirection::Descending,
            SortDirection::Ascending,
            SortDirection::Descending,
        ]
    );
}

#[test]
fn test_sorting_twice_in_same_direction_is_idempotent() {
    let values = ["b", "C", "a", "B", "c", "A"];
    let mut first =
        TableSorter::initialize(single_column("sort-alphabetical", &values), SortOptions::default())
            .unwrap();
    first.activate(0).unwrap();
    let once = column(first.table(), 0);

    // A fresh sorter over the sorted table starts ascending again.
    let mut second = TableSorter::initialize(first.into_table(), SortOptions::default()).unwrap();
    second.activate(0).unwrap();
    assert_eq!(column(second.table(), 0), once);
}

#[test]
fn test_excluded_last_column_never_sorts() {
    let before = Rc::new(Counter::new(0));
    let after = Rc::new(Counter::new(0));
    let options = SortOptions {
        exclude_sort_columns: vec![-1],
        ..SortOptions::default()
    };
    let (b, a) = (Rc::clone(&before), Rc::clone(&after));
    let mut sorter = TableSorter::builder(options)
        .on_before_sort(move |_| b.set(b.get() + 1))
        .on_after_sort(move |_| a.set(a.get() + 1))
        .initialize(people())
        .unwrap();

    for _ in 0..3 {
        let activation = sorter.activate(1).unwrap();
        assert!(!activation.is_sorted());
    }
    assert_eq!(column(sorter.table(), 0), vec!["Bob", "Al", "Cy"]);
    assert_eq!(before.get(), 0);
    assert_eq!(after.get(), 0);
    assert_eq!(sorter.direction(1), None);

    sorter.activate(0).unwrap();
    assert_eq!((before.get(), after.get()), (1, 1));
}

#[test]
fn test_empty_cell_keeps_its_place() {
    let mut sorter =
        TableSorter::initialize(single_column("sort-numeric", &["3", "1", "", "2"]), SortOptions::default())
            .unwrap();
    sorter.activate(0).unwrap();
    assert_eq!(column(sorter.table(), 0), vec!["1", "2", "", "3"]);
}

#[test]
fn test_sorting_twice_with_empty_cells_is_idempotent() {
    let values = ["b", "", "C", "a", "", "B", "c", ""];
    let mut first =
        TableSorter::initialize(single_column("sort-alphabetical", &values), SortOptions::default())
            .unwrap();
    first.activate(0).unwrap();
    let once = column(first.table(), 0);
    assert_eq!(once, vec!["a", "", "b", "B", "", "C", "c", ""]);

    let mut second = TableSorter::initialize(first.into_table(), SortOptions::default()).unwrap();
    second.activate(0).unwrap();
    assert_eq!(column(second.table(), 0), once);
}

#[test]
fn test_unknown_method_leaves_table_alone() {
    let table = Table::new(
        vec![Cell::with_class("Name", "sort-bogus")],
        vec![vec!["b"], vec!["a"]],
    );
    let mut sorter = TableSorter::initialize(table, SortOptions::default()).unwrap();

    let err = sorter.activate(0).unwrap_err();
    assert_eq!(err, SortError::UnknownSortMethod("bogus".to_string()));
    assert_eq!(column(sorter.table(), 0), vec!["b", "a"]);
    assert_eq!(sorter.direction(0), None);
    assert_eq!(sorter.table().header_cell(0).unwrap().classes.len(), 1);
}

#[test]
fn test_custom_method_from_builder() {
    let mut sorter = TableSorter::builder(SortOptions::default())
        .sort_method("length", |a, b| a.len().cmp(&b.len()))
        .unwrap()
        .initialize(single_column("sort-length", &["ccc", "a", "bb"]))
        .unwrap();
    sorter.activate(0).unwrap();
    assert_eq!(column(sorter.table(), 0), vec!["a", "bb", "ccc"]);
}

#[test]
fn test_document_round_trip_keeps_sorted_order() {
    let json = r#"{
        "rows": [
            [{"text": "When", "class": "sort-date"}, "Note"],
            ["2021-03-01", "c"],
            ["2019-12-31", "a"],
            ["2020-06-15", "b"]
        ]
    }"#;
    let document: TableDocument = serde_json::from_str(json).unwrap();
    let options = SortOptions {
        fix_table_head: true,
        auto_sort: Some(0),
        ..SortOptions::default()
    };
    let sorter = TableSorter::initialize(document.into_table().unwrap(), options).unwrap();
    assert_eq!(sorter.direction(0), Some(SortDirection::Ascending));

    let text = table::render_plain(sorter.table(), "sort-");
    assert!(text.lines().next().unwrap().starts_with("When ▲"));

    let exported = TableDocument::from_table(sorter.table());
    let table = exported.into_table().unwrap();
    assert_eq!(
        column(&table, 0),
        vec!["2019-12-31", "2020-06-15", "2021-03-01"]
    );
    assert_eq!(column(&table, 1), vec!["a", "b", "c"]);
}
