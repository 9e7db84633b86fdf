//! Tests for row/column transforms and reshaping.

use tabula_model::{Column, ColumnType, Schema, Table, TableError, Value};
use tabula_transform::{
    Recode, SortDirection, coerce_column, drop_missing, filter_rows, pivot_longer, recode,
    rename_columns, sort_by,
};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn modes_table() -> Table {
    let schema = Schema::new(vec![
        Column::new("ntd_id", ColumnType::Integer),
        Column::new("mode", ColumnType::Categorical),
        Column::new("upt", ColumnType::Real),
    ])
    .unwrap();
    Table::new(
        schema,
        vec![
            vec![Value::Int(1), text("AR"), Value::Real(12.0)],
            vec![Value::Int(2), text("ZZ"), Value::Real(7.0)],
            vec![Value::Int(3), text("MB"), Value::Missing],
        ],
    )
    .unwrap()
}

#[test]
fn filter_preserves_order() {
    let table = modes_table();
    let filtered = filter_rows(&table, |row| row.i64("ntd_id") != Some(2)).unwrap();
    assert_eq!(filtered.height(), 2);
    assert_eq!(filtered.value(0, 0), &Value::Int(1));
    assert_eq!(filtered.value(1, 0), &Value::Int(3));
}

#[test]
fn rename_detects_collisions() {
    let table = modes_table();
    let renamed = rename_columns(&table, &[("upt", "trips")]).unwrap();
    assert_eq!(renamed.schema().index_of("trips"), Some(2));

    let err = rename_columns(&table, &[("upt", "mode")]).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn { .. }));

    let err = rename_columns(&table, &[("nope", "x")]).unwrap_err();
    assert!(matches!(err, TableError::MissingColumn { .. }));
}

#[test]
fn recode_is_total_over_observed_input() {
    let table = modes_table();
    let mapping = Recode::from_pairs(&[("AR", "Alaska Railroad"), ("MB", "Bus")], "Unknown");
    let recoded = recode(&table, "mode", &mapping).unwrap();

    assert_eq!(recoded.value(0, 1), &text("Alaska Railroad"));
    // Unmapped codes fall back to the default instead of failing.
    assert_eq!(recoded.value(1, 1), &text("Unknown"));
    assert_eq!(recoded.value(2, 1), &text("Bus"));
}

#[test]
fn recode_rejects_numeric_columns() {
    let err = recode(&modes_table(), "upt", &Recode::new("Unknown")).unwrap_err();
    assert!(matches!(err, TableError::TypeMismatch { .. }));
}

#[test]
fn drop_missing_removes_rows_with_any_gap() {
    let dropped = drop_missing(&modes_table()).unwrap();
    assert_eq!(dropped.height(), 2);
}

#[test]
fn coerce_text_ids_to_integer() {
    let schema = Schema::new(vec![Column::new("ntd_id", ColumnType::Text)]).unwrap();
    let table = Table::new(
        schema,
        vec![vec![text("00042")], vec![text(" 7 ")], vec![Value::Missing]],
    )
    .unwrap();

    let coerced = coerce_column(&table, "ntd_id", ColumnType::Integer).unwrap();
    assert_eq!(coerced.schema().column(0).ty, ColumnType::Integer);
    assert_eq!(coerced.value(0, 0), &Value::Int(42));
    assert_eq!(coerced.value(1, 0), &Value::Int(7));
    assert_eq!(coerced.value(2, 0), &Value::Missing);

    let bad = Table::new(
        Schema::new(vec![Column::new("ntd_id", ColumnType::Text)]).unwrap(),
        vec![vec![text("4x")]],
    )
    .unwrap();
    let err = coerce_column(&bad, "ntd_id", ColumnType::Integer).unwrap_err();
    assert!(matches!(err, TableError::Coerce { .. }));
}

#[test]
fn sort_puts_missing_last() {
    let sorted = sort_by(&modes_table(), "upt", SortDirection::Descending).unwrap();
    assert_eq!(sorted.value(0, 2), &Value::Real(12.0));
    assert_eq!(sorted.value(1, 2), &Value::Real(7.0));
    assert_eq!(sorted.value(2, 2), &Value::Missing);

    let ascending = sort_by(&modes_table(), "upt", SortDirection::Ascending).unwrap();
    assert_eq!(ascending.value(0, 2), &Value::Real(7.0));
    assert_eq!(ascending.value(2, 2), &Value::Missing);
}

#[test]
fn pivot_longer_stacks_month_columns() {
    let schema = Schema::new(vec![
        Column::new("ntd_id", ColumnType::Integer),
        Column::new("mode", ColumnType::Categorical),
        Column::new("2022-01", ColumnType::Real),
        Column::new("2022-02", ColumnType::Real),
    ])
    .unwrap();
    let table = Table::new(
        schema,
        vec![
            vec![Value::Int(1), text("MB"), Value::Real(100.0), Value::Real(110.0)],
            vec![Value::Int(2), text("CR"), Value::Missing, Value::Real(40.0)],
        ],
    )
    .unwrap();

    let long = pivot_longer(&table, &["ntd_id", "mode"], "month", "upt").unwrap();
    let names: Vec<&str> = long.schema().names().collect();
    assert_eq!(names, vec!["ntd_id", "mode", "month", "upt"]);
    // Missing January for id=2 is dropped: three rows, not four.
    assert_eq!(long.height(), 3);
    assert_eq!(long.value(0, 2), &text("2022-01"));
    assert_eq!(long.value(0, 3), &Value::Real(100.0));
    assert_eq!(long.value(2, 2), &text("2022-02"));
    assert_eq!(long.value(2, 3), &Value::Real(40.0));
}

#[test]
fn pivot_longer_recovers_non_missing_pairs() {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("a", ColumnType::Real),
        Column::new("b", ColumnType::Real),
    ])
    .unwrap();
    let table = Table::new(
        schema,
        vec![
            vec![Value::Int(1), Value::Real(1.5), Value::Missing],
            vec![Value::Int(2), Value::Real(2.5), Value::Real(3.5)],
        ],
    )
    .unwrap();

    let long = pivot_longer(&table, &["id"], "name", "value").unwrap();
    let pairs: Vec<(i64, &str, f64)> = long
        .iter_rows()
        .map(|row| {
            (
                row.i64("id").unwrap(),
                row.text("name").unwrap(),
                row.f64("value").unwrap(),
            )
        })
        .collect();
    assert_eq!(
        pairs,
        vec![(1, "a", 1.5), (2, "a", 2.5), (2, "b", 3.5)]
    );
}

#[test]
fn pivot_longer_requires_uniform_value_type() {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("a", ColumnType::Real),
        Column::new("b", ColumnType::Text),
    ])
    .unwrap();
    let table = Table::empty(schema);
    let err = pivot_longer(&table, &["id"], "name", "value").unwrap_err();
    assert!(matches!(err, TableError::TypeMismatch { .. }));
}
