//! Tests for joins, semi-filtering, and ratio metrics.

use tabula_model::{Column, ColumnType, Schema, Table, TableError, Value};
use tabula_transform::{JoinKind, OnUndefined, derive_ratio, join, semi_join};

fn text(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn fares() -> Table {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("mode", ColumnType::Categorical),
        Column::new("fare", ColumnType::Real),
    ])
    .unwrap();
    Table::new(
        schema,
        vec![
            vec![Value::Int(1), text("MB"), Value::Real(100.0)],
            vec![Value::Int(1), text("CR"), Value::Real(50.0)],
        ],
    )
    .unwrap()
}

fn expenses() -> Table {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("mode", ColumnType::Categorical),
        Column::new("exp", ColumnType::Real),
    ])
    .unwrap();
    Table::new(
        schema,
        vec![vec![Value::Int(1), text("MB"), Value::Real(80.0)]],
    )
    .unwrap()
}

#[test]
fn inner_join_keeps_matched_pairs_only() {
    let joined = join(&fares(), &expenses(), &["id", "mode"], JoinKind::Inner).unwrap();

    // Exactly one row: (1, MB); the CR fare row has no expense match.
    assert_eq!(joined.height(), 1);
    let names: Vec<&str> = joined.schema().names().collect();
    assert_eq!(names, vec!["id", "mode", "fare", "exp"]);
    assert_eq!(joined.value(0, 0), &Value::Int(1));
    assert_eq!(joined.value(0, 1), &text("MB"));
    assert_eq!(joined.value(0, 2), &Value::Real(100.0));
    assert_eq!(joined.value(0, 3), &Value::Real(80.0));
}

#[test]
fn left_join_preserves_every_left_row() {
    let joined = join(&fares(), &expenses(), &["id", "mode"], JoinKind::Left).unwrap();

    assert_eq!(joined.height(), 2);
    assert_eq!(joined.value(0, 3), &Value::Real(80.0));
    // Unmatched CR row survives with a missing expense.
    assert_eq!(joined.value(1, 1), &text("CR"));
    assert_eq!(joined.value(1, 3), &Value::Missing);
}

#[test]
fn duplicate_keys_fan_out() {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("month", ColumnType::Text),
    ])
    .unwrap();
    let right = Table::new(
        schema,
        vec![
            vec![Value::Int(1), text("jan")],
            vec![Value::Int(1), text("feb")],
        ],
    )
    .unwrap();
    let left_schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("agency", ColumnType::Text),
    ])
    .unwrap();
    let left = Table::new(
        left_schema,
        vec![
            vec![Value::Int(1), text("Metro")],
            vec![Value::Int(1), text("Metro Annex")],
        ],
    )
    .unwrap();

    let joined = join(&left, &right, &["id"], JoinKind::Inner).unwrap();
    // 2 left rows x 2 right rows sharing the key.
    assert_eq!(joined.height(), 4);
}

#[test]
fn missing_keys_never_match() {
    let schema = Schema::new(vec![
        Column::new("id", ColumnType::Integer),
        Column::new("v", ColumnType::Real),
    ])
    .unwrap();
    let left = Table::new(
        schema.clone(),
        vec![vec![Value::Missing, Value::Real(1.0)]],
    )
    .unwrap();
    let right = Table::new(
        Schema::new(vec![
            Column::new("id", ColumnType::Integer),
            Column::new("w", ColumnType::Real),
        ])
        .unwrap(),
        vec![vec![Value::Missing, Value::Real(2.0)]],
    )
    .unwrap();

    let inner = join(&left, &right, &["id"], JoinKind::Inner).unwrap();
    assert_eq!(inner.height(), 0);

    let outer = join(&left, &right, &["id"], JoinKind::Left).unwrap();
    assert_eq!(outer.height(), 1);
    assert_eq!(outer.value(0, 2), &Value::Missing);
}

#[test]
fn key_type_mismatch_is_rejected() {
    let left = fares();
    let right = Table::new(
        Schema::new(vec![
            Column::new("id", ColumnType::Text),
            Column::new("exp", ColumnType::Real),
        ])
        .unwrap(),
        vec![vec![text("1"), Value::Real(80.0)]],
    )
    .unwrap();

    let err = join(&left, &right, &["id"], JoinKind::Inner).unwrap_err();
    assert!(matches!(err, TableError::TypeMismatch { column, .. } if column == "id"));
}

#[test]
fn join_rejects_colliding_non_key_columns() {
    let err = join(&fares(), &fares(), &["id"], JoinKind::Inner).unwrap_err();
    assert!(matches!(err, TableError::DuplicateColumn { .. }));
}

#[test]
fn semi_join_filters_without_adding_columns() {
    let gated = expenses();
    let narrowed = semi_join(&fares(), &gated, &["id", "mode"]).unwrap();

    assert_eq!(narrowed.schema().len(), 3);
    assert_eq!(narrowed.height(), 1);
    assert_eq!(narrowed.value(0, 1), &text("MB"));
}

#[test]
fn derive_ratio_drop_removes_undefined_rows() {
    let schema = Schema::new(vec![
        Column::new("fares", ColumnType::Real),
        Column::new("expenses", ColumnType::Real),
    ])
    .unwrap();
    let table = Table::new(
        schema,
        vec![
            vec![Value::Real(100.0), Value::Real(80.0)],
            vec![Value::Real(50.0), Value::Real(0.0)],
            vec![Value::Real(30.0), Value::Missing],
            vec![Value::Real(10.0), Value::Real(40.0)],
        ],
    )
    .unwrap();

    let derived = derive_ratio(
        &table,
        "fares",
        "expenses",
        "farebox_recovery",
        OnUndefined::Drop,
    )
    .unwrap();

    // Input count minus the zero/missing-denominator rows.
    assert_eq!(derived.height(), 2);
    assert_eq!(derived.value(0, 2), &Value::Real(1.25));
    assert_eq!(derived.value(1, 2), &Value::Real(0.25));
}

#[test]
fn derive_ratio_can_keep_undefined_as_missing() {
    let schema = Schema::new(vec![
        Column::new("n", ColumnType::Real),
        Column::new("d", ColumnType::Real),
    ])
    .unwrap();
    let table = Table::new(
        schema,
        vec![
            vec![Value::Real(1.0), Value::Real(0.0)],
            vec![Value::Real(1.0), Value::Real(2.0)],
        ],
    )
    .unwrap();

    let derived = derive_ratio(&table, "n", "d", "ratio", OnUndefined::KeepAsMissing).unwrap();
    assert_eq!(derived.height(), 2);
    assert_eq!(derived.value(0, 2), &Value::Missing);
    assert_eq!(derived.value(1, 2), &Value::Real(0.5));
}

#[test]
fn derive_ratio_requires_numeric_operands() {
    let schema = Schema::new(vec![
        Column::new("n", ColumnType::Text),
        Column::new("d", ColumnType::Real),
    ])
    .unwrap();
    let table = Table::empty(schema);
    let err = derive_ratio(&table, "n", "d", "ratio", OnUndefined::Drop).unwrap_err();
    assert!(matches!(err, TableError::TypeMismatch { .. }));
}
