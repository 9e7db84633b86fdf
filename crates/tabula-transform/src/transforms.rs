//! Row and column transforms.
//!
//! Every function takes a table by reference and returns a new table; inputs
//! are never mutated. Failures are schema errors (unknown or colliding
//! columns) or type errors; recoding by design never fails on unrecognized
//! input values.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use tabula_model::{Column, ColumnType, Result, RowView, Schema, Table, TableError, Value};

/// Keeps only rows satisfying the predicate; order is preserved.
pub fn filter_rows<F>(table: &Table, predicate: F) -> Result<Table>
where
    F: Fn(&RowView<'_>) -> bool,
{
    let rows = table
        .iter_rows()
        .filter(|row| predicate(row))
        .map(|row| row.cells().to_vec())
        .collect();
    Table::new(table.schema().clone(), rows)
}

/// Renames columns per the `(old, new)` mapping.
///
/// Fails if a source name is absent or the renaming would collide with an
/// existing column.
pub fn rename_columns(table: &Table, mapping: &[(&str, &str)]) -> Result<Table> {
    let mut columns: Vec<Column> = table.schema().columns().to_vec();
    for (old, new) in mapping {
        let idx = table.schema().require(old)?;
        columns[idx].name = (*new).to_string();
    }
    let schema = Schema::new(columns)?;
    Table::new(schema, table.rows().to_vec())
}

/// A total categorical recode: a finite code → label mapping plus a default
/// label for codes absent from the mapping.
#[derive(Debug, Clone)]
pub struct Recode {
    map: BTreeMap<String, String>,
    default: String,
}

impl Recode {
    pub fn new(default: impl Into<String>) -> Self {
        Self {
            map: BTreeMap::new(),
            default: default.into(),
        }
    }

    pub fn entry(mut self, code: &str, label: &str) -> Self {
        self.map.insert(code.to_string(), label.to_string());
        self
    }

    pub fn from_pairs(pairs: &[(&str, &str)], default: &str) -> Self {
        pairs
            .iter()
            .fold(Self::new(default), |recode, (code, label)| {
                recode.entry(code, label)
            })
    }

    /// Label for a raw code; unmapped codes get the default label.
    pub fn apply(&self, raw: &str) -> &str {
        self.map.get(raw).map_or(self.default.as_str(), String::as_str)
    }
}

/// Replaces `column`'s values per the recode mapping. Missing stays missing;
/// every unmapped value becomes the default, so unrecognized input is never
/// an error. The column's declared type becomes categorical.
pub fn recode(table: &Table, column: &str, mapping: &Recode) -> Result<Table> {
    let idx = table.schema().require(column)?;
    let ty = table.schema().column(idx).ty;
    if !matches!(ty, ColumnType::Text | ColumnType::Categorical) {
        return Err(TableError::TypeMismatch {
            column: column.to_string(),
            expected: ColumnType::Categorical,
            found: ty,
        });
    }
    table.with_column(column, ColumnType::Categorical, |row| {
        match row.value(column) {
            Some(Value::Text(raw)) => Value::Text(mapping.apply(raw).to_string()),
            _ => Value::Missing,
        }
    })
}

/// Removes every row containing a missing value in any column.
pub fn drop_missing(table: &Table) -> Result<Table> {
    filter_rows(table, |row| !row.cells().iter().any(Value::is_missing))
}

/// Coerces `column` to the target declared type.
///
/// Used before joins when the same key is typed differently across extracts
/// (e.g. transit ids stored as text in one file and integers in another).
/// A non-missing value that cannot be represented in the target type fails.
pub fn coerce_column(table: &Table, column: &str, target: ColumnType) -> Result<Table> {
    let idx = table.schema().require(column)?;
    let mut values = Vec::with_capacity(table.height());
    for row in table.rows() {
        values.push(coerce_value(&row[idx], column, target)?);
    }
    table.with_column_values(column, target, values)
}

fn coerce_value(value: &Value, column: &str, target: ColumnType) -> Result<Value> {
    let fail = || TableError::Coerce {
        column: column.to_string(),
        value: value.render(),
        target,
    };
    if value.is_missing() {
        return Ok(Value::Missing);
    }
    match target {
        ColumnType::Integer => match value {
            Value::Int(v) => Ok(Value::Int(*v)),
            Value::Real(v) if v.fract() == 0.0 => Ok(Value::Int(*v as i64)),
            Value::Text(s) => s.trim().parse::<i64>().map(Value::Int).map_err(|_| fail()),
            _ => Err(fail()),
        },
        ColumnType::Real => match value {
            Value::Int(v) => Ok(Value::Real(*v as f64)),
            Value::Real(v) => Ok(Value::Real(*v)),
            Value::Text(s) => s.trim().parse::<f64>().map(Value::Real).map_err(|_| fail()),
            _ => Err(fail()),
        },
        ColumnType::Text | ColumnType::Categorical => Ok(Value::Text(value.render())),
        ColumnType::Date => Err(fail()),
    }
}

/// Sort direction for [`sort_by`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Stable sort by one column. Missing values sort last in either direction.
pub fn sort_by(table: &Table, column: &str, direction: SortDirection) -> Result<Table> {
    let idx = table.schema().require(column)?;
    let mut rows = table.rows().to_vec();
    rows.sort_by(|a, b| {
        let (va, vb) = (&a[idx], &b[idx]);
        match (va.is_missing(), vb.is_missing()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => {
                let ord = compare_values(va, vb);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
        }
    });
    Table::new(table.schema().clone(), rows)
}

/// Ordering of two non-missing values of the same column.
pub(crate) fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x.cmp(y),
        (Value::Text(x), Value::Text(y)) => x.cmp(y),
        (Value::Date(x), Value::Date(y)) => x.cmp(y),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            _ => Ordering::Equal,
        },
    }
}
