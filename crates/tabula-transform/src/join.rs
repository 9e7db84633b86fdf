//! Relational joins on shared key tuples.

use std::collections::{HashMap, HashSet};

use tabula_model::{Column, KeyAtom, Result, Schema, Table, TableError, Value};

/// Join kind: `Inner` keeps matched pairs only; `Left` keeps every left row
/// at least once, with right-side columns missing when unmatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
}

struct KeyPlan {
    left: Vec<usize>,
    right: Vec<usize>,
}

fn key_plan(left: &Table, right: &Table, key_columns: &[&str]) -> Result<KeyPlan> {
    let mut plan = KeyPlan {
        left: Vec::with_capacity(key_columns.len()),
        right: Vec::with_capacity(key_columns.len()),
    };
    for name in key_columns {
        let left_idx = left.schema().require(name)?;
        let right_idx = right.schema().require(name)?;
        let left_ty = left.schema().column(left_idx).ty;
        let right_ty = right.schema().column(right_idx).ty;
        if left_ty != right_ty {
            // Callers coerce mismatched key types explicitly before joining.
            return Err(TableError::TypeMismatch {
                column: (*name).to_string(),
                expected: left_ty,
                found: right_ty,
            });
        }
        plan.left.push(left_idx);
        plan.right.push(right_idx);
    }
    Ok(plan)
}

/// Key tuple for a row, or `None` when any part is missing — a missing key
/// never matches anything, on either side.
fn key_of(row: &[Value], indices: &[usize]) -> Option<Vec<KeyAtom>> {
    let mut key = Vec::with_capacity(indices.len());
    for &idx in indices {
        if row[idx].is_missing() {
            return None;
        }
        key.push(row[idx].key_atom());
    }
    Some(key)
}

/// Joins two tables on the named key columns.
///
/// Rows match when every key column's value is equal; missing never matches
/// missing. Non-unique keys fan out to the full cross product of matching
/// rows. The output carries all left columns plus the right table's non-key
/// columns; a right column whose name collides with a left column is a
/// schema error.
pub fn join(left: &Table, right: &Table, key_columns: &[&str], kind: JoinKind) -> Result<Table> {
    let plan = key_plan(left, right, key_columns)?;

    let right_extra: Vec<usize> = (0..right.schema().len())
        .filter(|idx| !plan.right.contains(idx))
        .collect();
    let mut columns: Vec<Column> = left.schema().columns().to_vec();
    for &idx in &right_extra {
        columns.push(right.schema().column(idx).clone());
    }
    let schema = Schema::new(columns)?;

    let mut right_index: HashMap<Vec<KeyAtom>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows().iter().enumerate() {
        if let Some(key) = key_of(row, &plan.right) {
            right_index.entry(key).or_default().push(row_idx);
        }
    }

    let mut rows = Vec::new();
    for row in left.rows() {
        let matches = key_of(row, &plan.left)
            .and_then(|key| right_index.get(&key))
            .map(Vec::as_slice)
            .unwrap_or(&[]);
        if matches.is_empty() {
            if kind == JoinKind::Left {
                let mut cells = row.clone();
                cells.extend(right_extra.iter().map(|_| Value::Missing));
                rows.push(cells);
            }
            continue;
        }
        for &right_row in matches {
            let mut cells = row.clone();
            cells.extend(
                right_extra
                    .iter()
                    .map(|&idx| right.value(right_row, idx).clone()),
            );
            rows.push(cells);
        }
    }
    Table::new(schema, rows)
}

/// Restricts `table` to rows whose key tuple appears in `other`, adding no
/// columns from it. Rows with a missing key part are dropped.
pub fn semi_join(table: &Table, other: &Table, key_columns: &[&str]) -> Result<Table> {
    let plan = key_plan(table, other, key_columns)?;

    let mut keys: HashSet<Vec<KeyAtom>> = HashSet::new();
    for row in other.rows() {
        if let Some(key) = key_of(row, &plan.right) {
            keys.insert(key);
        }
    }

    let rows = table
        .rows()
        .iter()
        .filter(|row| {
            key_of(row, &plan.left)
                .map(|key| keys.contains(&key))
                .unwrap_or(false)
        })
        .cloned()
        .collect();
    Table::new(table.schema().clone(), rows)
}
