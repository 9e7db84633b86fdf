//! Group-by/summarize.

use std::collections::HashMap;

use tabula_model::{Column, ColumnType, KeyAtom, Result, Schema, Table, TableError, Value};

use crate::transforms::compare_values;

/// A named reduction over a partition's non-missing values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    Count,
    Min,
    Max,
    First,
}

/// One output column of a [`group_summarize`] call.
#[derive(Debug, Clone)]
pub struct ReductionSpec {
    pub output: String,
    pub source: String,
    pub kind: Reduction,
}

impl ReductionSpec {
    pub fn new(output: impl Into<String>, source: impl Into<String>, kind: Reduction) -> Self {
        Self {
            output: output.into(),
            source: source.into(),
            kind,
        }
    }
}

/// Partitions rows by the key tuple and reduces each partition to one row.
///
/// Partition order is the first appearance of each distinct key tuple, so
/// output is deterministic; no further ordering is implied — callers sort
/// explicitly. Reductions see non-missing values only: the sum or mean of an
/// all-missing partition is missing, never zero, and `Count` counts
/// non-missing values. A missing key value forms its own partition.
pub fn group_summarize(
    table: &Table,
    key_columns: &[&str],
    reductions: &[ReductionSpec],
) -> Result<Table> {
    let mut key_indices = Vec::with_capacity(key_columns.len());
    let mut columns: Vec<Column> = Vec::with_capacity(key_columns.len() + reductions.len());
    for name in key_columns {
        let idx = table.schema().require(name)?;
        key_indices.push(idx);
        columns.push(table.schema().column(idx).clone());
    }

    let mut source_indices = Vec::with_capacity(reductions.len());
    for spec in reductions {
        let idx = table.schema().require(&spec.source)?;
        let source_ty = table.schema().column(idx).ty;
        if matches!(spec.kind, Reduction::Sum | Reduction::Mean) && !source_ty.is_numeric() {
            return Err(TableError::TypeMismatch {
                column: spec.source.clone(),
                expected: ColumnType::Real,
                found: source_ty,
            });
        }
        source_indices.push(idx);
        columns.push(Column::new(spec.output.clone(), output_type(spec.kind, source_ty)));
    }
    let schema = Schema::new(columns)?;

    // Partitions in first-appearance order.
    let mut seen: HashMap<Vec<KeyAtom>, usize> = HashMap::new();
    let mut partitions: Vec<(Vec<Value>, Vec<usize>)> = Vec::new();
    for (row_idx, row) in table.rows().iter().enumerate() {
        let key: Vec<KeyAtom> = key_indices.iter().map(|&idx| row[idx].key_atom()).collect();
        match seen.get(&key) {
            Some(&partition) => partitions[partition].1.push(row_idx),
            None => {
                seen.insert(key, partitions.len());
                let key_values = key_indices.iter().map(|&idx| row[idx].clone()).collect();
                partitions.push((key_values, vec![row_idx]));
            }
        }
    }

    let mut rows = Vec::with_capacity(partitions.len());
    for (key_values, members) in partitions {
        let mut cells = key_values;
        for (spec, &source_idx) in reductions.iter().zip(&source_indices) {
            let values: Vec<&Value> = members
                .iter()
                .map(|&row_idx| table.value(row_idx, source_idx))
                .filter(|value| !value.is_missing())
                .collect();
            cells.push(reduce(spec.kind, table.schema().column(source_idx).ty, &values));
        }
        rows.push(cells);
    }
    Table::new(schema, rows)
}

fn output_type(kind: Reduction, source_ty: ColumnType) -> ColumnType {
    match kind {
        Reduction::Sum | Reduction::Min | Reduction::Max | Reduction::First => source_ty,
        Reduction::Mean => ColumnType::Real,
        Reduction::Count => ColumnType::Integer,
    }
}

fn reduce(kind: Reduction, source_ty: ColumnType, values: &[&Value]) -> Value {
    match kind {
        Reduction::Count => Value::Int(values.len() as i64),
        Reduction::Sum => {
            if values.is_empty() {
                return Value::Missing;
            }
            match source_ty {
                ColumnType::Integer => {
                    Value::Int(values.iter().filter_map(|v| v.as_i64()).sum())
                }
                _ => Value::Real(values.iter().filter_map(|v| v.as_f64()).sum()),
            }
        }
        Reduction::Mean => {
            if values.is_empty() {
                return Value::Missing;
            }
            let sum: f64 = values.iter().filter_map(|v| v.as_f64()).sum();
            Value::Real(sum / values.len() as f64)
        }
        Reduction::Min => pick_extreme(values, std::cmp::Ordering::Less),
        Reduction::Max => pick_extreme(values, std::cmp::Ordering::Greater),
        Reduction::First => values.first().map_or(Value::Missing, |v| (*v).clone()),
    }
}

fn pick_extreme(values: &[&Value], keep: std::cmp::Ordering) -> Value {
    let mut best: Option<&Value> = None;
    for &value in values {
        best = match best {
            None => Some(value),
            Some(current) => {
                if compare_values(value, current) == keep {
                    Some(value)
                } else {
                    Some(current)
                }
            }
        };
    }
    best.map_or(Value::Missing, Clone::clone)
}
