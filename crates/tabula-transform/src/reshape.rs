//! Wide-to-long reshaping.

use tabula_model::{Column, ColumnType, Result, Schema, Table, TableError, Value};

/// Stacks every column not named in `id_columns` into two columns: one
/// holding the stacked column's name and one holding its value.
///
/// Converts a month-per-column ridership layout into one row per
/// (entity, month). Cells with a missing value produce no output row. All
/// stacked columns must share one declared type.
pub fn pivot_longer(
    table: &Table,
    id_columns: &[&str],
    name_column: &str,
    value_column: &str,
) -> Result<Table> {
    let mut id_indices = Vec::with_capacity(id_columns.len());
    for name in id_columns {
        id_indices.push(table.schema().require(name)?);
    }

    let mut stacked: Vec<usize> = Vec::new();
    let mut value_type: Option<ColumnType> = None;
    for (idx, column) in table.schema().columns().iter().enumerate() {
        if id_indices.contains(&idx) {
            continue;
        }
        match value_type {
            None => value_type = Some(column.ty),
            Some(expected) if expected != column.ty => {
                return Err(TableError::TypeMismatch {
                    column: column.name.clone(),
                    expected,
                    found: column.ty,
                });
            }
            Some(_) => {}
        }
        stacked.push(idx);
    }
    let value_type = value_type.unwrap_or(ColumnType::Text);

    let mut columns: Vec<Column> = id_indices
        .iter()
        .map(|&idx| table.schema().column(idx).clone())
        .collect();
    columns.push(Column::new(name_column, ColumnType::Text));
    columns.push(Column::new(value_column, value_type));
    let schema = Schema::new(columns)?;

    let mut rows = Vec::new();
    for row in table.rows() {
        for &col_idx in &stacked {
            let value = &row[col_idx];
            if value.is_missing() {
                continue;
            }
            let mut cells: Vec<Value> = id_indices.iter().map(|&idx| row[idx].clone()).collect();
            cells.push(Value::Text(table.schema().column(col_idx).name.clone()));
            cells.push(value.clone());
            rows.push(cells);
        }
    }
    Table::new(schema, rows)
}
