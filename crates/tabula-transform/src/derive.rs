//! Derived ratio metrics.

use tabula_model::{Column, ColumnType, Result, Schema, Table, TableError, Value};

/// Policy for rows where the ratio is undefined: denominator zero, or either
/// operand missing.
///
/// Both source reports filter such rows out before averaging grouped metrics,
/// so `Drop` is the default; `KeepAsMissing` keeps the row with a missing
/// output instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OnUndefined {
    #[default]
    Drop,
    KeepAsMissing,
}

/// Appends `output` = `numerator` / `denominator`, applying `on_undefined`
/// where the ratio is undefined. Both operands must be numeric columns.
pub fn derive_ratio(
    table: &Table,
    numerator: &str,
    denominator: &str,
    output: &str,
    on_undefined: OnUndefined,
) -> Result<Table> {
    let num_idx = table.schema().require(numerator)?;
    let den_idx = table.schema().require(denominator)?;
    for idx in [num_idx, den_idx] {
        let column = table.schema().column(idx);
        if !column.ty.is_numeric() {
            return Err(TableError::TypeMismatch {
                column: column.name.clone(),
                expected: ColumnType::Real,
                found: column.ty,
            });
        }
    }

    let mut columns: Vec<Column> = table.schema().columns().to_vec();
    columns.push(Column::new(output, ColumnType::Real));
    let schema = Schema::new(columns)?;

    let mut rows = Vec::with_capacity(table.height());
    for row in table.rows() {
        let ratio = match (row[num_idx].as_f64(), row[den_idx].as_f64()) {
            (Some(num), Some(den)) if den != 0.0 => Some(num / den),
            _ => None,
        };
        match (ratio, on_undefined) {
            (Some(value), _) => {
                let mut cells = row.clone();
                cells.push(Value::Real(value));
                rows.push(cells);
            }
            (None, OnUndefined::KeepAsMissing) => {
                let mut cells = row.clone();
                cells.push(Value::Missing);
                rows.push(cells);
            }
            (None, OnUndefined::Drop) => {}
        }
    }
    Table::new(schema, rows)
}
