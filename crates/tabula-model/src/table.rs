//! Immutable table values.
//!
//! A [`Table`] is an ordered set of named, typed columns plus a sequence of
//! rows. Tables are never mutated in place: every operation returns a new
//! table, so an intermediate result can safely feed several downstream
//! queries.

use crate::error::{Result, TableError};
use crate::schema::{Column, Schema};
use crate::value::{ColumnType, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    schema: Schema,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table, checking that every row matches the schema width and
    /// every cell matches its column's declared type (or is missing).
    pub fn new(schema: Schema, rows: Vec<Vec<Value>>) -> Result<Self> {
        for (row_idx, row) in rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(TableError::RowWidth {
                    row: row_idx,
                    expected: schema.len(),
                    found: row.len(),
                });
            }
            for (col_idx, value) in row.iter().enumerate() {
                let column = schema.column(col_idx);
                if !value.matches(column.ty) {
                    return Err(TableError::TypeMismatch {
                        column: column.name.clone(),
                        expected: column.ty,
                        found: value.column_type().unwrap_or(column.ty),
                    });
                }
            }
        }
        Ok(Self { schema, rows })
    }

    /// An empty table over the given schema.
    pub fn empty(schema: Schema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn columns(&self) -> &[Column] {
        self.schema.columns()
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn value(&self, row: usize, col: usize) -> &Value {
        &self.rows[row][col]
    }

    pub fn row(&self, idx: usize) -> RowView<'_> {
        RowView {
            schema: &self.schema,
            cells: &self.rows[idx],
        }
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = RowView<'_>> {
        self.rows.iter().map(|cells| RowView {
            schema: &self.schema,
            cells,
        })
    }

    /// Keeps only the named columns, in the requested order. Values are
    /// carried over unchanged, so retained columns round-trip losslessly.
    pub fn select_columns(&self, names: &[&str]) -> Result<Table> {
        let mut indices = Vec::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let idx = self.schema.require(name)?;
            indices.push(idx);
            columns.push(self.schema.column(idx).clone());
        }
        let schema = Schema::new(columns)?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Ok(Table { schema, rows })
    }

    /// Returns a table with `name` computed per row. An existing column of
    /// the same name is replaced in place; otherwise the column is appended.
    pub fn with_column<F>(&self, name: &str, ty: ColumnType, f: F) -> Result<Table>
    where
        F: Fn(&RowView<'_>) -> Value,
    {
        let values: Vec<Value> = self.iter_rows().map(|row| f(&row)).collect();
        self.with_column_values(name, ty, values)
    }

    /// Returns a table with `name` set from precomputed values, one per row.
    pub fn with_column_values(
        &self,
        name: &str,
        ty: ColumnType,
        values: Vec<Value>,
    ) -> Result<Table> {
        if values.len() != self.height() {
            return Err(TableError::ColumnLength {
                column: name.to_string(),
                expected: self.height(),
                found: values.len(),
            });
        }
        for value in &values {
            if !value.matches(ty) {
                return Err(TableError::TypeMismatch {
                    column: name.to_string(),
                    expected: ty,
                    found: value.column_type().unwrap_or(ty),
                });
            }
        }
        let mut columns: Vec<Column> = self.schema.columns().to_vec();
        let existing = self.schema.index_of(name);
        match existing {
            Some(idx) => columns[idx] = Column::new(name, ty),
            None => columns.push(Column::new(name, ty)),
        }
        let schema = Schema::new(columns)?;
        let rows = self
            .rows
            .iter()
            .zip(values)
            .map(|(row, value)| {
                let mut cells = row.clone();
                match existing {
                    Some(idx) => cells[idx] = value,
                    None => cells.push(value),
                }
                cells
            })
            .collect();
        Ok(Table { schema, rows })
    }
}

/// Borrowed view of one row with name-based access.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    schema: &'a Schema,
    cells: &'a [Value],
}

impl<'a> RowView<'a> {
    pub fn schema(&self) -> &'a Schema {
        self.schema
    }

    pub fn cells(&self) -> &'a [Value] {
        self.cells
    }

    pub fn value(&self, name: &str) -> Option<&'a Value> {
        self.schema.index_of(name).map(|idx| &self.cells[idx])
    }

    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.value(name).and_then(Value::as_str)
    }

    pub fn f64(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(Value::as_f64)
    }

    pub fn i64(&self, name: &str) -> Option<i64> {
        self.value(name).and_then(Value::as_i64)
    }
}
