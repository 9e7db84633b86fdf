use thiserror::Error;

use crate::ColumnType;

/// Errors raised by schema and table operations.
#[derive(Debug, Error)]
pub enum TableError {
    /// A referenced column does not exist in the schema.
    #[error("column '{column}' not found")]
    MissingColumn { column: String },

    /// Two columns would share the same name.
    #[error("duplicate column '{column}'")]
    DuplicateColumn { column: String },

    /// A row does not match the schema width.
    #[error("row {row} has {found} cells, schema has {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A column was supplied with the wrong number of values.
    #[error("column '{column}' has {found} values, table has {expected} rows")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// A value's type does not match the column's declared type.
    #[error("type mismatch in column '{column}': expected {expected}, found {found}")]
    TypeMismatch {
        column: String,
        expected: ColumnType,
        found: ColumnType,
    },

    /// A value could not be coerced to the requested type.
    #[error("cannot coerce '{value}' in column '{column}' to {target}")]
    Coerce {
        column: String,
        value: String,
        target: ColumnType,
    },
}

pub type Result<T> = std::result::Result<T, TableError>;
