use std::collections::BTreeMap;

use crate::error::{Result, TableError};
use crate::value::ColumnType;

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered set of uniquely named columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
    index: BTreeMap<String, usize>,
}

impl Schema {
    /// Builds a schema, rejecting duplicate column names.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (idx, column) in columns.iter().enumerate() {
            if index.insert(column.name.clone(), idx).is_some() {
                return Err(TableError::DuplicateColumn {
                    column: column.name.clone(),
                });
            }
        }
        Ok(Self { columns, index })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Index of a column that must exist.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.index_of(name).ok_or_else(|| TableError::MissingColumn {
            column: name.to_string(),
        })
    }

    pub fn column(&self, idx: usize) -> &Column {
        &self.columns[idx]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_names() {
        let err = Schema::new(vec![
            Column::new("a", ColumnType::Text),
            Column::new("a", ColumnType::Integer),
        ])
        .unwrap_err();
        assert!(matches!(err, TableError::DuplicateColumn { column } if column == "a"));
    }

    #[test]
    fn lookup_by_name() {
        let schema = Schema::new(vec![
            Column::new("id", ColumnType::Integer),
            Column::new("mode", ColumnType::Categorical),
        ])
        .unwrap();
        assert_eq!(schema.index_of("mode"), Some(1));
        assert_eq!(schema.index_of("absent"), None);
        assert!(schema.require("absent").is_err());
    }
}
