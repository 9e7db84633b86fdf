use std::collections::BTreeMap;

use anyhow::{Context, Result, anyhow};
use tracing::debug;

use tabula_model::Table;

/// Named intermediate tables produced while a pipeline runs.
///
/// Tables are immutable values, so one intermediate can feed several
/// downstream steps without copies being observable.
#[derive(Debug, Default)]
pub struct PipelineContext {
    tables: BTreeMap<String, Table>,
}

impl PipelineContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores an intermediate under `name`, replacing any previous binding.
    pub fn insert(&mut self, name: impl Into<String>, table: Table) {
        let name = name.into();
        debug!(table = %name, rows = table.height(), "stored intermediate");
        self.tables.insert(name, table);
    }

    /// Borrows an intermediate; the error names the missing table.
    pub fn get(&self, name: &str) -> Result<&Table> {
        self.tables
            .get(name)
            .ok_or_else(|| anyhow!("no intermediate table named '{name}'"))
    }

    /// Removes and returns an intermediate (used to extract final outputs).
    pub fn take(&mut self, name: &str) -> Result<Table> {
        self.tables
            .remove(name)
            .with_context(|| format!("no intermediate table named '{name}'"))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
