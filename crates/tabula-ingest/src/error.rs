//! Error types for data ingestion.

use std::path::PathBuf;

use thiserror::Error;

use tabula_model::{ColumnType, TableError};

/// Errors that can occur while loading or caching tabular sources.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Source file not found or unreachable.
    #[error("source not found: {path}")]
    SourceNotFound { path: PathBuf },

    /// Remote fetch failed.
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    /// Failed to read or write a local file.
    #[error("failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a delimited file.
    #[error("failed to parse {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to open a workbook or worksheet.
    #[error("failed to read sheet '{sheet}' in {path}: {message}")]
    Sheet {
        path: PathBuf,
        sheet: String,
        message: String,
    },

    /// A requested column is absent from the source header.
    #[error("column '{column}' not found in {source_id}")]
    MissingColumn { column: String, source_id: String },

    /// A non-missing cell does not parse as its declared type.
    #[error("cannot parse '{value}' as {ty} in column '{column}' of {source_id} (row {row})")]
    Parse {
        source_id: String,
        column: String,
        row: usize,
        value: String,
        ty: ColumnType,
    },

    /// Failed to write a delimited snapshot.
    #[error("failed to write snapshot {path}: {source}")]
    Snapshot {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Schema/table construction failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

pub type Result<T> = std::result::Result<T, IngestError>;
