//! Tabular data ingestion.
//!
//! This crate turns external sources into typed [`tabula_model::Table`]s:
//!
//! - **source**: source identifiers (delimited file, worksheet)
//! - **loader**: column subsetting and typed parsing, wide-layout reading
//! - **delimited**: csv reading and snapshot writing
//! - **sheet**: xlsx worksheets via calamine
//! - **fetch**: download-once remote caching

#![deny(unsafe_code)]

pub mod delimited;
pub mod error;
pub mod fetch;
pub mod loader;
pub mod sheet;
pub mod source;

pub use delimited::write_delimited;
pub use error::{IngestError, Result};
pub use fetch::ensure_cached;
pub use loader::{ColumnSpec, ReadOptions, read_table, read_table_wide};
pub use source::SourceSpec;
