//! Delimited file reading and snapshot writing.

use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};

use tabula_model::{Table, Value};

use crate::error::{IngestError, Result};
use crate::loader::RawTable;

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

pub(crate) fn read_raw_delimited(path: &Path, delimiter: u8) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_path(path)
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
    let headers: Vec<String> = reader
        .headers()
        .map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?
        .iter()
        .map(normalize_cell)
        .collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|source| IngestError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(RawTable {
        source_id: path.display().to_string(),
        headers,
        rows,
    })
}

/// Writes a table as a delimited snapshot. Missing values serialize as the
/// empty field.
pub fn write_delimited(table: &Table, path: &Path, delimiter: u8) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .map_err(|source| IngestError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    writer
        .write_record(table.schema().names())
        .map_err(|source| IngestError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;
    for row in table.rows() {
        let record: Vec<String> = row.iter().map(Value::render).collect();
        writer
            .write_record(&record)
            .map_err(|source| IngestError::Snapshot {
                path: path.to_path_buf(),
                source,
            })?;
    }
    writer.flush().map_err(|source| IngestError::FileAccess {
        path: path.to_path_buf(),
        source,
    })
}
