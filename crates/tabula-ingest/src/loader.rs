//! Typed table loading with column subsetting.
//!
//! A loader reads a raw source (delimited file or worksheet), keeps only the
//! requested columns, and parses text cells into the declared column types.
//! NA tokens become explicit missing values; any other unparsable cell is a
//! fail-fast error.

use chrono::NaiveDate;
use tracing::debug;

use tabula_model::{Column, ColumnType, Schema, Table, Value};

use crate::delimited::read_raw_delimited;
use crate::error::{IngestError, Result};
use crate::sheet::read_raw_sheet;
use crate::source::SourceSpec;

/// Raw, untyped source content: header names plus text rows.
#[derive(Debug, Clone)]
pub(crate) struct RawTable {
    pub source_id: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// A requested column: source header name plus declared type.
#[derive(Debug, Clone)]
pub struct ColumnSpec {
    pub name: String,
    pub ty: ColumnType,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Options controlling raw-cell interpretation.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Tokens treated as missing. IMDb dumps use `\N`; NTD extracts leave
    /// fields empty or write `NA`.
    pub na_values: Vec<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            na_values: vec![String::new(), "\\N".to_string(), "NA".to_string()],
        }
    }
}

impl ReadOptions {
    fn is_na(&self, raw: &str) -> bool {
        self.na_values.iter().any(|na| na == raw)
    }
}

/// Reads a source keeping only the requested columns, in the requested order.
pub fn read_table(
    source: &SourceSpec,
    columns: &[ColumnSpec],
    options: &ReadOptions,
) -> Result<Table> {
    let raw = read_raw(source)?;
    build_table(&raw, columns, options)
}

/// Reads a wide source: the requested id columns plus every remaining header
/// as a column of `value_type`. Used for month-per-column ridership layouts
/// where the value columns are not known up front.
pub fn read_table_wide(
    source: &SourceSpec,
    id_columns: &[ColumnSpec],
    value_type: ColumnType,
    options: &ReadOptions,
) -> Result<Table> {
    let raw = read_raw(source)?;
    let mut columns: Vec<ColumnSpec> = id_columns.to_vec();
    for header in &raw.headers {
        if header.is_empty() {
            continue;
        }
        if !id_columns.iter().any(|spec| &spec.name == header) {
            columns.push(ColumnSpec::new(header.clone(), value_type));
        }
    }
    build_table(&raw, &columns, options)
}

fn read_raw(source: &SourceSpec) -> Result<RawTable> {
    match source {
        SourceSpec::Delimited { path, delimiter } => read_raw_delimited(path, *delimiter),
        SourceSpec::Sheet { path, sheet } => read_raw_sheet(path, sheet.as_deref()),
    }
}

fn build_table(raw: &RawTable, columns: &[ColumnSpec], options: &ReadOptions) -> Result<Table> {
    let mut indices = Vec::with_capacity(columns.len());
    for spec in columns {
        let idx = raw
            .headers
            .iter()
            .position(|header| header == &spec.name)
            .ok_or_else(|| IngestError::MissingColumn {
                column: spec.name.clone(),
                source_id: raw.source_id.clone(),
            })?;
        indices.push(idx);
    }
    let schema = Schema::new(
        columns
            .iter()
            .map(|spec| Column::new(spec.name.clone(), spec.ty))
            .collect(),
    )?;

    let mut rows = Vec::with_capacity(raw.rows.len());
    for (row_idx, record) in raw.rows.iter().enumerate() {
        let mut cells = Vec::with_capacity(columns.len());
        for (spec, &col_idx) in columns.iter().zip(&indices) {
            let cell = record.get(col_idx).map(String::as_str).unwrap_or("");
            cells.push(parse_value(cell, spec, raw, row_idx, options)?);
        }
        rows.push(cells);
    }
    let table = Table::new(schema, rows)?;
    debug!(
        source = %raw.source_id,
        columns = columns.len(),
        rows = table.height(),
        "loaded table"
    );
    Ok(table)
}

fn parse_value(
    raw_cell: &str,
    spec: &ColumnSpec,
    raw: &RawTable,
    row_idx: usize,
    options: &ReadOptions,
) -> Result<Value> {
    if options.is_na(raw_cell) {
        return Ok(Value::Missing);
    }
    let parse_error = || IngestError::Parse {
        source_id: raw.source_id.clone(),
        column: spec.name.clone(),
        row: row_idx + 1,
        value: raw_cell.to_string(),
        ty: spec.ty,
    };
    match spec.ty {
        ColumnType::Integer => {
            if let Ok(v) = raw_cell.parse::<i64>() {
                return Ok(Value::Int(v));
            }
            // Spreadsheet extracts store ids as floats; accept whole numbers.
            match raw_cell.parse::<f64>() {
                Ok(v) if v.fract() == 0.0 => Ok(Value::Int(v as i64)),
                _ => Err(parse_error()),
            }
        }
        ColumnType::Real => {
            let cleaned = raw_cell.replace(',', "");
            cleaned
                .parse::<f64>()
                .map(Value::Real)
                .map_err(|_| parse_error())
        }
        ColumnType::Text | ColumnType::Categorical => Ok(Value::Text(raw_cell.to_string())),
        ColumnType::Date => NaiveDate::parse_from_str(raw_cell, "%Y-%m-%d")
            .map(Value::Date)
            .map_err(|_| parse_error()),
    }
}
