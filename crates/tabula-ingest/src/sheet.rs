//! Spreadsheet sheet reading via calamine.
//!
//! The first worksheet row is treated as the header. Cells are normalized to
//! text before typed parsing so numeric cells round-trip without a spurious
//! fractional part.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};

use tabula_model::format_numeric;

use crate::error::{IngestError, Result};
use crate::loader::RawTable;

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_numeric(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Error(_) => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn read_raw_sheet(path: &Path, sheet: Option<&str>) -> Result<RawTable> {
    if !path.exists() {
        return Err(IngestError::SourceNotFound {
            path: path.to_path_buf(),
        });
    }
    let sheet_error = |sheet: &str, message: String| IngestError::Sheet {
        path: path.to_path_buf(),
        sheet: sheet.to_string(),
        message,
    };
    let mut workbook: Xlsx<_> =
        open_workbook(path).map_err(|e: calamine::XlsxError| sheet_error(sheet.unwrap_or("?"), e.to_string()))?;
    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| sheet_error("?", "workbook has no sheets".to_string()))?,
    };
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| sheet_error(&sheet_name, e.to_string()))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = match rows_iter.next() {
        Some(row) => row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };
    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable {
        source_id: format!("{}#{sheet_name}", path.display()),
        headers,
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(40080.0)), "40080");
        assert_eq!(cell_to_string(&Data::Float(1.25)), "1.25");
    }

    #[test]
    fn empty_and_error_cells_render_empty() {
        assert_eq!(cell_to_string(&Data::Empty), "");
    }
}
