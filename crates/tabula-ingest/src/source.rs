use std::path::{Path, PathBuf};

/// Identifies a tabular source: a delimited file or a spreadsheet sheet.
#[derive(Debug, Clone)]
pub enum SourceSpec {
    Delimited { path: PathBuf, delimiter: u8 },
    Sheet { path: PathBuf, sheet: Option<String> },
}

impl SourceSpec {
    pub fn csv(path: impl Into<PathBuf>) -> Self {
        SourceSpec::Delimited {
            path: path.into(),
            delimiter: b',',
        }
    }

    pub fn tsv(path: impl Into<PathBuf>) -> Self {
        SourceSpec::Delimited {
            path: path.into(),
            delimiter: b'\t',
        }
    }

    /// A worksheet by name; `None` selects the workbook's first sheet.
    pub fn sheet(path: impl Into<PathBuf>, sheet: Option<&str>) -> Self {
        SourceSpec::Sheet {
            path: path.into(),
            sheet: sheet.map(str::to_string),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            SourceSpec::Delimited { path, .. } | SourceSpec::Sheet { path, .. } => path,
        }
    }

    /// Identifier used in error messages, e.g. `ridership.xlsx#UPT`.
    pub fn id(&self) -> String {
        match self {
            SourceSpec::Delimited { path, .. } => path.display().to_string(),
            SourceSpec::Sheet { path, sheet } => match sheet {
                Some(name) => format!("{}#{name}", path.display()),
                None => path.display().to_string(),
            },
        }
    }
}
