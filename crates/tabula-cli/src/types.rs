use std::path::PathBuf;

/// Machine-readable record of one pipeline run, written next to the CSV
/// snapshots as `summary.json`.
#[derive(Debug, serde::Serialize)]
pub struct RunSummary {
    pub report: String,
    pub output_dir: PathBuf,
    pub tables: Vec<TableSummary>,
}

#[derive(Debug, serde::Serialize)]
pub struct TableSummary {
    pub name: String,
    pub rows: usize,
    pub path: PathBuf,
}
