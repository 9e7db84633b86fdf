//! Subcommand implementations.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use tabula_ingest::write_delimited;
use tabula_model::Table;
use tabula_report::imdb::{self, ImdbOptions};
use tabula_report::transit::{self, TransitOptions};

use crate::cli::{ImdbArgs, TransitArgs};
use crate::summary::print_table;
use crate::types::{RunSummary, TableSummary};

pub fn run_transit(args: &TransitArgs) -> Result<RunSummary> {
    let options = TransitOptions::from_data_dir(&args.data_dir);
    let report = transit::run(&options)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.data_dir.join("output"));

    export_report(
        "transit",
        &output_dir,
        &[
            ("monthly_ridership", &report.monthly_ridership),
            ("metrics", &report.metrics),
            ("mode_summary", &report.mode_summary),
        ],
        args.top,
    )
}

pub fn run_imdb(args: &ImdbArgs) -> Result<RunSummary> {
    let mut options = ImdbOptions::new(&args.cache_dir);
    options.fetch = !args.no_fetch;
    options.min_votes = args.min_votes;
    options.min_titles = args.min_titles;
    options.min_episodes = args.min_episodes;
    options.classic_year = args.classic_year;
    options.success_threshold = args.success_threshold;

    let report = imdb::run(&options)?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| args.cache_dir.join("output"));

    export_report(
        "imdb",
        &output_dir,
        &[
            ("rated_titles", &report.rated_titles),
            ("personnel", &report.personnel),
            ("series", &report.series),
            ("classics", &report.classics),
        ],
        args.top,
    )
}

/// Writes every result table as a CSV snapshot plus a JSON run summary, and
/// renders the top rows of each table to the terminal.
fn export_report(
    report: &str,
    output_dir: &Path,
    tables: &[(&str, &Table)],
    top: usize,
) -> Result<RunSummary> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create output dir {}", output_dir.display()))?;

    let mut summaries = Vec::with_capacity(tables.len());
    for (name, table) in tables {
        let path = output_dir.join(format!("{name}.csv"));
        write_delimited(table, &path, b',')
            .with_context(|| format!("write {name} snapshot"))?;
        info!(table = name, rows = table.height(), path = %path.display(), "wrote snapshot");
        print_table(name, table, top);
        summaries.push(TableSummary {
            name: (*name).to_string(),
            rows: table.height(),
            path,
        });
    }

    let summary = RunSummary {
        report: report.to_string(),
        output_dir: output_dir.to_path_buf(),
        tables: summaries,
    };
    let json_path = output_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary).context("serialize run summary")?;
    fs::write(&json_path, json)
        .with_context(|| format!("write {}", json_path.display()))?;
    Ok(summary)
}
