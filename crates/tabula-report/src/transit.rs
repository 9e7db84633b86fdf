//! Transit financial-efficiency report.
//!
//! Joins the 2022 NTD fare revenue, operating expense, and monthly ridership
//! extracts into one table per (agency, mode), then derives the standard
//! efficiency ratios: farebox recovery, cost per trip/mile, fares per
//! trip/mile. Rows whose ratios are undefined (zero or absent denominators)
//! are dropped before any averaging, so mode-level means never see infinities.

use std::path::Path;

use anyhow::{Context, Result};

use tabula_ingest::{ColumnSpec, ReadOptions, SourceSpec, read_table, read_table_wide};
use tabula_model::{ColumnType, Table};
use tabula_pipeline::{Pipeline, PipelineContext};
use tabula_transform::{
    JoinKind, OnUndefined, Reduction, ReductionSpec, SortDirection, coerce_column, derive_ratio,
    filter_rows, group_summarize, join, pivot_longer, recode, rename_columns, sort_by,
};

use crate::modes::{EARNED_FARES, mode_labels};

/// Source locations for the three NTD extracts.
#[derive(Debug, Clone)]
pub struct TransitOptions {
    pub fares: SourceSpec,
    pub expenses: SourceSpec,
    pub upt: SourceSpec,
    pub vrm: SourceSpec,
}

impl TransitOptions {
    /// Conventional extract layout inside one data directory.
    pub fn from_data_dir(dir: &Path) -> Self {
        let ridership = dir.join("ridership.xlsx");
        Self {
            fares: SourceSpec::sheet(dir.join("2022_fare_revenue.xlsx"), None),
            expenses: SourceSpec::csv(dir.join("2022_expenses.csv")),
            upt: SourceSpec::sheet(&ridership, Some("UPT")),
            vrm: SourceSpec::sheet(ridership, Some("VRM")),
        }
    }
}

/// Output tables of the transit pipeline.
#[derive(Debug, Clone)]
pub struct TransitReport {
    /// Monthly (agency, mode, month) ridership observations.
    pub monthly_ridership: Table,
    /// Per-(agency, mode) financials with derived efficiency metrics.
    pub metrics: Table,
    /// Mode-level means of every metric.
    pub mode_summary: Table,
}

const METRICS: [(&str, &str, &str); 5] = [
    ("total_fares", "total_expenses", "farebox_recovery"),
    ("total_expenses", "upt", "cost_per_trip"),
    ("total_expenses", "vrm", "cost_per_mile"),
    ("total_fares", "upt", "fares_per_trip"),
    ("total_fares", "vrm", "fares_per_mile"),
];

/// Runs the transit report pipeline.
pub fn run(options: &TransitOptions) -> Result<TransitReport> {
    let mut ctx = PipelineContext::new();
    build_pipeline(options).run(&mut ctx)?;
    let report = TransitReport {
        monthly_ridership: ctx.take("ridership_monthly")?,
        metrics: ctx.take("metrics")?,
        mode_summary: ctx.take("mode_summary")?,
    };
    tracing::info!(
        agency_modes = report.metrics.height(),
        modes = report.mode_summary.height(),
        "transit report complete"
    );
    Ok(report)
}

fn build_pipeline(options: &TransitOptions) -> Pipeline {
    let read = ReadOptions::default();

    let fares_source = options.fares.clone();
    let fares_read = read.clone();
    let expenses_source = options.expenses.clone();
    let expenses_read = read.clone();
    let upt_source = options.upt.clone();
    let vrm_source = options.vrm.clone();

    Pipeline::new("transit")
        .step("load fare revenue", move |ctx| {
            let raw = read_table(
                &fares_source,
                &[
                    ColumnSpec::new("NTD ID", ColumnType::Integer),
                    ColumnSpec::new("Agency Name", ColumnType::Text),
                    ColumnSpec::new("Mode", ColumnType::Categorical),
                    ColumnSpec::new("Expense Type", ColumnType::Categorical),
                    ColumnSpec::new("Total Fares", ColumnType::Real),
                ],
                &fares_read,
            )?;
            let renamed = rename_columns(
                &raw,
                &[
                    ("NTD ID", "ntd_id"),
                    ("Agency Name", "agency"),
                    ("Mode", "mode"),
                    ("Expense Type", "expense_type"),
                    ("Total Fares", "total_fares"),
                ],
            )?;
            ctx.insert("fares_raw", renamed);
            Ok(())
        })
        .step("keep earned fare revenue", |ctx| {
            let raw = ctx.get("fares_raw")?;
            let earned = filter_rows(raw, |row| row.text("expense_type") == Some(EARNED_FARES))?;
            ctx.insert("fares_earned", earned);
            Ok(())
        })
        .step("total fares per agency and mode", |ctx| {
            let earned = ctx.get("fares_earned")?;
            let fares = group_summarize(
                earned,
                &["ntd_id", "mode"],
                &[
                    ReductionSpec::new("agency", "agency", Reduction::First),
                    ReductionSpec::new("total_fares", "total_fares", Reduction::Sum),
                ],
            )?;
            ctx.insert("fares", fares);
            Ok(())
        })
        .step("load operating expenses", move |ctx| {
            let raw = read_table(
                &expenses_source,
                &[
                    // Ids arrive as text in this extract; coerced below so the
                    // join key types line up with the fare revenue extract.
                    ColumnSpec::new("NTD ID", ColumnType::Text),
                    ColumnSpec::new("Mode", ColumnType::Categorical),
                    ColumnSpec::new("Total", ColumnType::Real),
                ],
                &expenses_read,
            )?;
            let renamed = rename_columns(
                &raw,
                &[("NTD ID", "ntd_id"), ("Mode", "mode"), ("Total", "total_expenses")],
            )?;
            let coerced = coerce_column(&renamed, "ntd_id", ColumnType::Integer)?;
            ctx.insert("expenses_raw", coerced);
            Ok(())
        })
        .step("total expenses per agency and mode", |ctx| {
            let raw = ctx.get("expenses_raw")?;
            let expenses = group_summarize(
                raw,
                &["ntd_id", "mode"],
                &[ReductionSpec::new(
                    "total_expenses",
                    "total_expenses",
                    Reduction::Sum,
                )],
            )?;
            ctx.insert("expenses", expenses);
            Ok(())
        })
        .step("load monthly ridership", move |ctx| {
            let upt = load_monthly(&upt_source, "upt")?;
            let vrm = load_monthly(&vrm_source, "vrm")?;
            let monthly = join(&upt, &vrm, &["ntd_id", "mode", "month"], JoinKind::Inner)?;
            ctx.insert("ridership_monthly", monthly);
            Ok(())
        })
        .step("annual ridership totals", |ctx| {
            let monthly = ctx.get("ridership_monthly")?;
            let annual = group_summarize(
                monthly,
                &["ntd_id", "mode"],
                &[
                    ReductionSpec::new("upt", "upt", Reduction::Sum),
                    ReductionSpec::new("vrm", "vrm", Reduction::Sum),
                ],
            )?;
            ctx.insert("ridership_annual", annual);
            Ok(())
        })
        .step("join financials with usage", |ctx| {
            let fares = ctx.get("fares")?;
            let expenses = ctx.get("expenses")?;
            let financials = join(fares, expenses, &["ntd_id", "mode"], JoinKind::Inner)?;
            let annual = ctx.get("ridership_annual")?;
            let joined = join(&financials, annual, &["ntd_id", "mode"], JoinKind::Inner)?;
            ctx.insert("financials", joined);
            Ok(())
        })
        .step("derive efficiency metrics", |ctx| {
            let financials = ctx.get("financials")?;
            let labeled = recode(financials, "mode", &mode_labels())?;
            let mut metrics = labeled;
            for (numerator, denominator, output) in METRICS {
                metrics =
                    derive_ratio(&metrics, numerator, denominator, output, OnUndefined::Drop)?;
            }
            let metrics = sort_by(&metrics, "farebox_recovery", SortDirection::Descending)?;
            ctx.insert("metrics", metrics);
            Ok(())
        })
        .step("mode level means", |ctx| {
            let metrics = ctx.get("metrics")?;
            let mut reductions = vec![ReductionSpec::new("agencies", "ntd_id", Reduction::Count)];
            for (_, _, output) in METRICS {
                reductions.push(ReductionSpec::new(output, output, Reduction::Mean));
            }
            let summary = group_summarize(metrics, &["mode"], &reductions)?;
            let summary = sort_by(&summary, "farebox_recovery", SortDirection::Descending)?;
            ctx.insert("mode_summary", summary);
            Ok(())
        })
}

/// Reads one wide ridership sheet and reshapes it to one row per
/// (agency, mode, month).
fn load_monthly(source: &SourceSpec, value_column: &str) -> Result<Table> {
    let wide = read_table_wide(
        source,
        &[
            ColumnSpec::new("NTD ID", ColumnType::Integer),
            ColumnSpec::new("Mode", ColumnType::Categorical),
        ],
        ColumnType::Real,
        &ReadOptions::default(),
    )
    .with_context(|| format!("load ridership sheet {}", source.id()))?;
    let renamed = rename_columns(&wide, &[("NTD ID", "ntd_id"), ("Mode", "mode")])?;
    let long = pivot_longer(&renamed, &["ntd_id", "mode"], "month", value_column)?;
    Ok(long)
}
