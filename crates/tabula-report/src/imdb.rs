//! IMDb remake-pitch report.
//!
//! Downloads the public dataset dumps once, gates ratings to titles with a
//! meaningful vote count, narrows every other table to rows reachable from
//! the gated ratings via key-based semi-filtering (caching each narrowed
//! table as a local snapshot), then scores titles with a success heuristic
//! and shortlists personnel, series, and classic remake candidates.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use tabula_ingest::{
    ColumnSpec, ReadOptions, SourceSpec, ensure_cached, read_table, write_delimited,
};
use tabula_model::{ColumnType, Table, Value};
use tabula_pipeline::{Pipeline, PipelineContext};
use tabula_transform::{
    JoinKind, Reduction, ReductionSpec, SortDirection, filter_rows, group_summarize, join,
    rename_columns, semi_join, sort_by,
};

/// Dataset dump names, as published.
const DATASETS: [&str; 6] = [
    "title.ratings.tsv",
    "title.basics.tsv",
    "name.basics.tsv",
    "title.principals.tsv",
    "title.crew.tsv",
    "title.episode.tsv",
];

/// Parameters of the IMDb pipeline.
#[derive(Debug, Clone)]
pub struct ImdbOptions {
    /// Directory holding the raw dumps and the narrowed snapshots.
    pub cache_dir: PathBuf,
    /// Base URL of the gzipped dumps.
    pub base_url: String,
    /// Download missing dumps; disable when the cache is pre-seeded.
    pub fetch: bool,
    /// Minimum vote count for a rating to be considered at all.
    pub min_votes: i64,
    /// Minimum rated titles for a person to make the shortlist.
    pub min_titles: i64,
    /// Minimum rated episodes for a series to make the leaderboard.
    pub min_episodes: i64,
    /// Latest release year that still counts as a classic.
    pub classic_year: i64,
    /// Success floor for remake candidates.
    pub success_threshold: f64,
}

impl ImdbOptions {
    pub fn new(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            base_url: "https://datasets.imdbws.com".to_string(),
            fetch: true,
            min_votes: 100,
            min_titles: 5,
            min_episodes: 12,
            classic_year: 1995,
            success_threshold: 40.0,
        }
    }
}

/// Output tables of the IMDb pipeline.
#[derive(Debug, Clone)]
pub struct ImdbReport {
    /// Vote-gated titles annotated with the success score.
    pub rated_titles: Table,
    /// Directors and actors ranked by mean success over their rated titles.
    pub personnel: Table,
    /// Series ranked by mean episode success.
    pub series: Table,
    /// Old, high-success movies worth pitching as a remake.
    pub classics: Table,
}

/// Runs the IMDb report pipeline.
pub fn run(options: &ImdbOptions) -> Result<ImdbReport> {
    let mut ctx = PipelineContext::new();
    build_pipeline(options).run(&mut ctx)?;
    let report = ImdbReport {
        rated_titles: ctx.take("rated_titles")?,
        personnel: ctx.take("personnel")?,
        series: ctx.take("series")?,
        classics: ctx.take("classics")?,
    };
    tracing::info!(
        rated_titles = report.rated_titles.height(),
        personnel = report.personnel.height(),
        classics = report.classics.height(),
        "imdb report complete"
    );
    Ok(report)
}

fn ratings_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("tconst", ColumnType::Text),
        ColumnSpec::new("averageRating", ColumnType::Real),
        ColumnSpec::new("numVotes", ColumnType::Integer),
    ]
}

fn basics_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("tconst", ColumnType::Text),
        ColumnSpec::new("titleType", ColumnType::Categorical),
        ColumnSpec::new("primaryTitle", ColumnType::Text),
        ColumnSpec::new("startYear", ColumnType::Integer),
        ColumnSpec::new("genres", ColumnType::Text),
    ]
}

fn principals_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("tconst", ColumnType::Text),
        ColumnSpec::new("nconst", ColumnType::Text),
        ColumnSpec::new("category", ColumnType::Categorical),
    ]
}

fn crew_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("tconst", ColumnType::Text),
        ColumnSpec::new("directors", ColumnType::Text),
        ColumnSpec::new("writers", ColumnType::Text),
    ]
}

fn episode_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("tconst", ColumnType::Text),
        ColumnSpec::new("parentTconst", ColumnType::Text),
        ColumnSpec::new("seasonNumber", ColumnType::Integer),
        ColumnSpec::new("episodeNumber", ColumnType::Integer),
    ]
}

fn name_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec::new("nconst", ColumnType::Text),
        ColumnSpec::new("primaryName", ColumnType::Text),
        ColumnSpec::new("birthYear", ColumnType::Integer),
    ]
}

fn build_pipeline(options: &ImdbOptions) -> Pipeline {
    let fetch_options = options.clone();
    let ratings_opts = options.clone();
    let narrow_opts = options.clone();
    let names_opts = options.clone();
    let classics_opts = options.clone();
    let personnel_opts = options.clone();
    let series_opts = options.clone();

    Pipeline::new("imdb")
        .step("fetch dataset dumps", move |_ctx| {
            if !fetch_options.fetch {
                return Ok(());
            }
            for name in DATASETS {
                let url = format!("{}/{name}.gz", fetch_options.base_url);
                ensure_cached(&url, &fetch_options.cache_dir.join(name))
                    .with_context(|| format!("fetch {name}"))?;
            }
            Ok(())
        })
        .step("gate ratings by vote count", move |ctx| {
            let path = ratings_opts.cache_dir.join("title.ratings.tsv");
            let raw = read_table(
                &SourceSpec::tsv(path),
                &ratings_columns(),
                &ReadOptions::default(),
            )?;
            let min_votes = ratings_opts.min_votes;
            let gated = filter_rows(&raw, |row| {
                row.i64("numVotes").is_some_and(|votes| votes >= min_votes)
            })?;
            ctx.insert("ratings", gated);
            Ok(())
        })
        .step("narrow tables to rated titles", move |ctx| {
            let ratings = ctx.get("ratings")?.clone();
            let narrow = |name: &str, columns: &[ColumnSpec], key: &str| -> Result<Table> {
                narrowed_table(&narrow_opts.cache_dir, name, columns, || {
                    let raw = read_table(
                        &SourceSpec::tsv(narrow_opts.cache_dir.join(name)),
                        columns,
                        &ReadOptions::default(),
                    )?;
                    Ok(semi_join(&raw, &ratings, &[key])?)
                })
            };
            ctx.insert(
                "basics",
                narrow("title.basics.tsv", &basics_columns(), "tconst")?,
            );
            ctx.insert(
                "principals",
                narrow("title.principals.tsv", &principals_columns(), "tconst")?,
            );
            ctx.insert(
                "crew",
                narrow("title.crew.tsv", &crew_columns(), "tconst")?,
            );
            ctx.insert(
                "episodes",
                narrow("title.episode.tsv", &episode_columns(), "tconst")?,
            );
            Ok(())
        })
        .step("narrow names to seen personnel", move |ctx| {
            let principals = ctx.get("principals")?.clone();
            let names = narrowed_table(
                &names_opts.cache_dir,
                "name.basics.tsv",
                &name_columns(),
                || {
                    let raw = read_table(
                        &SourceSpec::tsv(names_opts.cache_dir.join("name.basics.tsv")),
                        &name_columns(),
                        &ReadOptions::default(),
                    )?;
                    Ok(semi_join(&raw, &principals, &["nconst"])?)
                },
            )?;
            ctx.insert("names", names);
            Ok(())
        })
        .step("score titles", |ctx| {
            let basics = ctx.get("basics")?;
            let ratings = ctx.get("ratings")?;
            let rated = join(basics, ratings, &["tconst"], JoinKind::Inner)?;
            let scored = rated.with_column("success", ColumnType::Real, success_score)?;
            ctx.insert("rated_titles", scored);
            Ok(())
        })
        .step("shortlist personnel", move |ctx| {
            let principals = ctx.get("principals")?;
            let credited = filter_rows(principals, |row| {
                matches!(row.text("category"), Some("actor" | "actress" | "director"))
            })?;
            let successes = ctx
                .get("rated_titles")?
                .select_columns(&["tconst", "success"])?;
            let scored = join(&credited, &successes, &["tconst"], JoinKind::Inner)?;
            let per_person = group_summarize(
                &scored,
                &["nconst", "category"],
                &[
                    ReductionSpec::new("mean_success", "success", Reduction::Mean),
                    ReductionSpec::new("titles", "success", Reduction::Count),
                    ReductionSpec::new("top_success", "success", Reduction::Max),
                ],
            )?;
            let min_titles = personnel_opts.min_titles;
            let seasoned = filter_rows(&per_person, |row| {
                row.i64("titles").is_some_and(|count| count >= min_titles)
            })?;
            let named = ctx
                .get("names")?
                .select_columns(&["nconst", "primaryName"])?;
            let shortlist = join(&seasoned, &named, &["nconst"], JoinKind::Inner)?;
            let shortlist = sort_by(&shortlist, "mean_success", SortDirection::Descending)?;
            ctx.insert("personnel", shortlist);
            Ok(())
        })
        .step("rank series by episode success", move |ctx| {
            let episodes = ctx
                .get("episodes")?
                .select_columns(&["tconst", "parentTconst"])?;
            let successes = ctx
                .get("rated_titles")?
                .select_columns(&["tconst", "success"])?;
            let scored = join(&episodes, &successes, &["tconst"], JoinKind::Inner)?;
            let per_series = group_summarize(
                &scored,
                &["parentTconst"],
                &[
                    ReductionSpec::new("mean_success", "success", Reduction::Mean),
                    ReductionSpec::new("episodes", "success", Reduction::Count),
                ],
            )?;
            let min_episodes = series_opts.min_episodes;
            let established = filter_rows(&per_series, |row| {
                row.i64("episodes").is_some_and(|count| count >= min_episodes)
            })?;
            let keyed = rename_columns(&established, &[("parentTconst", "tconst")])?;
            let titles = ctx
                .get("basics")?
                .select_columns(&["tconst", "primaryTitle"])?;
            let leaderboard = join(&keyed, &titles, &["tconst"], JoinKind::Inner)?;
            let leaderboard = sort_by(&leaderboard, "mean_success", SortDirection::Descending)?;
            ctx.insert("series", leaderboard);
            Ok(())
        })
        .step("pick classic remake candidates", move |ctx| {
            let rated = ctx.get("rated_titles")?;
            let classic_year = classics_opts.classic_year;
            let threshold = classics_opts.success_threshold;
            let classics = filter_rows(rated, |row| {
                row.text("titleType") == Some("movie")
                    && row.i64("startYear").is_some_and(|year| year <= classic_year)
                    && row.f64("success").is_some_and(|score| score >= threshold)
            })?;
            let classics = sort_by(&classics, "success", SortDirection::Descending)?;
            ctx.insert("classics", classics);
            Ok(())
        })
}

/// Success heuristic: rating quality weighted by audience reach.
fn success_score(row: &tabula_model::RowView<'_>) -> Value {
    match (row.f64("averageRating"), row.i64("numVotes")) {
        (Some(rating), Some(votes)) if votes > 0 => {
            Value::Real(rating * (votes as f64).log10())
        }
        _ => Value::Missing,
    }
}

/// Loads a narrowed snapshot if one is cached, otherwise builds it and
/// writes the snapshot for the next run.
fn narrowed_table<F>(
    cache_dir: &Path,
    name: &str,
    columns: &[ColumnSpec],
    build: F,
) -> Result<Table>
where
    F: FnOnce() -> Result<Table>,
{
    let path = cache_dir.join("narrowed").join(name);
    if path.exists() {
        let table = read_table(&SourceSpec::tsv(&path), columns, &ReadOptions::default())
            .with_context(|| format!("read narrowed snapshot {name}"))?;
        return Ok(table);
    }
    let table = build().with_context(|| format!("narrow {name}"))?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create snapshot dir {}", parent.display()))?;
    }
    write_delimited(&table, &path, b'\t')
        .with_context(|| format!("write narrowed snapshot {name}"))?;
    Ok(table)
}
