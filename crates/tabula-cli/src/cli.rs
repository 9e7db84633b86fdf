//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "tabula",
    version,
    about = "Tabula - tabular analysis pipelines",
    long_about = "Run the bundled analysis pipelines over local data extracts.\n\n\
                  `transit` computes financial-efficiency metrics from NTD\n\
                  extracts; `imdb` scores the public dataset dumps and builds\n\
                  a remake shortlist. Result tables are rendered to the\n\
                  terminal and written as CSV snapshots."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compute transit financial-efficiency metrics from NTD extracts.
    Transit(TransitArgs),

    /// Score IMDb dataset dumps and build the remake shortlist.
    Imdb(ImdbArgs),
}

#[derive(Parser)]
pub struct TransitArgs {
    /// Directory containing the NTD extracts.
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: PathBuf,

    /// Output directory for result tables (default: <DATA_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Rows shown per rendered table.
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,
}

#[derive(Parser)]
pub struct ImdbArgs {
    /// Cache directory for the dataset dumps and narrowed snapshots.
    #[arg(value_name = "CACHE_DIR")]
    pub cache_dir: PathBuf,

    /// Output directory for result tables (default: <CACHE_DIR>/output).
    #[arg(long = "output-dir", value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Minimum vote count for a rating to be considered.
    #[arg(long = "min-votes", default_value_t = 100)]
    pub min_votes: i64,

    /// Minimum rated titles for a person to make the shortlist.
    #[arg(long = "min-titles", default_value_t = 5)]
    pub min_titles: i64,

    /// Minimum rated episodes for a series to make the leaderboard.
    #[arg(long = "min-episodes", default_value_t = 12)]
    pub min_episodes: i64,

    /// Latest release year that still counts as a classic.
    #[arg(long = "classic-year", default_value_t = 1995)]
    pub classic_year: i64,

    /// Success floor for remake candidates.
    #[arg(long = "success-threshold", default_value_t = 40.0)]
    pub success_threshold: f64,

    /// Never download; fail if a dump is missing from the cache.
    #[arg(long = "no-fetch")]
    pub no_fetch: bool,

    /// Rows shown per rendered table.
    #[arg(long = "top", default_value_t = 10)]
    pub top: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
