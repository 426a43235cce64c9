//! CLI argument definitions for the bloom chart tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use bloom_cli::config::MappingOverrides;
use bloom_core::DEFAULT_TREND_DEGREE;

#[derive(Parser)]
#[command(
    name = "bloom",
    version,
    about = "Normalize cherry-blossom bloom dates and fit a trend",
    long_about = "Normalize bloom-date records from a CSV file into a sorted date axis\n\
                  and fit a least-squares polynomial trend over (year, date)."
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

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

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
    /// Normalize records, fit the trend and render the chart data.
    Chart(ChartArgs),

    /// Print the date axis and the rows excluded from it.
    Dates(SourceArgs),
}

#[derive(Args)]
pub struct SourceArgs {
    /// CSV file with bloom records.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Field delimiter.
    #[arg(long = "delimiter", default_value_t = ',')]
    pub delimiter: char,

    /// JSON column mapping file. Column flags override its entries.
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: Option<PathBuf>,

    /// Year column (default: Year).
    #[arg(long = "year-column", value_name = "NAME")]
    pub year_column: Option<String>,

    /// Single-cell date column (default: FullDate).
    #[arg(long = "date-column", value_name = "NAME")]
    pub date_column: Option<String>,

    /// Month column; requires --day-column and switches to split dates.
    #[arg(long = "month-column", value_name = "NAME")]
    pub month_column: Option<String>,

    /// Day column; requires --month-column.
    #[arg(long = "day-column", value_name = "NAME")]
    pub day_column: Option<String>,

    /// Reference name column (default: Reference Name).
    #[arg(long = "reference-column", value_name = "NAME")]
    pub reference_column: Option<String>,

    /// Output format.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: OutputFormatArg,
}

impl SourceArgs {
    pub fn overrides(&self) -> MappingOverrides {
        MappingOverrides {
            year: self.year_column.clone(),
            date: self.date_column.clone(),
            month: self.month_column.clone(),
            day: self.day_column.clone(),
            reference: self.reference_column.clone(),
        }
    }
}

#[derive(Args)]
pub struct ChartArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Degree of the trend polynomial.
    #[arg(long = "degree", default_value_t = DEFAULT_TREND_DEGREE)]
    pub degree: usize,

    /// Skip the trend overlay.
    #[arg(long = "no-trend")]
    pub no_trend: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum OutputFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
