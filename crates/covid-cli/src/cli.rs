//! CLI argument definitions for the case dashboard.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use covid_aggregate::ChartTab;
use covid_cli::render::DEFAULT_BAR_WIDTH;

#[derive(Parser)]
#[command(
    name = "covid-dash",
    version,
    about = "COVID-19 case dashboard for the terminal",
    long_about = "Summarize a COVID-19 case dataset.\n\n\
                  Loads one delimited file of patient records and renders the\n\
                  headline statistics and chart tables of the case dashboard."
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
    /// Show headline statistics and a preview of the data.
    Summary(SummaryArgs),

    /// Show the chart tables.
    Charts(ChartsArgs),

    /// Show the summary and every chart from a single load.
    Report(ReportArgs),

    /// List the dataset's columns against the required schema.
    Columns(DataArgs),
}

#[derive(Args)]
pub struct DataArgs {
    /// Case dataset to load.
    #[arg(long = "data", value_name = "PATH", default_value = "analysis.csv")]
    pub data: PathBuf,

    /// Field delimiter (a single ASCII character).
    #[arg(long = "delimiter", value_name = "CHAR", default_value = ",", value_parser = parse_delimiter)]
    pub delimiter: u8,
}

#[derive(Args)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Number of records to preview (0 to skip the preview).
    #[arg(long = "preview", value_name = "N", default_value_t = 5)]
    pub preview: usize,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct ChartsArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Chart tab to show.
    #[arg(long = "tab", value_enum, default_value = "all")]
    pub tab: TabArg,

    /// Width of the bar column, in characters.
    #[arg(long = "bar-width", value_name = "N", default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: usize,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Width of the bar column, in characters.
    #[arg(long = "bar-width", value_name = "N", default_value_t = DEFAULT_BAR_WIDTH)]
    pub bar_width: usize,

    #[arg(long = "output", value_enum, default_value = "table")]
    pub output: OutputArg,
}

/// Output format for views.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Table,
    Json,
}

/// Chart tab choices.
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TabArg {
    All,
    Age,
    AgeSex,
    Intubated,
    Icu,
    Deceased,
}

impl TabArg {
    pub fn tabs(self) -> Vec<ChartTab> {
        match self {
            TabArg::All => ChartTab::ALL.to_vec(),
            TabArg::Age => vec![ChartTab::AgeGroups],
            TabArg::AgeSex => vec![ChartTab::AgeSex],
            TabArg::Intubated => vec![ChartTab::Intubation],
            TabArg::Icu => vec![ChartTab::IcuConditions],
            TabArg::Deceased => vec![ChartTab::DeceasedConditions],
        }
    }
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

fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "\\t" | "tab" => Ok(b'\t'),
        _ => match value.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(format!("delimiter must be one ASCII character, got '{value}'")),
        },
    }
}
