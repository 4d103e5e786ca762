//! CLI argument definitions for the georisk pipeline.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use georisk_model::SourceKind;

#[derive(Parser)]
#[command(
    name = "georisk",
    version,
    about = "Zone risk pipeline - merge crime and rent sources into per-zone risk tiers",
    long_about = "Merge heterogeneous crime and rent datasets into one record per \
                  geographic zone.\n\n\
                  Detects columns by keyword, builds hierarchical zone keys, \
                  aggregates each source and classifies zones into five risk tiers."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
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
    /// Run the pipeline over a data directory and export the unified dataset.
    Run(RunArgs),

    /// Summarize a previously exported unified CSV file.
    Validate(ValidateArgs),

    /// List the column detection rules, or detect roles in one file.
    Roles(RolesArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Directory holding the cleaned source files under their default names.
    #[arg(long = "data-dir", value_name = "DIR", default_value = "data")]
    pub data_dir: PathBuf,

    /// Robbery incidents file (overrides the data directory default).
    #[arg(long = "robberies", value_name = "PATH")]
    pub robberies: Option<PathBuf>,

    /// Police theft report file (overrides the data directory default).
    #[arg(long = "police", value_name = "PATH")]
    pub police: Option<PathBuf>,

    /// Commune consolidated cases file (overrides the data directory default).
    #[arg(long = "communes", value_name = "PATH")]
    pub communes: Option<PathBuf>,

    /// Rent prices file (overrides the data directory default).
    #[arg(long = "rent", value_name = "PATH")]
    pub rent: Option<PathBuf>,

    /// Unified CSV output (default: <DATA_DIR>/data_final.csv).
    #[arg(long = "out-csv", value_name = "PATH")]
    pub out_csv: Option<PathBuf>,

    /// Unified JSON output (default: <DATA_DIR>/data_final.json).
    #[arg(long = "out-json", value_name = "PATH")]
    pub out_json: Option<PathBuf>,

    /// Keep only police rows whose department contains this text.
    #[arg(long = "department", value_name = "NAME")]
    pub department: Option<String>,

    /// Run the pipeline and print the summary without writing outputs.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl RunArgs {
    /// Per-source path overrides given on the command line.
    pub fn overrides(&self) -> Vec<(SourceKind, PathBuf)> {
        [
            (SourceKind::Robberies, &self.robberies),
            (SourceKind::Police, &self.police),
            (SourceKind::Communes, &self.communes),
            (SourceKind::Rent, &self.rent),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.clone().map(|path| (kind, path)))
        .collect()
    }
}

#[derive(Parser)]
pub struct ValidateArgs {
    /// Unified CSV file to summarize.
    #[arg(value_name = "PATH", default_value = "data/data_final.csv")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct RolesArgs {
    /// Source file whose header should be run through detection.
    #[arg(long = "file", value_name = "PATH", requires = "source")]
    pub file: Option<PathBuf>,

    /// Detection profile to apply to the file.
    #[arg(long = "source", value_enum)]
    pub source: Option<SourceArg>,
}

/// CLI source choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum SourceArg {
    Robberies,
    Police,
    Communes,
    Rent,
}

impl From<SourceArg> for SourceKind {
    fn from(arg: SourceArg) -> Self {
        match arg {
            SourceArg::Robberies => SourceKind::Robberies,
            SourceArg::Police => SourceKind::Police,
            SourceArg::Communes => SourceKind::Communes,
            SourceArg::Rent => SourceKind::Rent,
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
