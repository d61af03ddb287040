//! CLI argument definitions for the system file inspector.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "sav-inspect",
    version,
    about = "Inspect SPSS system files (.sav)",
    long_about = "Inspect SPSS system files (.sav).\n\n\
                  Prints the file header, the variable dictionary, auxiliary\n\
                  records and decoded case data."
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
    /// Print the file header.
    Meta(FileArgs),

    /// List the variables in the dictionary.
    Fields(FileArgs),

    /// Print the dictionary together with value labels, documents and
    /// extension records.
    Schema(FileArgs),

    /// Decode and print case data.
    Rows(RowsArgs),

    /// Print the reader's trace of every record it visits.
    Trace(FileArgs),
}

#[derive(Parser)]
pub struct FileArgs {
    /// Path to the system file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct RowsArgs {
    /// Path to the system file.
    #[arg(value_name = "FILE")]
    pub path: PathBuf,

    /// Decode at most this many cases.
    #[arg(long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    /// Output format for decoded rows.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: RowsFormatArg,

    /// Keep trailing spaces and NULs in string values.
    #[arg(long = "no-trim")]
    pub no_trim: bool,

    /// Report values equal to the system-missing value as null.
    #[arg(long = "sysmis-null")]
    pub sysmis_null: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum RowsFormatArg {
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
