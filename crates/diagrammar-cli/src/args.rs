//! Command-line argument definitions for the Diagrammar CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control the input and output paths, check mode,
//! dialect selection, configuration file selection, and logging verbosity.

use clap::Parser;

use diagrammar::DialectTag;

/// Command-line arguments for the Diagrammar formatter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input diagram file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to write the canonical text to; standard output when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Exit with an error if the input is not already canonical; writes nothing
    #[arg(long, conflicts_with = "output")]
    pub check: bool,

    /// Parse as this dialect instead of detecting it (flowchart, class, ..., xy_chart)
    #[arg(long)]
    pub dialect: Option<DialectTag>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
