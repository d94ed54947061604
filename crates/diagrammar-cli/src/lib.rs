//! CLI logic for the Diagrammar formatter.
//!
//! This module contains the core CLI logic: read a diagram file, render its
//! canonical form, then write it out or compare it against the input.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::{AppConfig, load_config};

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use diagrammar::{DiagrammarError, Formatter};

/// What a successful [`run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Canonical text was written to the output.
    Written,
    /// Check mode: the input is already canonical.
    Canonical,
    /// Check mode: formatting would change the input.
    NotCanonical,
}

/// Run the Diagrammar CLI application
///
/// This function formats the input file and writes the canonical text to
/// the output path or standard output. In check mode nothing is written and
/// the result reports whether the input was canonical.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `DiagrammarError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Unknown dialects
/// - Parsing errors
pub fn run(args: &Args) -> Result<Outcome, DiagrammarError> {
    info!(
        input_path = args.input,
        output_path:? = args.output,
        check = args.check;
        "Processing diagram"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(&args.input)?;

    let mut formatter = Formatter::new(app_config.render().clone());
    if let Some(dialect) = args.dialect {
        formatter = formatter.with_dialect(dialect);
    }

    // Pie charts initialise their grammar engine asynchronously.
    let runtime = tokio::runtime::Builder::new_current_thread().build()?;
    let canonical = runtime.block_on(formatter.format_async(&source))?;

    if args.check {
        if canonical == source {
            info!(input_path = args.input; "Input is canonical");
            return Ok(Outcome::Canonical);
        }
        warn!(input_path = args.input; "Input is not canonical");
        return Ok(Outcome::NotCanonical);
    }

    match &args.output {
        Some(path) => {
            fs::write(path, &canonical)?;
            info!(output_file = path; "Canonical text written");
        }
        None => io::stdout().lock().write_all(canonical.as_bytes())?,
    }

    Ok(Outcome::Written)
}
