//! # CLI Command Implementations
//!
//! One module per subcommand. Each defines an `Args` struct derived with
//! `clap` and an `execute` function that drives the `pipescout` library to
//! perform the command's work.

use std::fs;
use std::path::Path;

use anyhow::Result;

use pipescout::result::ScanResult;

pub mod completions;
pub mod defaults;
pub mod scan;
pub mod tree;

/// Render a scan result in the requested format and write it to the output
/// file, or to stdout when no file was given.
pub(crate) fn write_result(
    result: &ScanResult,
    format: &str,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = match format {
        "yaml" => result.to_yaml()?,
        "json" => result.to_json()?,
        other => anyhow::bail!("unsupported output format: {} (expected yaml or json)", other),
    };

    match output {
        Some(path) => fs::write(path, rendered)?,
        None => print!("{}", rendered),
    }
    Ok(())
}
