//! Defaults command implementation
//!
//! Emits the guaranteed fallback output without scanning anything: the
//! placeholder option tree and the maximal default pipeline config, per
//! project-type family. Useful for bootstrapping a pipeline in a repository
//! that does not hold the project files yet.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use pipescout::output::{emoji, OutputConfig};
use pipescout::result::ScanResult;
use pipescout::scanner::{self, ProjectType};

/// Arguments for the defaults command
#[derive(Args, Debug)]
pub struct DefaultsArgs {
    /// Emit defaults for one project type only (ios, macos)
    #[arg(short = 't', long, value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Write the result document to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (yaml, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml")]
    pub format: String,

    /// Suppress all output except the result document and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the defaults command
pub fn execute(args: DefaultsArgs, output_cfg: &OutputConfig) -> Result<()> {
    let families: Vec<ProjectType> = match args.project_type.as_deref() {
        Some(tag) => vec![ProjectType::from_tag(tag)?],
        None => ProjectType::ALL.to_vec(),
    };

    let mut result = ScanResult::new();
    for project_type in &families {
        let outcome = scanner::default_outcome(*project_type);
        result.add_family(*project_type, &outcome)?;
    }

    super::write_result(&result, &args.format, args.output.as_deref())?;

    if !args.quiet {
        eprintln!(
            "{} Emitted default configs for {} project type(s)",
            emoji(output_cfg, "✅", "[DONE]"),
            families.len()
        );
    }
    Ok(())
}
