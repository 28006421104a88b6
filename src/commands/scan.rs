//! Scan command implementation
//!
//! Runs the full detection-to-configuration pipeline for one or both
//! project-type families and writes the aggregate result document. With
//! `--project-type` the family is forced: when nothing is detected the
//! guaranteed default config is emitted instead of an empty result. With
//! `--interactive` the option tree is walked with selection prompts and the
//! chosen config is printed.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Select};

use pipescout::error::Error;
use pipescout::models::OptionNode;
use pipescout::output::{emoji, OutputConfig};
use pipescout::result::ScanResult;
use pipescout::scanner::{self, ProjectType, ScanOutcome};

/// Arguments for the scan command
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Directory to scan
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Restrict the scan to one project type (ios, macos); guarantees a
    /// default config when nothing is detected
    #[arg(short = 't', long, value_name = "TYPE")]
    pub project_type: Option<String>,

    /// Write the result document to a file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format (yaml, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "yaml")]
    pub format: String,

    /// Pick a config interactively by walking the option tree
    #[arg(short, long)]
    pub interactive: bool,

    /// Suppress all output except the result document and errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the scan command
pub fn execute(args: ScanArgs, output_cfg: &OutputConfig) -> Result<()> {
    let start_time = Instant::now();

    if !args.dir.is_dir() {
        anyhow::bail!("scan directory not found: {}", args.dir.display());
    }

    if !args.quiet {
        eprintln!(
            "{} Scanning {}",
            emoji(output_cfg, "🔍", "[SCAN]"),
            args.dir.display()
        );
    }

    let forced = args
        .project_type
        .as_deref()
        .map(ProjectType::from_tag)
        .transpose()?;
    let families: Vec<ProjectType> = match forced {
        Some(project_type) => vec![project_type],
        None => ProjectType::ALL.to_vec(),
    };

    let mut outcomes: Vec<(ProjectType, ScanOutcome)> = Vec::new();
    for project_type in families {
        match scanner::scan(project_type, &args.dir) {
            Ok(outcome) => outcomes.push((project_type, outcome)),
            Err(Error::DetectionEmpty) if forced.is_some() => {
                if !args.quiet {
                    eprintln!(
                        "{} No {} projects detected; falling back to the default config",
                        emoji(output_cfg, "ℹ️", "[INFO]"),
                        project_type
                    );
                }
                outcomes.push((project_type, scanner::default_outcome(project_type)));
            }
            Err(Error::DetectionEmpty) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    if outcomes.is_empty() {
        anyhow::bail!(
            "no Apple-platform projects found in {}",
            args.dir.display()
        );
    }

    let mut result = ScanResult::new();
    for (project_type, outcome) in &outcomes {
        result.add_family(*project_type, outcome)?;

        if !args.quiet {
            for warning in &outcome.warnings {
                eprintln!("{} {}", emoji(output_cfg, "⚠️", "[WARN]"), warning);
            }
        }
    }

    if args.interactive {
        pick_interactive(&outcomes, output_cfg)?;
    }

    super::write_result(&result, &args.format, args.output.as_deref())?;

    if !args.quiet {
        let duration = start_time.elapsed();
        eprintln!(
            "{} Scanned {} project type(s) in {:.2}s",
            emoji(output_cfg, "✅", "[DONE]"),
            outcomes.len(),
            duration.as_secs_f64()
        );
        if let Some(path) = &args.output {
            eprintln!("   Result written to: {}", path.display());
        }
    }

    Ok(())
}

/// Walk the option tree with selection prompts and print the chosen config.
fn pick_interactive(
    outcomes: &[(ProjectType, ScanOutcome)],
    output_cfg: &OutputConfig,
) -> Result<()> {
    let family_index = if outcomes.len() == 1 {
        0
    } else {
        let tags: Vec<&str> = outcomes.iter().map(|(pt, _)| pt.tag()).collect();
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Project type")
            .items(&tags)
            .default(0)
            .interact()?
    };
    let (_, outcome) = &outcomes[family_index];

    let mut node = &outcome.options;
    while let OptionNode::Internal {
        title, children, ..
    } = node
    {
        let labels: Vec<&str> = children.keys().collect();
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(title.as_str())
            .items(&labels)
            .default(0)
            .interact()?;
        node = children
            .get(labels[choice])
            .expect("selection labels come from the children map");
    }

    let Some(config_name) = node.config_name() else {
        return Ok(());
    };
    println!("{}", output_cfg.header(config_name));
    if let Some(document) = outcome.configs.get(config_name) {
        println!("{}", document.to_yaml()?);
    }
    Ok(())
}
