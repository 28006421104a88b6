//! # Tree Command Implementation
//!
//! Displays the scanned option tree in a hierarchical format: the project
//! path axis, the scheme axis beneath it, and the config each choice
//! resolves to at the leaves. A safe, read-only view of what `scan` would
//! generate.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use ptree::{print_tree, TreeItem};

use pipescout::error::Error;
use pipescout::models::OptionNode;
use pipescout::output::{emoji, OutputConfig};
use pipescout::scanner::{self, ProjectType};

/// Display the option tree of a scanned directory
#[derive(Args, Debug)]
pub struct TreeArgs {
    /// Directory to scan
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub dir: PathBuf,

    /// Restrict the scan to one project type (ios, macos); shows the
    /// default option tree when nothing is detected
    #[arg(short = 't', long, value_name = "TYPE")]
    pub project_type: Option<String>,
}

/// Execute the `tree` command.
pub fn execute(args: TreeArgs, output_cfg: &OutputConfig) -> Result<()> {
    if !args.dir.is_dir() {
        anyhow::bail!("scan directory not found: {}", args.dir.display());
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

    let mut shown = 0;
    for project_type in families {
        let outcome = match scanner::scan(project_type, &args.dir) {
            Ok(outcome) => outcome,
            Err(Error::DetectionEmpty) if forced.is_some() => {
                scanner::default_outcome(project_type)
            }
            Err(Error::DetectionEmpty) => continue,
            Err(err) => return Err(err.into()),
        };

        println!(
            "{} {}",
            emoji(output_cfg, "🌳", "[TREE]"),
            output_cfg.header(project_type.tag())
        );
        let root = build_tree_node(project_type.tag(), &outcome.options);
        print_tree(&root)?;
        shown += 1;
    }

    if shown == 0 {
        anyhow::bail!(
            "no Apple-platform projects found in {}",
            args.dir.display()
        );
    }
    Ok(())
}

/// Build a display node from an option node.
fn build_tree_node(label: &str, option: &OptionNode) -> TreeNode {
    match option {
        OptionNode::Internal { children, .. } => TreeNode {
            label: label.to_string(),
            children: children
                .iter()
                .map(|(value, child)| build_tree_node(value, child))
                .collect(),
        },
        OptionNode::Leaf { config } => TreeNode {
            label: format!("{} -> {}", label, config),
            children: vec![],
        },
    }
}

/// Tree node structure for ptree visualization
#[derive(Clone)]
struct TreeNode {
    label: String,
    children: Vec<TreeNode>,
}

impl TreeItem for TreeNode {
    type Child = TreeNode;

    fn write_self<W: std::io::Write>(
        &self,
        f: &mut W,
        _style: &ptree::Style,
    ) -> std::io::Result<()> {
        write!(f, "{}", self.label)
    }

    fn children(&self) -> std::borrow::Cow<'_, [Self::Child]> {
        std::borrow::Cow::Borrowed(&self.children)
    }
}
