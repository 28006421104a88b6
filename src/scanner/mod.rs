//! # Scan Pipeline
//!
//! One scan pass targets one project-type family and runs four stages over
//! an already-materialized file list:
//!
//! 1. **Discovery & merge** ([`discovery`]): build the final unit set from
//!    project/workspace candidates fused with their CocoaPods state.
//! 2. **Option tree building** ([`options`]): one decision axis per unit,
//!    one per scheme or fallback target, emitting config descriptors as a
//!    side stream.
//! 3. **Deduplication** ([`descriptor`]): collapse the stream to unique
//!    pipeline shapes, first-seen order.
//! 4. **Synthesis** ([`synth`]): one pipeline document per unique shape.
//!
//! The whole pass is synchronous and owns only local accumulator state, so
//! scans for different families can run independently. Identical inputs
//! produce identical outputs; every map in the result preserves insertion
//! order.

use std::path::Path;

use log::info;

use crate::error::Result;
use crate::models::{OptionNode, OrderedMap, Warnings};
use crate::pipeline::PipelineDocument;

pub mod descriptor;
pub mod discovery;
pub mod options;
pub mod steps;
pub mod synth;

pub use crate::models::ProjectType;
pub use descriptor::ConfigDescriptor;

/// Everything one scan pass produces for a project-type family.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The decision tree for rendering a selection UI.
    pub options: OptionNode,
    /// Synthesized documents keyed by canonical config name.
    pub configs: OrderedMap<PipelineDocument>,
    /// Non-fatal findings, in the order they were raised.
    pub warnings: Warnings,
}

/// True when the search directory contains at least one relevant project
/// file for the family.
pub fn detect(project_type: ProjectType, search_dir: &Path) -> Result<bool> {
    let files = crate::walker::list_files(search_dir)?;
    let projects = crate::walker::filter_project_files(&files, project_type, search_dir);
    if projects.is_empty() {
        info!("{} platform not detected", project_type);
        return Ok(false);
    }
    info!("{} platform detected", project_type);
    Ok(true)
}

/// Run the full scan pass for one family.
///
/// Returns [`crate::error::Error::DetectionEmpty`] when nothing was found
/// (callers decide whether to fall back to [`default_outcome`]) and
/// [`crate::error::Error::NoValidConfig`] when units exist but none yields
/// a config.
pub fn scan(project_type: ProjectType, search_dir: &Path) -> Result<ScanOutcome> {
    let discovered = discovery::execute(project_type, search_dir)?;

    let mut outcome = options::execute(project_type, search_dir, &discovered.units)?;
    let mut warnings = discovered.warnings;
    warnings.append(&mut outcome.warnings);

    let unique = descriptor::dedup(&outcome.descriptors, project_type);
    info!(
        "{} distinct config(s) from {} descriptor(s)",
        unique.len(),
        outcome.descriptors.len()
    );
    let configs = synth::generate_config_map(project_type, &unique)?;

    Ok(ScanOutcome {
        options: outcome.options,
        configs,
        warnings,
    })
}

/// The guaranteed fallback for a forced project type: one placeholder
/// option tree and one default document.
pub fn default_outcome(project_type: ProjectType) -> ScanOutcome {
    let (name, document) = synth::generate_default_config(project_type);
    let mut configs = OrderedMap::new();
    configs.insert(name, document);

    ScanOutcome {
        options: synth::generate_default_options(project_type),
        configs,
        warnings: Warnings::new(),
    }
}
