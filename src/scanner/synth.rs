//! # Config Synthesis
//!
//! Translates each unique config descriptor into a complete pipeline
//! document with two workflows: `primary` (continuous integration, wired to
//! push and pull-request triggers) and `deploy` (no trigger; run manually or
//! from the primary workflow's success path).
//!
//! Both workflows are assembled by one shared recipe: an ordered step
//! accumulator threaded through a fixed sequence of phase functions, each
//! extending the list according to the descriptor's flags. The accumulator
//! style keeps step ordering explicit; there is no shared builder state.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::models::{CarthageState, OptionNode, OrderedMap, ProjectType};
use crate::pipeline::{
    PipelineDocument, Step, TriggerItem, Workflow, DEPLOY_WORKFLOW_ID, PRIMARY_WORKFLOW_ID,
};
use crate::scanner::descriptor::{self, ConfigDescriptor};
use crate::scanner::steps;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkflowKind {
    Primary,
    Deploy,
}

fn prepare_steps(mut acc: Vec<Step>, d: &ConfigDescriptor) -> Vec<Step> {
    acc.push(steps::certificate_and_profile_installer());
    if d.missing_shared_schemes {
        acc.push(steps::recreate_user_schemes());
    }
    acc
}

fn dependency_steps(
    mut acc: Vec<Step>,
    d: &ConfigDescriptor,
) -> Vec<Step> {
    if d.has_podfile {
        acc.push(steps::cocoapods_install());
    }
    if let Some(command) = d.carthage_state.command() {
        acc.push(steps::carthage(command));
    }
    acc
}

fn main_steps(
    mut acc: Vec<Step>,
    project_type: ProjectType,
    d: &ConfigDescriptor,
    kind: WorkflowKind,
) -> Vec<Step> {
    if d.has_test {
        acc.push(match project_type {
            ProjectType::Ios => steps::xcode_test(),
            ProjectType::Macos => steps::xcode_test_mac(),
        });
    }
    if kind == WorkflowKind::Deploy {
        acc.push(match project_type {
            ProjectType::Ios => steps::xcode_archive(),
            ProjectType::Macos => steps::xcode_archive_mac(),
        });
    }
    acc
}

fn deploy_steps(mut acc: Vec<Step>, kind: WorkflowKind) -> Vec<Step> {
    if kind == WorkflowKind::Deploy {
        acc.push(steps::deploy_artifacts());
    }
    acc
}

fn workflow(project_type: ProjectType, d: &ConfigDescriptor, kind: WorkflowKind) -> Workflow {
    let mut acc = Vec::new();
    if kind == WorkflowKind::Primary {
        acc.push(steps::activate_ssh_key());
        acc.push(steps::git_clone());
    }
    acc = prepare_steps(acc, d);
    acc = dependency_steps(acc, d);
    acc = main_steps(acc, project_type, d, kind);
    acc = deploy_steps(acc, kind);
    Workflow::new(acc)
}

/// Synthesize the complete pipeline document for one descriptor.
pub fn generate_config(project_type: ProjectType, d: &ConfigDescriptor) -> PipelineDocument {
    let mut workflows = OrderedMap::new();
    workflows.insert(
        PRIMARY_WORKFLOW_ID,
        workflow(project_type, d, WorkflowKind::Primary),
    );
    workflows.insert(
        DEPLOY_WORKFLOW_ID,
        workflow(project_type, d, WorkflowKind::Deploy),
    );

    PipelineDocument::new(
        vec![
            TriggerItem::push("*", PRIMARY_WORKFLOW_ID),
            TriggerItem::pull_request("*", PRIMARY_WORKFLOW_ID),
        ],
        workflows,
    )
}

/// Synthesize one document per descriptor, keyed by canonical name in
/// descriptor order.
///
/// Two field-wise different descriptors resolving to the same canonical
/// name would silently overwrite each other's config, so that case is
/// rejected as an internal invariant violation.
pub fn generate_config_map(
    project_type: ProjectType,
    descriptors: &[ConfigDescriptor],
) -> Result<OrderedMap<PipelineDocument>> {
    let mut configs = OrderedMap::new();
    let mut named: HashMap<String, ConfigDescriptor> = HashMap::new();

    for descriptor in descriptors {
        let name = descriptor.config_name(project_type);
        match named.get(&name) {
            Some(existing) if existing != descriptor => {
                return Err(Error::RecipeInvariant {
                    message: format!(
                        "descriptors {:?} and {:?} both resolve to config name {}",
                        existing, descriptor, name
                    ),
                });
            }
            Some(_) => continue,
            None => {
                named.insert(name.clone(), *descriptor);
                configs.insert(name, generate_config(project_type, descriptor));
            }
        }
    }

    Ok(configs)
}

/// The fallback option tree used when nothing was detected: one placeholder
/// path, one placeholder scheme, pointing at the default config.
pub fn generate_default_options(project_type: ProjectType) -> OptionNode {
    let mut scheme_node = OptionNode::internal(steps::SCHEME_TITLE, steps::SCHEME_ENV_KEY);
    scheme_node.add_child(
        "_",
        OptionNode::leaf(descriptor::default_config_name(project_type)),
    );

    let mut root = OptionNode::internal(steps::PROJECT_PATH_TITLE, steps::PROJECT_PATH_ENV_KEY);
    root.add_child("_", scheme_node);
    root
}

/// The fallback document: the maximal default step set, built by the same
/// recipe as every detected config.
pub fn generate_default_config(project_type: ProjectType) -> (String, PipelineDocument) {
    let descriptor = ConfigDescriptor::new(true, CarthageState::None, true, true);
    (
        descriptor::default_config_name(project_type),
        generate_config(project_type, &descriptor),
    )
}
