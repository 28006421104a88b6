//! # Pipeline Document Model
//!
//! The serializable shape of one synthesized CI/CD configuration: a trigger
//! map pointing push and pull-request events at the primary workflow, and an
//! ordered set of workflows, each an ordered list of step invocations.
//!
//! Steps serialize in the step-list wire shape used by the generated
//! configuration format: a single-entry mapping from `id@version` to the
//! step's body, with inputs as a list of single-entry mappings. Values that
//! reference user input (project path, scheme) are environment-variable
//! references, never literals, so one document serves every option-tree leaf
//! that points at it.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::Result;
use crate::models::OrderedMap;

/// Format version stamped into every generated document.
pub const FORMAT_VERSION: &str = "1.1";

/// Workflow id for the continuous-integration workflow.
pub const PRIMARY_WORKFLOW_ID: &str = "primary";

/// Workflow id for the deploy workflow.
pub const DEPLOY_WORKFLOW_ID: &str = "deploy";

/// One step input, serialized as a `key: value` single-entry mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepInput {
    pub key: String,
    pub value: String,
}

impl Serialize for StepInput {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// A single step invocation at a pinned version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub id: String,
    pub version: String,
    pub run_if: Option<String>,
    pub inputs: Vec<StepInput>,
}

impl Step {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            run_if: None,
            inputs: Vec::new(),
        }
    }

    pub fn with_run_if(mut self, condition: impl Into<String>) -> Self {
        self.run_if = Some(condition.into());
        self
    }

    pub fn with_input(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.inputs.push(StepInput {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// The `id@version` reference this step serializes under.
    pub fn reference(&self) -> String {
        format!("{}@{}", self.id, self.version)
    }
}

#[derive(Serialize)]
struct StepBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    run_if: Option<&'a String>,
    #[serde(skip_serializing_if = "inputs_empty")]
    inputs: &'a [StepInput],
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn inputs_empty(inputs: &&[StepInput]) -> bool {
    inputs.is_empty()
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let body = StepBody {
            run_if: self.run_if.as_ref(),
            inputs: &self.inputs,
        };
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.reference(), &body)?;
        map.end()
    }
}

/// An ordered sequence of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Workflow {
    pub steps: Vec<Step>,
}

impl Workflow {
    pub fn new(steps: Vec<Step>) -> Self {
        Self { steps }
    }
}

/// One trigger-map entry routing an event pattern to a workflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TriggerItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pull_request_source_branch: Option<String>,
    pub workflow: String,
}

impl TriggerItem {
    pub fn push(pattern: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            push_branch: Some(pattern.into()),
            pull_request_source_branch: None,
            workflow: workflow.into(),
        }
    }

    pub fn pull_request(pattern: impl Into<String>, workflow: impl Into<String>) -> Self {
        Self {
            push_branch: None,
            pull_request_source_branch: Some(pattern.into()),
            workflow: workflow.into(),
        }
    }
}

/// A complete synthesized pipeline configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineDocument {
    pub format_version: String,
    pub trigger_map: Vec<TriggerItem>,
    pub workflows: OrderedMap<Workflow>,
}

impl PipelineDocument {
    pub fn new(trigger_map: Vec<TriggerItem>, workflows: OrderedMap<Workflow>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_string(),
            trigger_map,
            workflows,
        }
    }

    /// Serialize the document to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
