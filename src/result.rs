//! # Scan Result Aggregation
//!
//! The persisted output of a scan run: per project-type family, the option
//! tree, the synthesized configs (serialized to YAML strings so the result
//! document stays format-agnostic about its payloads), and the warnings.
//! Families appear in the order they were scanned.

use serde::Serialize;

use crate::error::Result;
use crate::models::{OptionNode, OrderedMap, ProjectType, Warnings};
use crate::scanner::ScanOutcome;

/// Aggregated result document for one scan run.
#[derive(Debug, Default, Serialize)]
pub struct ScanResult {
    pub options: OrderedMap<OptionNode>,
    pub configs: OrderedMap<OrderedMap<String>>,
    pub warnings: OrderedMap<Warnings>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one family's outcome, serializing its documents.
    pub fn add_family(&mut self, project_type: ProjectType, outcome: &ScanOutcome) -> Result<()> {
        let tag = project_type.tag();

        let mut rendered = OrderedMap::new();
        for (name, document) in outcome.configs.iter() {
            rendered.insert(name, document.to_yaml()?);
        }

        self.options.insert(tag, outcome.options.clone());
        self.configs.insert(tag, rendered);
        self.warnings.insert(tag, outcome.warnings.clone());
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
