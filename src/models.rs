//! # Scan Data Model
//!
//! The value types shared by every stage of the scan pipeline: discovered
//! project units, the Carthage dependency state, the option tree presented
//! to the user, and the insertion-ordered map used wherever output order
//! must match discovery order.
//!
//! Determinism is a hard requirement for the scanner: identical input trees
//! must serialize to byte-identical output. That is why children, workflows
//! and config maps all live in [`OrderedMap`] rather than a hash map.

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{Error, Result};

/// Ordered, human-readable warnings accumulated during a scan.
///
/// Append-only and never deduplicated; surfaced verbatim to the caller.
pub type Warnings = Vec<String>;

/// The project-type family a single scan pass targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProjectType {
    Ios,
    Macos,
}

impl ProjectType {
    /// All project types this scanner knows, in scan order.
    pub const ALL: [ProjectType; 2] = [ProjectType::Ios, ProjectType::Macos];

    /// The short tag used in config names and CLI arguments.
    pub fn tag(&self) -> &'static str {
        match self {
            ProjectType::Ios => "ios",
            ProjectType::Macos => "macos",
        }
    }

    /// Parse a CLI tag into a project type.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "ios" => Ok(ProjectType::Ios),
            "macos" => Ok(ProjectType::Macos),
            other => Err(Error::UnknownProjectType {
                tag: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// A named, independently buildable and testable entry point shared through
/// version control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    pub name: String,
    pub has_test: bool,
}

impl Scheme {
    pub fn new(name: impl Into<String>, has_test: bool) -> Self {
        Self {
            name: name.into(),
            has_test,
        }
    }
}

/// A build target, used only as a fallback enumeration unit when a project
/// carries no shared schemes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub name: String,
    pub has_test: bool,
}

impl Target {
    pub fn new(name: impl Into<String>, has_test: bool) -> Self {
        Self {
            name: name.into(),
            has_test,
        }
    }
}

/// Whether a unit is a single project or a multi-project workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Standalone,
    Workspace,
}

/// A discovered standalone project or workspace, with its schemes, targets
/// and CocoaPods association.
///
/// `is_pod_workspace` is true only for `Workspace` kind, and only after the
/// Podfile merge assigns it. Units are created by discovery and mutated only
/// by the merge step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUnit {
    /// Path relative to the scanned directory.
    pub path: String,
    pub kind: UnitKind,
    pub shared_schemes: Vec<Scheme>,
    pub targets: Vec<Target>,
    pub is_pod_workspace: bool,
}

impl ProjectUnit {
    pub fn standalone(
        path: impl Into<String>,
        shared_schemes: Vec<Scheme>,
        targets: Vec<Target>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: UnitKind::Standalone,
            shared_schemes,
            targets,
            is_pod_workspace: false,
        }
    }

    pub fn workspace(
        path: impl Into<String>,
        shared_schemes: Vec<Scheme>,
        targets: Vec<Target>,
    ) -> Self {
        Self {
            path: path.into(),
            kind: UnitKind::Workspace,
            shared_schemes,
            targets,
            is_pod_workspace: false,
        }
    }

    /// Absorb schemes and targets from a member project, skipping entries
    /// already present under the same name.
    pub fn absorb(&mut self, schemes: &[Scheme], targets: &[Target]) {
        for scheme in schemes {
            if !self.shared_schemes.iter().any(|s| s.name == scheme.name) {
                self.shared_schemes.push(scheme.clone());
            }
        }
        for target in targets {
            if !self.targets.iter().any(|t| t.name == target.name) {
                self.targets.push(target.clone());
            }
        }
    }
}

/// Whether a dependency-fetch step should run a first-time bootstrap or an
/// update, derived from the presence of `Cartfile.resolved` beside the
/// `Cartfile`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarthageState {
    /// No `Cartfile` exists in the project-owning directory.
    None,
    /// `Cartfile.resolved` sits beside the `Cartfile`.
    Bootstrap,
    /// A `Cartfile` without a resolved file; an update is required.
    Update,
}

impl CarthageState {
    /// The `carthage` subcommand this state maps to, if any.
    pub fn command(&self) -> Option<&'static str> {
        match self {
            CarthageState::None => None,
            CarthageState::Bootstrap => Some("bootstrap"),
            CarthageState::Update => Some("update"),
        }
    }
}

/// A map preserving insertion order, serialized as a mapping.
///
/// Keys are expected to be unique; inserting an existing key replaces its
/// value in place without disturbing the original position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.entries
            .iter_mut()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// The decision tree presented to the user to resolve ambiguity among
/// detected projects and schemes.
///
/// A node is either one decision axis (project path, then scheme name) with
/// ordered children, or a leaf referencing a synthesized config by canonical
/// name. The tree is always exactly two internal levels deep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionNode {
    Internal {
        /// Human-readable prompt for this decision axis.
        title: String,
        /// Environment variable the chosen value is bound to at run time.
        env_key: String,
        children: OrderedMap<OptionNode>,
    },
    Leaf {
        /// Canonical name of the config this choice resolves to.
        config: String,
    },
}

impl OptionNode {
    pub fn internal(title: impl Into<String>, env_key: impl Into<String>) -> Self {
        OptionNode::Internal {
            title: title.into(),
            env_key: env_key.into(),
            children: OrderedMap::new(),
        }
    }

    pub fn leaf(config: impl Into<String>) -> Self {
        OptionNode::Leaf {
            config: config.into(),
        }
    }

    /// Attach a child under a value label. Meaningful only on internal
    /// nodes; attaching to a leaf is a programming error.
    pub fn add_child(&mut self, label: impl Into<String>, node: OptionNode) {
        match self {
            OptionNode::Internal { children, .. } => children.insert(label, node),
            OptionNode::Leaf { .. } => debug_assert!(false, "cannot attach a child to a leaf"),
        }
    }

    pub fn child(&self, label: &str) -> Option<&OptionNode> {
        match self {
            OptionNode::Internal { children, .. } => children.get(label),
            OptionNode::Leaf { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&OrderedMap<OptionNode>> {
        match self {
            OptionNode::Internal { children, .. } => Some(children),
            OptionNode::Leaf { .. } => None,
        }
    }

    pub fn config_name(&self) -> Option<&str> {
        match self {
            OptionNode::Internal { .. } => None,
            OptionNode::Leaf { config } => Some(config),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, OptionNode::Leaf { .. })
    }
}

impl Serialize for OptionNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OptionNode::Internal {
                title,
                env_key,
                children,
            } => {
                let mut map = serializer.serialize_map(Some(3))?;
                map.serialize_entry("title", title)?;
                map.serialize_entry("env_key", env_key)?;
                map.serialize_entry("value_map", children)?;
                map.end()
            }
            OptionNode::Leaf { config } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("config", config)?;
                map.end()
            }
        }
    }
}
