//! # Option Tree Builder
//!
//! Walks the final unit set and builds the two-level decision tree offered
//! to the user: project/workspace path first, scheme (or fallback target)
//! name second, each leaf referencing a synthesized config by canonical
//! name. The config descriptors are emitted as a side stream in traversal
//! order, duplicates included; deduplication happens downstream.
//!
//! A unit without shared schemes is recoverable: its targets are enumerated
//! instead, the descriptors are flagged `missing_shared_schemes`, and a
//! warning is recorded (with a `.gitignore` hint when the shared-scheme
//! data directory looks gitignored, a strong signal of an accidental
//! omission).

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::models::{OptionNode, ProjectType, ProjectUnit, Warnings};
use crate::scanner::descriptor::ConfigDescriptor;
use crate::scanner::{discovery, steps};

/// The option tree plus the descriptor side stream of one scan pass.
#[derive(Debug)]
pub struct OptionsOutcome {
    pub options: OptionNode,
    pub descriptors: Vec<ConfigDescriptor>,
    pub warnings: Warnings,
}

/// Build the option tree and descriptor stream for the discovered units.
///
/// An empty unit set yields [`Error::DetectionEmpty`], the control signal
/// for the default-option fallback. A non-empty unit set that produces no
/// descriptors at all is a hard [`Error::NoValidConfig`].
pub fn execute(
    project_type: ProjectType,
    search_dir: &Path,
    units: &[ProjectUnit],
) -> Result<OptionsOutcome> {
    if units.is_empty() {
        return Err(Error::DetectionEmpty);
    }

    let shared_data_gitignored = gitignore_excludes_shared_data(search_dir);

    let mut root = OptionNode::internal(steps::PROJECT_PATH_TITLE, steps::PROJECT_PATH_ENV_KEY);
    let mut descriptors = Vec::new();
    let mut warnings = Warnings::new();

    for unit in units {
        info!("inspecting {}", unit.path);
        let mut scheme_node = OptionNode::internal(steps::SCHEME_TITLE, steps::SCHEME_ENV_KEY);

        let (carthage, carthage_warning) = discovery::carthage_state(search_dir, &unit.path);
        if let Some(warning) = carthage_warning {
            warnings.push(warning);
        }

        if unit.shared_schemes.is_empty() {
            warnings.push(format!(
                "No shared schemes found for project: {}. Automatically generated schemes \
                 may differ from the ones in your project. Make sure to share your schemes \
                 for the expected behaviour",
                unit.path
            ));
            if shared_data_gitignored {
                warnings.push(
                    "Your .gitignore contains 'xcshareddata', maybe shared schemes are \
                     gitignored? If not, make sure to share your schemes"
                        .to_string(),
                );
            }

            info!("{} user scheme(s) will be generated", unit.targets.len());
            for target in &unit.targets {
                let descriptor = ConfigDescriptor::new(
                    unit.is_pod_workspace,
                    carthage,
                    target.has_test,
                    true,
                );
                scheme_node.add_child(
                    target.name.clone(),
                    OptionNode::leaf(descriptor.config_name(project_type)),
                );
                descriptors.push(descriptor);
            }
        } else {
            debug!("{} shared scheme(s) detected", unit.shared_schemes.len());
            for scheme in &unit.shared_schemes {
                let descriptor = ConfigDescriptor::new(
                    unit.is_pod_workspace,
                    carthage,
                    scheme.has_test,
                    false,
                );
                scheme_node.add_child(
                    scheme.name.clone(),
                    OptionNode::leaf(descriptor.config_name(project_type)),
                );
                descriptors.push(descriptor);
            }
        }

        root.add_child(unit.path.clone(), scheme_node);
    }

    if descriptors.is_empty() {
        return Err(Error::NoValidConfig {
            project_type: project_type.tag().to_string(),
        });
    }

    Ok(OptionsOutcome {
        options: root,
        descriptors,
        warnings,
    })
}

fn gitignore_excludes_shared_data(search_dir: &Path) -> bool {
    fs::read_to_string(search_dir.join(".gitignore"))
        .map(|content| content.contains("xcshareddata"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CarthageState, Scheme, Target};
    use std::fs;
    use tempfile::TempDir;

    fn scheme_unit(path: &str) -> ProjectUnit {
        ProjectUnit::standalone(
            path,
            vec![Scheme::new("App", true), Scheme::new("Widget", false)],
            vec![Target::new("App", true)],
        )
    }

    fn target_only_unit(path: &str) -> ProjectUnit {
        ProjectUnit::standalone(
            path,
            vec![],
            vec![Target::new("A", true), Target::new("B", false)],
        )
    }

    #[test]
    fn test_empty_unit_set_is_detection_empty() {
        let temp = TempDir::new().unwrap();
        let err = execute(ProjectType::Ios, temp.path(), &[]).unwrap_err();
        assert!(matches!(err, Error::DetectionEmpty));
    }

    #[test]
    fn test_scheme_leaves_and_descriptors() {
        let temp = TempDir::new().unwrap();
        let units = vec![scheme_unit("App.xcodeproj")];

        let outcome = execute(ProjectType::Ios, temp.path(), &units).unwrap();
        assert_eq!(outcome.descriptors.len(), 2);
        assert!(outcome.descriptors[0].has_test);
        assert!(!outcome.descriptors[0].missing_shared_schemes);
        assert!(!outcome.descriptors[1].has_test);
        assert!(outcome.warnings.is_empty());

        let leaf = outcome
            .options
            .child("App.xcodeproj")
            .and_then(|n| n.child("App"))
            .unwrap();
        assert_eq!(leaf.config_name(), Some("ios-test-config"));
    }

    #[test]
    fn test_missing_schemes_falls_back_to_targets() {
        let temp = TempDir::new().unwrap();
        let units = vec![target_only_unit("App.xcodeproj")];

        let outcome = execute(ProjectType::Ios, temp.path(), &units).unwrap();
        assert_eq!(outcome.descriptors.len(), 2);
        assert!(outcome.descriptors.iter().all(|d| d.missing_shared_schemes));
        assert!(outcome.descriptors[0].has_test);
        assert!(!outcome.descriptors[1].has_test);

        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("No shared schemes found"));
        assert!(outcome.warnings[0].contains("App.xcodeproj"));
    }

    #[test]
    fn test_gitignored_shared_data_adds_hint_warning() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".gitignore"), "*.xcuserstate\nxcshareddata\n").unwrap();
        let units = vec![target_only_unit("App.xcodeproj")];

        let outcome = execute(ProjectType::Ios, temp.path(), &units).unwrap();
        assert_eq!(outcome.warnings.len(), 2);
        assert!(outcome.warnings[0].contains("No shared schemes found"));
        assert!(outcome.warnings[1].contains("xcshareddata"));
    }

    #[test]
    fn test_pod_workspace_flag_reaches_descriptor() {
        let temp = TempDir::new().unwrap();
        let mut unit =
            ProjectUnit::workspace("App.xcworkspace", vec![Scheme::new("App", true)], vec![]);
        unit.is_pod_workspace = true;

        let outcome = execute(ProjectType::Ios, temp.path(), &[unit]).unwrap();
        assert!(outcome.descriptors[0].has_podfile);
    }

    #[test]
    fn test_carthage_warning_is_threaded() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("Cartfile"), "github \"a/b\"").unwrap();
        let units = vec![scheme_unit("App.xcodeproj")];

        let outcome = execute(ProjectType::Ios, temp.path(), &units).unwrap();
        assert_eq!(outcome.descriptors[0].carthage_state, CarthageState::Update);
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("Cartfile.resolved"));
    }

    #[test]
    fn test_units_without_schemes_or_targets_is_no_valid_config() {
        let temp = TempDir::new().unwrap();
        let units = vec![ProjectUnit::standalone("Empty.xcodeproj", vec![], vec![])];

        let err = execute(ProjectType::Macos, temp.path(), &units).unwrap_err();
        assert!(matches!(err, Error::NoValidConfig { project_type } if project_type == "macos"));
    }

    #[test]
    fn test_identical_units_share_config_names_but_keep_leaves() {
        let temp = TempDir::new().unwrap();
        let units = vec![scheme_unit("A/App.xcodeproj"), scheme_unit("B/App.xcodeproj")];

        let outcome = execute(ProjectType::Ios, temp.path(), &units).unwrap();
        assert_eq!(outcome.descriptors.len(), 4);

        let leaf_a = outcome
            .options
            .child("A/App.xcodeproj")
            .and_then(|n| n.child("App"))
            .unwrap();
        let leaf_b = outcome
            .options
            .child("B/App.xcodeproj")
            .and_then(|n| n.child("App"))
            .unwrap();
        assert_eq!(leaf_a.config_name(), leaf_b.config_name());
    }
}
