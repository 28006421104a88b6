//! # Config Descriptors
//!
//! The minimal flag set that fully determines one synthesized pipeline
//! shape, plus canonical naming and stream deduplication. Dozens of schemes
//! routinely collapse to a handful of distinct shapes, so the descriptor
//! stream is deduplicated by canonical name before synthesis, preserving
//! first-seen order.

use std::collections::HashSet;

use crate::models::{CarthageState, ProjectType};

/// The flag set determining one pipeline shape.
///
/// Two descriptors with equal fields are interchangeable; the canonical
/// name is injective over the reachable field combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConfigDescriptor {
    pub has_podfile: bool,
    pub carthage_state: CarthageState,
    pub has_test: bool,
    pub missing_shared_schemes: bool,
}

impl ConfigDescriptor {
    pub fn new(
        has_podfile: bool,
        carthage_state: CarthageState,
        has_test: bool,
        missing_shared_schemes: bool,
    ) -> Self {
        Self {
            has_podfile,
            carthage_state,
            has_test,
            missing_shared_schemes,
        }
    }

    /// The canonical config name: the project-type tag followed by one
    /// suffix per set flag, in fixed order.
    pub fn config_name(&self, project_type: ProjectType) -> String {
        let mut qualifiers = String::new();
        if self.has_podfile {
            qualifiers.push_str("-pod");
        }
        match self.carthage_state {
            CarthageState::None => {}
            CarthageState::Bootstrap => qualifiers.push_str("-carthage-bootstrap"),
            CarthageState::Update => qualifiers.push_str("-carthage-update"),
        }
        if self.has_test {
            qualifiers.push_str("-test");
        }
        if self.missing_shared_schemes {
            qualifiers.push_str("-missing-shared-schemes");
        }
        format!("{}{}-config", project_type.tag(), qualifiers)
    }
}

/// The name of the fallback config generated when nothing was detected.
pub fn default_config_name(project_type: ProjectType) -> String {
    format!("default-{}-config", project_type.tag())
}

/// Drop descriptors whose canonical name was already seen, preserving
/// first-seen order.
pub fn dedup(
    descriptors: &[ConfigDescriptor],
    project_type: ProjectType,
) -> Vec<ConfigDescriptor> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut unique = Vec::new();
    for descriptor in descriptors {
        if seen.insert(descriptor.config_name(project_type)) {
            unique.push(*descriptor);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const STATES: [CarthageState; 3] = [
        CarthageState::None,
        CarthageState::Bootstrap,
        CarthageState::Update,
    ];

    fn all_descriptors() -> Vec<ConfigDescriptor> {
        let mut all = Vec::new();
        for has_podfile in [false, true] {
            for carthage_state in STATES {
                for has_test in [false, true] {
                    for missing in [false, true] {
                        all.push(ConfigDescriptor::new(
                            has_podfile,
                            carthage_state,
                            has_test,
                            missing,
                        ));
                    }
                }
            }
        }
        all
    }

    #[test]
    fn test_config_name_plain() {
        let descriptor = ConfigDescriptor::new(false, CarthageState::None, false, false);
        assert_eq!(descriptor.config_name(ProjectType::Ios), "ios-config");
    }

    #[test]
    fn test_config_name_all_flags() {
        let descriptor = ConfigDescriptor::new(true, CarthageState::Bootstrap, true, true);
        assert_eq!(
            descriptor.config_name(ProjectType::Macos),
            "macos-pod-carthage-bootstrap-test-missing-shared-schemes-config"
        );
    }

    #[test]
    fn test_config_names_injective_over_all_combinations() {
        let all = all_descriptors();
        assert_eq!(all.len(), 24);
        for project_type in ProjectType::ALL {
            let names: HashSet<String> = all
                .iter()
                .map(|d| d.config_name(project_type))
                .collect();
            assert_eq!(names.len(), all.len());
        }
    }

    #[test]
    fn test_config_names_distinct_across_project_types() {
        let descriptor = ConfigDescriptor::new(true, CarthageState::Update, true, false);
        assert_ne!(
            descriptor.config_name(ProjectType::Ios),
            descriptor.config_name(ProjectType::Macos)
        );
    }

    #[test]
    fn test_default_config_name() {
        assert_eq!(default_config_name(ProjectType::Ios), "default-ios-config");
        assert_eq!(
            default_config_name(ProjectType::Macos),
            "default-macos-config"
        );
    }

    #[test]
    fn test_dedup_preserves_first_seen_order() {
        let a = ConfigDescriptor::new(false, CarthageState::None, true, false);
        let b = ConfigDescriptor::new(true, CarthageState::None, true, false);
        let stream = vec![a, b, a, b, a];

        let unique = dedup(&stream, ProjectType::Ios);
        assert_eq!(unique, vec![a, b]);
    }

    #[test]
    fn test_dedup_keeps_distinct_descriptors() {
        let all = all_descriptors();
        let unique = dedup(&all, ProjectType::Ios);
        assert_eq!(unique, all);
    }

    proptest! {
        #[test]
        fn prop_dedup_is_idempotent(
            indices in proptest::collection::vec(0usize..24, 0..64)
        ) {
            let all = all_descriptors();
            let stream: Vec<ConfigDescriptor> =
                indices.into_iter().map(|i| all[i]).collect();

            let once = dedup(&stream, ProjectType::Ios);
            let twice = dedup(&once, ProjectType::Ios);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_dedup_output_has_unique_names(
            indices in proptest::collection::vec(0usize..24, 0..64)
        ) {
            let all = all_descriptors();
            let stream: Vec<ConfigDescriptor> =
                indices.into_iter().map(|i| all[i]).collect();

            let unique = dedup(&stream, ProjectType::Macos);
            let names: HashSet<String> = unique
                .iter()
                .map(|d| d.config_name(ProjectType::Macos))
                .collect();
            prop_assert_eq!(names.len(), unique.len());
        }
    }
}
