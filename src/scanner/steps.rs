//! # Step Catalog
//!
//! The fixed vocabulary of pipeline steps the synthesizer assembles from:
//! step ids pinned to known-good versions, the input keys they accept, and
//! the user-input axes (project path, scheme) late-bound through environment
//! variables so one config serves every leaf that references it.

use crate::pipeline::Step;

/// Input key for the project or workspace path.
pub const PROJECT_PATH_INPUT_KEY: &str = "project_path";
/// Environment variable the chosen project path is bound to.
pub const PROJECT_PATH_ENV_KEY: &str = "CI_PROJECT_PATH";
/// Option-tree axis title for the project path decision.
pub const PROJECT_PATH_TITLE: &str = "Project (or Workspace) path";

/// Input key for the scheme name.
pub const SCHEME_INPUT_KEY: &str = "scheme";
/// Environment variable the chosen scheme is bound to.
pub const SCHEME_ENV_KEY: &str = "CI_SCHEME";
/// Option-tree axis title for the scheme decision.
pub const SCHEME_TITLE: &str = "Scheme name";

/// Input key for the carthage subcommand.
pub const CARTHAGE_COMMAND_INPUT_KEY: &str = "carthage_command";

/// Signing key variable gating the SSH activation step at execution time.
pub const SSH_KEY_ENV: &str = "SSH_RSA_PRIVATE_KEY";

fn env_ref(env_key: &str) -> String {
    format!("${}", env_key)
}

/// SSH key activation, skipped when no key is configured.
pub fn activate_ssh_key() -> Step {
    Step::new("activate-ssh-key", "4.0.5")
        .with_run_if(format!(r#"{{{{getenv "{}" | ne ""}}}}"#, SSH_KEY_ENV))
}

/// Source checkout.
pub fn git_clone() -> Step {
    Step::new("git-clone", "6.0.1")
}

/// Code-signing certificate and provisioning profile installation.
pub fn certificate_and_profile_installer() -> Step {
    Step::new("certificate-and-profile-installer", "1.10.1")
}

/// Scheme regeneration for projects whose schemes are not shared.
pub fn recreate_user_schemes() -> Step {
    Step::new("recreate-user-schemes", "1.0.2")
        .with_input(PROJECT_PATH_INPUT_KEY, env_ref(PROJECT_PATH_ENV_KEY))
}

/// CocoaPods dependency installation.
pub fn cocoapods_install() -> Step {
    Step::new("cocoapods-install", "2.0.3")
}

/// Carthage dependency fetch with the resolved subcommand.
pub fn carthage(command: &str) -> Step {
    Step::new("carthage", "3.2.1").with_input(CARTHAGE_COMMAND_INPUT_KEY, command)
}

fn with_project_inputs(step: Step) -> Step {
    step.with_input(PROJECT_PATH_INPUT_KEY, env_ref(PROJECT_PATH_ENV_KEY))
        .with_input(SCHEME_INPUT_KEY, env_ref(SCHEME_ENV_KEY))
}

/// iOS test run.
pub fn xcode_test() -> Step {
    with_project_inputs(Step::new("xcode-test", "4.1.2"))
}

/// macOS test run.
pub fn xcode_test_mac() -> Step {
    with_project_inputs(Step::new("xcode-test-mac", "1.3.0"))
}

/// iOS archive.
pub fn xcode_archive() -> Step {
    with_project_inputs(Step::new("xcode-archive", "4.5.0"))
}

/// macOS archive.
pub fn xcode_archive_mac() -> Step {
    with_project_inputs(Step::new("xcode-archive-mac", "1.8.1"))
}

/// Build artifact upload.
pub fn deploy_artifacts() -> Step {
    Step::new("deploy-artifacts", "2.1.0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_ssh_key_is_conditional() {
        let step = activate_ssh_key();
        let run_if = step.run_if.as_deref().unwrap();
        assert!(run_if.contains(SSH_KEY_ENV));
        assert!(run_if.contains("getenv"));
    }

    #[test]
    fn test_project_inputs_are_env_references() {
        let step = xcode_test();
        assert_eq!(step.inputs.len(), 2);
        assert_eq!(step.inputs[0].key, PROJECT_PATH_INPUT_KEY);
        assert_eq!(step.inputs[0].value, "$CI_PROJECT_PATH");
        assert_eq!(step.inputs[1].key, SCHEME_INPUT_KEY);
        assert_eq!(step.inputs[1].value, "$CI_SCHEME");
    }

    #[test]
    fn test_carthage_carries_resolved_command() {
        let step = carthage("bootstrap");
        assert_eq!(step.inputs[0].key, CARTHAGE_COMMAND_INPUT_KEY);
        assert_eq!(step.inputs[0].value, "bootstrap");
    }

    #[test]
    fn test_recreate_user_schemes_binds_project_path() {
        let step = recreate_user_schemes();
        assert_eq!(step.inputs[0].value, "$CI_PROJECT_PATH");
    }
}
