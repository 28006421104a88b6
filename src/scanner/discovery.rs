//! # Unit Discovery and Merge
//!
//! The first phase of a scan pass. Partitions the candidate file list into
//! standalone projects and workspaces, builds the initial unit set, then
//! fuses in the CocoaPods state: each Podfile's workspace directive either
//! marks a discovered workspace as pod-managed or synthesizes the workspace
//! it describes, and the member projects it names are absorbed out of the
//! standalone set.
//!
//! Candidate lists arrive sorted by path-component depth then
//! lexicographically, so shallower paths are processed first and win ties;
//! a Podfile directive matching several workspace candidates resolves to
//! the shallowest one.
//!
//! Unresolvable Podfile references are recoverable: they are recorded as
//! warnings and the Podfile is skipped for merge purposes. The Carthage
//! state is computed independently per project-owning directory and does
//! not move units around.

use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use regex::Regex;

use crate::error::Result;
use crate::models::{CarthageState, ProjectType, ProjectUnit, Warnings};
use crate::walker;
use crate::xcodeproj;

/// The final unit set of one discovery pass, standalone projects first,
/// workspaces after, both in candidate-list order.
#[derive(Debug)]
pub struct DiscoveredUnits {
    pub units: Vec<ProjectUnit>,
    pub warnings: Warnings,
}

/// Execute discovery and the Podfile merge for one project-type family.
pub fn execute(project_type: ProjectType, search_dir: &Path) -> Result<DiscoveredUnits> {
    let files = walker::list_files(search_dir)?;

    let project_files = walker::filter_project_files(&files, project_type, search_dir);
    info!(
        "{} {} project file(s) found",
        project_files.len(),
        project_type
    );
    for project in &project_files {
        debug!("- {}", project.display());
    }

    let workspace_files = walker::filter_workspace_files(&files, &project_files, search_dir);
    let podfiles = walker::filter_podfiles(&files);
    info!("{} Podfile(s) detected", podfiles.len());
    let cartfiles = walker::filter_cartfiles(&files);
    info!("{} Cartfile(s) detected", cartfiles.len());

    let mut warnings = Warnings::new();

    // Workspace units aggregate their members' schemes and targets.
    let mut workspaces: Vec<ProjectUnit> = Vec::new();
    let mut referenced: Vec<PathBuf> = Vec::new();
    for workspace_rel in &workspace_files {
        let members = walker::workspace_members(workspace_rel, search_dir);
        let mut unit = ProjectUnit::workspace(
            workspace_rel.to_string_lossy(),
            xcodeproj::read_shared_schemes(&search_dir.join(workspace_rel)),
            Vec::new(),
        );
        for member in &members {
            let member_dir = search_dir.join(member);
            unit.absorb(
                &xcodeproj::read_shared_schemes(&member_dir),
                &xcodeproj::read_targets(&member_dir),
            );
        }
        referenced.extend(members);
        workspaces.push(unit);
    }

    // Projects not referenced by any workspace stand alone.
    let mut standalones: Vec<ProjectUnit> = project_files
        .iter()
        .filter(|rel| !referenced.contains(*rel))
        .map(|rel| {
            let project_dir = search_dir.join(rel);
            ProjectUnit::standalone(
                rel.to_string_lossy(),
                xcodeproj::read_shared_schemes(&project_dir),
                xcodeproj::read_targets(&project_dir),
            )
        })
        .collect();

    for podfile in &podfiles {
        debug!("- {}", podfile.display());
        merge_podfile(
            podfile,
            search_dir,
            &project_files,
            &mut standalones,
            &mut workspaces,
            &mut warnings,
        );
    }

    let mut units = standalones;
    units.append(&mut workspaces);
    Ok(DiscoveredUnits { units, warnings })
}

/// Apply one Podfile's workspace/project directives to the unit sets.
fn merge_podfile(
    podfile: &Path,
    search_dir: &Path,
    project_files: &[PathBuf],
    standalones: &mut Vec<ProjectUnit>,
    workspaces: &mut Vec<ProjectUnit>,
    warnings: &mut Warnings,
) {
    let content = match fs::read_to_string(search_dir.join(podfile)) {
        Ok(content) => content,
        Err(err) => {
            warnings.push(format!(
                "Podfile at ({}) could not be read: {}; skipping it",
                podfile.display(),
                err
            ));
            return;
        }
    };

    let pod_dir = podfile.parent().unwrap_or(Path::new(""));

    // Member projects: explicit `project` directives, or every discovered
    // project in the Podfile's own directory.
    let directives = project_directives(&content);
    let members: Vec<PathBuf> = if directives.is_empty() {
        project_files
            .iter()
            .filter(|rel| rel.parent().unwrap_or(Path::new("")) == pod_dir)
            .cloned()
            .collect()
    } else {
        directives
            .iter()
            .map(|name| walker::normalize(&pod_dir.join(with_extension(name, "xcodeproj"))))
            .filter(|resolved| project_files.contains(resolved))
            .collect()
    };

    if members.is_empty() {
        warnings.push(format!(
            "Podfile at ({}) references no discovered project; skipping it",
            podfile.display()
        ));
        return;
    }

    let workspace_rel = match workspace_directive(&content) {
        Some(name) => walker::normalize(&pod_dir.join(with_extension(&name, "xcworkspace"))),
        None if members.len() == 1 => members[0].with_extension("xcworkspace"),
        None => {
            warnings.push(format!(
                "Podfile at ({}) configures multiple projects but names no workspace; skipping it",
                podfile.display()
            ));
            return;
        }
    };
    let workspace_path = workspace_rel.to_string_lossy().to_string();

    // First match in the depth-then-lexical unit order wins, so a directive
    // matching several candidates resolves to the shallowest path.
    match workspaces.iter().position(|w| w.path == workspace_path) {
        Some(index) => {
            workspaces[index].is_pod_workspace = true;
            for member in &members {
                if let Some(unit) = take_standalone(standalones, member) {
                    workspaces[index].absorb(&unit.shared_schemes, &unit.targets);
                }
            }
        }
        None => {
            info!(
                "synthesizing pod workspace {} from {}",
                workspace_path,
                podfile.display()
            );
            let mut unit = ProjectUnit::workspace(workspace_path, Vec::new(), Vec::new());
            unit.is_pod_workspace = true;
            for member in &members {
                match take_standalone(standalones, member) {
                    Some(absorbed) => unit.absorb(&absorbed.shared_schemes, &absorbed.targets),
                    None => {
                        let member_dir = search_dir.join(member);
                        unit.absorb(
                            &xcodeproj::read_shared_schemes(&member_dir),
                            &xcodeproj::read_targets(&member_dir),
                        );
                    }
                }
            }
            workspaces.push(unit);
        }
    }
}

fn take_standalone(standalones: &mut Vec<ProjectUnit>, member: &Path) -> Option<ProjectUnit> {
    let member_path = member.to_string_lossy();
    standalones
        .iter()
        .position(|unit| unit.path == member_path)
        .map(|index| standalones.remove(index))
}

fn with_extension(name: &str, extension: &str) -> PathBuf {
    let path = PathBuf::from(name);
    if path.extension().is_some_and(|ext| ext == extension) {
        path
    } else {
        PathBuf::from(format!("{}.{}", name, extension))
    }
}

fn workspace_directive(podfile: &str) -> Option<String> {
    let re = Regex::new(r#"(?m)^\s*workspace\s+['"]([^'"]+)['"]"#).ok()?;
    re.captures(podfile).map(|caps| caps[1].to_string())
}

fn project_directives(podfile: &str) -> Vec<String> {
    let Ok(re) = Regex::new(r#"(?m)^\s*project\s+['"]([^'"]+)['"]"#) else {
        return Vec::new();
    };
    re.captures_iter(podfile)
        .map(|caps| caps[1].to_string())
        .collect()
}

/// Compute the Carthage state for the directory owning a unit, together
/// with the commit-your-resolved-file recommendation when applicable.
pub fn carthage_state(search_dir: &Path, unit_path: &str) -> (CarthageState, Option<String>) {
    let owning_dir = Path::new(unit_path).parent().unwrap_or(Path::new(""));
    let cartfile = search_dir.join(owning_dir).join("Cartfile");
    if !cartfile.exists() {
        return (CarthageState::None, None);
    }
    if cartfile.with_file_name("Cartfile.resolved").exists() {
        (CarthageState::Bootstrap, None)
    } else {
        let warning = format!(
            "Cartfile found at ({}), but no Cartfile.resolved exists in the same directory. \
             It is strongly recommended to commit this file to your repository",
            owning_dir.join("Cartfile").display()
        );
        (CarthageState::Update, Some(warning))
    }
}
