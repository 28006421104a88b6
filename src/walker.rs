//! # File Listing and Candidate Filtering
//!
//! Produces the deterministically ordered file list every scan pass starts
//! from: paths relative to the search directory, sorted by path-component
//! depth and then lexicographically, so shallower paths are processed first
//! and win ties during merging.
//!
//! The filters carve that list into the candidate sets the scanner cares
//! about (project bundles, workspace bundles, Podfiles, Cartfiles), dropping
//! anything under vendored or generated directories.

use std::path::{Component, Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::Result;
use crate::models::ProjectType;
use crate::xcodeproj;

/// Directory names never worth descending into for detection purposes.
const IGNORED_COMPONENTS: [&str; 4] = [".git", "Pods", "Carthage", "node_modules"];

/// List every file and directory under `search_dir`, relative to it, sorted
/// by component count and then lexicographically.
///
/// Directories are included because project and workspace bundles are
/// directories on disk.
pub fn list_files(search_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(search_dir).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let Ok(rel) = entry.path().strip_prefix(search_dir) else {
            continue;
        };
        if rel.as_os_str().is_empty() {
            continue;
        }
        paths.push(rel.to_path_buf());
    }
    sort_by_components(&mut paths);
    Ok(paths)
}

/// Sort paths by component depth first, then lexicographically.
pub fn sort_by_components(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| {
        let depth_a = a.components().count();
        let depth_b = b.components().count();
        depth_a.cmp(&depth_b).then_with(|| a.cmp(b))
    });
}

/// True when any path component is a vendored/generated directory or a
/// prebuilt framework bundle.
pub fn is_ignored(rel: &Path) -> bool {
    rel.components().any(|component| {
        let Component::Normal(name) = component else {
            return false;
        };
        let Some(name) = name.to_str() else {
            return true;
        };
        IGNORED_COMPONENTS.contains(&name) || name.ends_with(".framework")
    })
}

/// True when the path sits inside another bundle directory with the given
/// extension (e.g. a workspace embedded in a `.xcodeproj`).
fn is_embedded_in(rel: &Path, bundle_ext: &str) -> bool {
    rel.ancestors()
        .skip(1)
        .any(|ancestor| ancestor.extension().is_some_and(|ext| ext == bundle_ext))
}

fn has_extension(rel: &Path, wanted: &str) -> bool {
    rel.extension().is_some_and(|ext| ext == wanted)
}

fn has_file_name(rel: &Path, wanted: &str) -> bool {
    rel.file_name().is_some_and(|name| name == wanted)
}

/// Project bundles relevant for one project-type family, preserving list
/// order. Relevance is decided by the SDK recorded in the project file;
/// projects with no readable SDK are skipped.
pub fn filter_project_files(
    files: &[PathBuf],
    project_type: ProjectType,
    search_dir: &Path,
) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|rel| has_extension(rel, "xcodeproj") && !is_ignored(rel))
        .filter(|rel| {
            match xcodeproj::read_project_platform(&search_dir.join(rel)) {
                Some(platform) => platform == project_type,
                None => {
                    debug!("skipping {} (no readable SDK)", rel.display());
                    false
                }
            }
        })
        .cloned()
        .collect()
}

/// Workspace bundles referencing at least one relevant project, preserving
/// list order. Workspaces embedded inside project bundles are never
/// candidates.
pub fn filter_workspace_files(
    files: &[PathBuf],
    relevant_projects: &[PathBuf],
    search_dir: &Path,
) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|rel| {
            has_extension(rel, "xcworkspace")
                && !is_ignored(rel)
                && !is_embedded_in(rel, "xcodeproj")
        })
        .filter(|rel| {
            workspace_members(rel, search_dir)
                .iter()
                .any(|member| relevant_projects.contains(member))
        })
        .cloned()
        .collect()
}

/// Resolve a workspace's member-project references to paths relative to the
/// search directory.
pub fn workspace_members(workspace_rel: &Path, search_dir: &Path) -> Vec<PathBuf> {
    let base = workspace_rel.parent().unwrap_or(Path::new(""));
    xcodeproj::read_workspace_project_refs(&search_dir.join(workspace_rel))
        .into_iter()
        .map(|reference| {
            if reference.is_absolute() {
                reference
                    .strip_prefix(search_dir)
                    .map(Path::to_path_buf)
                    .unwrap_or(reference)
            } else {
                normalize(&base.join(reference))
            }
        })
        .collect()
}

/// Podfiles, preserving list order.
pub fn filter_podfiles(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|rel| has_file_name(rel, "Podfile") && !is_ignored(rel))
        .cloned()
        .collect()
}

/// Cartfiles, preserving list order.
pub fn filter_cartfiles(files: &[PathBuf]) -> Vec<PathBuf> {
    files
        .iter()
        .filter(|rel| has_file_name(rel, "Cartfile") && !is_ignored(rel))
        .cloned()
        .collect()
}

/// Lexically resolve `.` and `..` components without touching the
/// filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn paths(raw: &[&str]) -> Vec<PathBuf> {
        raw.iter().map(PathBuf::from).collect()
    }

    // ========================================================================
    // Ordering
    // ========================================================================

    #[test]
    fn test_sort_by_components_depth_first() {
        let mut list = paths(&[
            "deep/nested/App.xcodeproj",
            "zz.xcodeproj",
            "aa/App.xcodeproj",
            "aa.xcodeproj",
        ]);
        sort_by_components(&mut list);
        assert_eq!(
            list,
            paths(&[
                "aa.xcodeproj",
                "zz.xcodeproj",
                "aa/App.xcodeproj",
                "deep/nested/App.xcodeproj",
            ])
        );
    }

    #[test]
    fn test_list_files_is_relative_and_sorted() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("sub/dir")).unwrap();
        fs::write(temp.path().join("sub/dir/file.txt"), "x").unwrap();
        fs::write(temp.path().join("root.txt"), "x").unwrap();

        let files = list_files(temp.path()).unwrap();
        assert_eq!(
            files,
            paths(&["root.txt", "sub", "sub/dir", "sub/dir/file.txt"])
        );
    }

    // ========================================================================
    // Ignore rules
    // ========================================================================

    #[test]
    fn test_ignored_components() {
        assert!(is_ignored(Path::new("Pods/Pods.xcodeproj")));
        assert!(is_ignored(Path::new(".git/hooks")));
        assert!(is_ignored(Path::new("Carthage/Checkouts/Dep/Dep.xcodeproj")));
        assert!(is_ignored(Path::new("Vendor/Lib.framework/Headers")));
        assert!(!is_ignored(Path::new("App/App.xcodeproj")));
    }

    #[test]
    fn test_embedded_workspace_detection() {
        assert!(is_embedded_in(
            Path::new("App.xcodeproj/project.xcworkspace"),
            "xcodeproj"
        ));
        assert!(!is_embedded_in(Path::new("App.xcworkspace"), "xcodeproj"));
    }

    // ========================================================================
    // Filters
    // ========================================================================

    #[test]
    fn test_filter_podfiles_and_cartfiles() {
        let files = paths(&[
            "Podfile",
            "App/Cartfile",
            "Pods/Podfile",
            "docs/Podfile.md",
            "Cartfile.resolved",
        ]);
        assert_eq!(filter_podfiles(&files), paths(&["Podfile"]));
        assert_eq!(filter_cartfiles(&files), paths(&["App/Cartfile"]));
    }

    #[test]
    fn test_filter_project_files_by_sdk() {
        let temp = TempDir::new().unwrap();
        let ios = temp.path().join("Ios.xcodeproj");
        let mac = temp.path().join("Mac.xcodeproj");
        fs::create_dir_all(&ios).unwrap();
        fs::create_dir_all(&mac).unwrap();
        fs::write(ios.join("project.pbxproj"), "SDKROOT = iphoneos;").unwrap();
        fs::write(mac.join("project.pbxproj"), "SDKROOT = macosx;").unwrap();

        let files = paths(&["Ios.xcodeproj", "Mac.xcodeproj"]);
        assert_eq!(
            filter_project_files(&files, ProjectType::Ios, temp.path()),
            paths(&["Ios.xcodeproj"])
        );
        assert_eq!(
            filter_project_files(&files, ProjectType::Macos, temp.path()),
            paths(&["Mac.xcodeproj"])
        );
    }

    #[test]
    fn test_filter_workspace_files_requires_relevant_member() {
        let temp = TempDir::new().unwrap();
        let ws = temp.path().join("App.xcworkspace");
        fs::create_dir_all(&ws).unwrap();
        fs::write(
            ws.join("contents.xcworkspacedata"),
            r#"<FileRef location = "group:App.xcodeproj"></FileRef>"#,
        )
        .unwrap();

        let files = paths(&["App.xcworkspace"]);
        let relevant = paths(&["App.xcodeproj"]);
        assert_eq!(
            filter_workspace_files(&files, &relevant, temp.path()),
            paths(&["App.xcworkspace"])
        );

        let unrelated = paths(&["Other.xcodeproj"]);
        assert!(filter_workspace_files(&files, &unrelated, temp.path()).is_empty());
    }

    // ========================================================================
    // Path normalization
    // ========================================================================

    #[test]
    fn test_normalize_resolves_dots() {
        assert_eq!(
            normalize(Path::new("a/b/../c/./App.xcodeproj")),
            PathBuf::from("a/c/App.xcodeproj")
        );
        assert_eq!(normalize(Path::new("../up")), PathBuf::from("../up"));
    }
}
