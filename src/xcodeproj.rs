//! # Project Model Extraction
//!
//! Best-effort, text-based extraction of the pieces of an Xcode project the
//! scanner needs: shared schemes, native build targets, the SDK family, and
//! workspace membership. The full pbxproj/plist grammar is deliberately not
//! parsed; the few fields read here are stable, line-oriented and regular
//! enough for targeted matching.
//!
//! All `read_*` functions are tolerant: a container that is missing a file
//! (a project without shared schemes, a workspace without a membership
//! manifest) yields an empty result rather than an error, because both are
//! normal states for real repositories.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use regex::Regex;

use crate::models::{ProjectType, Scheme, Target};

/// Product types that mark a target as a test bundle rather than a
/// buildable product.
const TEST_PRODUCT_MARKERS: [&str; 2] = ["unit-test", "ui-testing"];

/// Determine the SDK family a project builds for from its `project.pbxproj`
/// content.
pub fn project_platform(pbxproj: &str) -> Option<ProjectType> {
    let re = Regex::new(r#"SDKROOT\s*=\s*"?(iphoneos|macosx)"#).ok()?;
    match re.captures(pbxproj)?.get(1)?.as_str() {
        "iphoneos" => Some(ProjectType::Ios),
        "macosx" => Some(ProjectType::Macos),
        _ => None,
    }
}

/// Read and classify the SDK family of a project bundle on disk.
pub fn read_project_platform(project_dir: &Path) -> Option<ProjectType> {
    let pbxproj = project_dir.join("project.pbxproj");
    match fs::read_to_string(&pbxproj) {
        Ok(content) => project_platform(&content),
        Err(err) => {
            debug!("cannot read {}: {}", pbxproj.display(), err);
            None
        }
    }
}

/// True when a scheme has at least one active testable reference.
pub fn scheme_has_test(xcscheme: &str) -> bool {
    // Attributes may wrap onto following lines, so match across newlines.
    Regex::new(r#"(?s)<TestableReference[^>]*skipped\s*=\s*"NO""#)
        .map(|re| re.is_match(xcscheme))
        .unwrap_or(false)
}

/// Read the shared schemes of a project or workspace bundle, in file-name
/// order. A container without an `xcshareddata/xcschemes` directory has no
/// shared schemes.
pub fn read_shared_schemes(container_dir: &Path) -> Vec<Scheme> {
    let schemes_dir = container_dir.join("xcshareddata").join("xcschemes");
    let entries = match fs::read_dir(&schemes_dir) {
        Ok(entries) => entries,
        Err(_) => return Vec::new(),
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "xcscheme"))
        .collect();
    paths.sort();

    let mut schemes = Vec::new();
    for path in paths {
        let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let has_test = match fs::read_to_string(&path) {
            Ok(content) => scheme_has_test(&content),
            Err(err) => {
                debug!("cannot read {}: {}", path.display(), err);
                false
            }
        };
        schemes.push(Scheme::new(name, has_test));
    }
    schemes
}

/// Extract the native, non-test build targets from `project.pbxproj`
/// content, in order of appearance.
///
/// A target is flagged test-capable when the project also carries a test
/// bundle whose name extends the target's name (`App` + `AppTests`).
pub fn targets(pbxproj: &str) -> Vec<Target> {
    let mut names: Vec<(String, String)> = Vec::new();

    let mut search_from = 0;
    while let Some(offset) = pbxproj[search_from..].find("isa = PBXNativeTarget;") {
        let block_start = search_from + offset;
        // Nested values inside a target block are lists closed with `);`,
        // so the first `};` terminates the block itself.
        let block_end = pbxproj[block_start..]
            .find("};")
            .map(|e| block_start + e)
            .unwrap_or(pbxproj.len());
        let block = &pbxproj[block_start..block_end];

        let name = capture(block, r#"name\s*=\s*"?([^";]+)"?;"#);
        let product_type = capture(block, r#"productType\s*=\s*"?([^";]+)"?;"#);
        if let (Some(name), Some(product_type)) = (name, product_type) {
            names.push((name, product_type));
        }

        search_from = block_end;
    }

    let test_bundles: Vec<&str> = names
        .iter()
        .filter(|(_, product)| TEST_PRODUCT_MARKERS.iter().any(|m| product.contains(m)))
        .map(|(name, _)| name.as_str())
        .collect();

    names
        .iter()
        .filter(|(_, product)| !TEST_PRODUCT_MARKERS.iter().any(|m| product.contains(m)))
        .map(|(name, _)| {
            let has_test = test_bundles
                .iter()
                .any(|bundle| bundle.starts_with(name.as_str()) && *bundle != name);
            Target::new(name.clone(), has_test)
        })
        .collect()
}

/// Read the build targets of a project bundle on disk.
pub fn read_targets(project_dir: &Path) -> Vec<Target> {
    let pbxproj = project_dir.join("project.pbxproj");
    match fs::read_to_string(&pbxproj) {
        Ok(content) => targets(&content),
        Err(err) => {
            debug!("cannot read {}: {}", pbxproj.display(), err);
            Vec::new()
        }
    }
}

/// Extract the project references of a workspace membership manifest
/// (`contents.xcworkspacedata`).
///
/// `group:` and `container:` locations are returned relative to the
/// workspace's parent directory; `absolute:` locations are returned as-is.
pub fn workspace_project_refs(contents: &str) -> Vec<PathBuf> {
    let Ok(re) = Regex::new(r#"location\s*=\s*"(group|container|absolute):([^"]+)""#) else {
        return Vec::new();
    };
    re.captures_iter(contents)
        .map(|caps| PathBuf::from(&caps[2]))
        .filter(|p| p.extension().is_some_and(|ext| ext == "xcodeproj"))
        .collect()
}

/// Read the project references of a workspace bundle on disk.
pub fn read_workspace_project_refs(workspace_dir: &Path) -> Vec<PathBuf> {
    let manifest = workspace_dir.join("contents.xcworkspacedata");
    match fs::read_to_string(&manifest) {
        Ok(content) => workspace_project_refs(&content),
        Err(err) => {
            debug!("cannot read {}: {}", manifest.display(), err);
            Vec::new()
        }
    }
}

fn capture(haystack: &str, pattern: &str) -> Option<String> {
    let re = Regex::new(pattern).ok()?;
    re.captures(haystack)
        .map(|caps| caps[1].trim().to_string())
}
