//! Shared fixture builders for integration tests.
//!
//! Builds minimal on-disk Xcode project and workspace bundles: just enough
//! of `project.pbxproj`, `xcshareddata/xcschemes/*.xcscheme` and
//! `contents.xcworkspacedata` for the scanner's text extraction to see
//! realistic structure.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Render a minimal pbxproj with the given SDK and native targets.
///
/// `targets` entries are `(name, is_test_bundle)`.
pub fn pbxproj(sdk: &str, targets: &[(&str, bool)]) -> String {
    let mut out = String::from("// !$*UTF8*$!\n");
    for (name, is_test) in targets {
        let product = if *is_test {
            "com.apple.product-type.bundle.unit-test"
        } else {
            "com.apple.product-type.application"
        };
        out.push_str(&format!(
            "AA00 /* {name} */ = {{\n    isa = PBXNativeTarget;\n    buildPhases = (\n    );\n    name = {name};\n    productType = \"{product}\";\n}};\n"
        ));
    }
    out.push_str(&format!("SDKROOT = {sdk};\n"));
    out
}

/// Render a minimal scheme file; `has_test` controls whether a testable
/// reference is active.
pub fn scheme_xml(has_test: bool) -> String {
    let skipped = if has_test { "NO" } else { "YES" };
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Scheme version = "1.3">
   <TestAction buildConfiguration = "Debug">
      <Testables>
         <TestableReference
            skipped = "{skipped}">
         </TestableReference>
      </Testables>
   </TestAction>
</Scheme>
"#
    )
}

/// Write a project bundle with shared schemes and targets.
pub fn write_project(
    root: &Path,
    rel: &str,
    sdk: &str,
    shared_schemes: &[(&str, bool)],
    targets: &[(&str, bool)],
) {
    let project = root.join(rel);
    fs::create_dir_all(&project).unwrap();
    fs::write(project.join("project.pbxproj"), pbxproj(sdk, targets)).unwrap();

    if !shared_schemes.is_empty() {
        let schemes_dir = project.join("xcshareddata").join("xcschemes");
        fs::create_dir_all(&schemes_dir).unwrap();
        for (name, has_test) in shared_schemes {
            fs::write(
                schemes_dir.join(format!("{name}.xcscheme")),
                scheme_xml(*has_test),
            )
            .unwrap();
        }
    }
}

/// Write a workspace bundle referencing the given member projects.
pub fn write_workspace(root: &Path, rel: &str, member_refs: &[&str]) {
    let workspace = root.join(rel);
    fs::create_dir_all(&workspace).unwrap();
    let refs: String = member_refs
        .iter()
        .map(|member| format!(r#"   <FileRef location = "group:{member}"></FileRef>"#))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(
        workspace.join("contents.xcworkspacedata"),
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<Workspace version = "1.0">
{refs}
</Workspace>
"#
        ),
    )
    .unwrap();
}
