//! # pipescout
//!
//! This library scans a source tree for buildable Apple-platform project
//! units (standalone Xcode projects and multi-project workspaces, together
//! with their CocoaPods/Carthage dependency state) and deterministically
//! synthesizes complete CI/CD pipeline configurations, an option tree for
//! resolving ambiguity among them, and a list of non-fatal warnings. It is
//! used by the `pipescout` command-line tool but can be embedded anywhere a
//! project needs CI configuration proposals.
//!
//! ## Quick Example
//!
//! ```no_run
//! use std::path::Path;
//! use pipescout::scanner::{self, ProjectType};
//!
//! let outcome = scanner::scan(ProjectType::Ios, Path::new("."))?;
//! for (name, document) in outcome.configs.iter() {
//!     println!("{}:\n{}", name, document.to_yaml()?);
//! }
//! # Ok::<(), pipescout::error::Error>(())
//! ```
//!
//! ## Core Concepts
//!
//! - **Project units (`models`)**: immutable descriptions of discovered
//!   projects and workspaces with their shared schemes, targets and
//!   pod-workspace association.
//! - **Scanning (`scanner`)**: the four-stage pass of discovery and merge,
//!   option tree building, descriptor deduplication, config synthesis.
//! - **Pipeline documents (`pipeline`)**: the serializable two-workflow
//!   configuration shape the synthesizer produces.
//! - **Results (`result`)**: the aggregate document written at the end of a
//!   CLI run, one section per scanned project-type family.
//!
//! ## Execution Flow
//!
//! A scan pass is a single synchronous sweep over an already-materialized
//! file list:
//!
//! 1. **Walk** (`walker`): list files relative to the search directory,
//!    sorted by path-component depth then lexicographically.
//! 2. **Discover & merge** (`scanner::discovery`): partition candidates
//!    into standalone projects and workspaces, then fuse in the Podfile
//!    associations and Carthage state.
//! 3. **Build options** (`scanner::options`): one decision axis per unit
//!    and per scheme, emitting config descriptors as a side stream.
//! 4. **Deduplicate** (`scanner::descriptor`) and **synthesize**
//!    (`scanner::synth`): one pipeline document per distinct shape.
//!
//! Determinism is a first-class requirement: identical inputs always
//! produce byte-identical trees, documents and warning sequences.

pub mod error;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod result;
pub mod scanner;
pub mod walker;
pub mod xcodeproj;
