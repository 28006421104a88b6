//! # Error Handling
//!
//! Centralized error type for the scan pipeline, built with `thiserror`.
//!
//! Two variants are control signals rather than user-facing failures:
//!
//! - [`Error::DetectionEmpty`] tells the caller that discovery found no
//!   project units, so the default option tree and config should be used.
//!   It never surfaces to the user as an error.
//! - [`Error::RecipeInvariant`] marks an internal synthesis inconsistency
//!   (a programming defect, not a problem with the scanned tree).
//!
//! Everything recoverable during a scan (an unresolvable Podfile reference,
//! a project with no shared schemes) is reported through the warnings list
//! instead of this enum.

use thiserror::Error;

/// Main error type for pipescout operations
#[derive(Error, Debug)]
pub enum Error {
    /// No relevant project files were found for the requested project type.
    ///
    /// This is a control signal, not a failure: the caller is expected to
    /// fall back to the default option tree and default config.
    #[error("no project files detected")]
    DetectionEmpty,

    /// Scanning finished without producing a single config descriptor for a
    /// project type that was explicitly requested.
    #[error("no valid {project_type} config found")]
    NoValidConfig { project_type: String },

    /// An internal inconsistency in the step-assembly recipe, such as two
    /// distinct descriptors collapsing to the same canonical config name.
    #[error("config recipe invariant violated: {message}")]
    RecipeInvariant { message: String },

    /// The caller asked for a project type this scanner does not know.
    #[error("unknown project type: {tag} (expected one of: ios, macos)")]
    UnknownProjectType { tag: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML serialization error, wrapped from `serde_yaml::Error`.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A JSON serialization error, wrapped from `serde_json::Error`.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
