use std::path::PathBuf;
use thiserror::Error;

use crate::schema::ObjectType;
use crate::translate::TranslationReport;
use crate::validate::ValidationReport;

/// The main error type for transom operations.
#[derive(Debug, Error)]
pub enum TransomError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse model JSON from {path}: {source}")]
    ModelJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write model JSON to {path}: {source}")]
    ModelJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse workspace JSON from {path}: {source}")]
    WorkspaceJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write workspace JSON to {path}: {source}")]
    WorkspaceJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse schema JSON from {path}: {source}")]
    SchemaJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write schema JSON to {path}: {source}")]
    SchemaJsonWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Validation failed with {error_count} error(s) and {warning_count} warning(s)")]
    ValidationFailed {
        error_count: usize,
        warning_count: usize,
        report: ValidationReport,
    },

    /// The same identity was registered twice in one pass. This is a walker
    /// invariant violation, fatal to the pass.
    #[error("Duplicate registration of {object_type} '{name}' in one translation pass")]
    DuplicateRegistration {
        object_type: ObjectType,
        name: String,
        report: TranslationReport,
    },

    /// The reference chain exceeded the configured depth bound; fatal to the
    /// pass.
    #[error("Recursion limit of {limit} exceeded while resolving references")]
    RecursionLimitExceeded {
        limit: usize,
        report: TranslationReport,
    },

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}
