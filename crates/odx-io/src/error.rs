//! Error types for odx-io.
//!
//! Every variant is fatal to the batch run: there is no retry and no
//! partial-output cleanup.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExportError>;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("result source not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("step not found: {0}")]
    StepNotFound(String),

    #[error("step has no frames: {0}")]
    FrameNotFound(String),

    #[error("instance not found: {0}")]
    InstanceNotFound(String),

    #[error("element set not found: {0}")]
    ExclusionSetNotFound(String),

    #[error("field output not found: {0}")]
    FieldNotFound(String),

    #[error("field {field} has no value for label {label}")]
    FieldValueMissing { field: String, label: i32 },

    #[error("element {element} references node {node} outside the node table (max label {max})")]
    ConnectivityOutOfRange { element: i32, node: i32, max: i32 },

    #[error("failed to write {path}: {source}")]
    WriteFailure {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
