//! Error types for annotation session operations.

use thiserror::Error;

use crate::viewer::ViewerError;

/// Errors that can occur while building or running an annotation session.
#[derive(Error, Debug)]
pub enum TaskError {
    /// I/O error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing or serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Viewer type identifier not present in the registry
    #[error("Viewer type '{name}' not found")]
    UnknownViewer {
        /// The identifier that was requested
        name: String,
    },

    /// Required field is missing from a task document
    #[error("Missing required field: {field}")]
    MissingField {
        /// Name of the missing field
        field: String,
    },

    /// Task configuration is unusable
    #[error("Invalid task: {message}")]
    InvalidTask {
        /// Description of the configuration problem
        message: String,
    },

    /// Error surfaced by an image viewer
    #[error("Viewer error: {0}")]
    Viewer(#[from] ViewerError),
}

impl TaskError {
    /// Create an unknown viewer error.
    pub fn unknown_viewer(name: impl Into<String>) -> Self {
        Self::UnknownViewer { name: name.into() }
    }

    /// Create a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid task error with a message.
    pub fn invalid_task(message: impl Into<String>) -> Self {
        Self::InvalidTask {
            message: message.into(),
        }
    }
}
