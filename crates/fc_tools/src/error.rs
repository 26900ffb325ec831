//! Error types for the development tools.

use std::path::PathBuf;

use fc_core::error::FcError;
use thiserror::Error;

/// Errors from reading, converting or writing tool data.
#[derive(Debug, Error)]
pub enum ToolError {
    /// A file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// RON serialization failed.
    #[error("RON serialization failed: {0}")]
    Ron(#[from] ron::Error),

    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// The core rejected the input.
    #[error(transparent)]
    Core(#[from] FcError),
}

impl ToolError {
    /// Wrap an IO error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for tool operations.
pub type Result<T> = std::result::Result<T, ToolError>;
