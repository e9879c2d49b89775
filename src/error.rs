//! Error types for defpatch.

use crate::types::ToolRun;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while applying a patch to a single target.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error(
        "Failed to apply patch {} to {}\n--- {}\n--- {}",
        .patch.display(),
        .path.display(),
        .primary,
        .fallback
    )]
    ApplyFailed {
        path: PathBuf,
        patch: PathBuf,
        primary: ToolRun,
        fallback: ToolRun,
    },

    #[error("Failed to create deleted marker {}: {source}", .path.display())]
    DeletionMarker {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to hash {}: {source}", .path.display())]
    Hash {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Top-level errors surfaced by the CLI and the batch runner.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Patch(#[from] PatchError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Manifest error: {0}")]
    ManifestError(String),

    #[error("Invalid hash: {0}")]
    InvalidHash(String),

    #[error("Hash mismatch for {}: expected {expected}, got {actual}", .path.display())]
    HashMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("{report}\n{failed} manifest entries did not match their expected outcome")]
    ChecksFailed { failed: usize, report: String },

    #[error("Output error: {0}")]
    OutputError(String),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
