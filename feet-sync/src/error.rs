//! Error types for feet-sync.

use std::path::PathBuf;

use thiserror::Error;

use feet_core::FeetError;

/// All errors that can arise from manifest synchronization and commands.
#[derive(Debug, Error)]
pub enum SyncError {
    /// An error from configuration, registry or lifecycle.
    #[error(transparent)]
    Feet(#[from] FeetError),

    /// The base manifest does not exist.
    #[error("base project not found at {}", path.display())]
    ManifestNotFound { path: PathBuf },

    /// The base manifest is not valid JSON, or not an object.
    #[error("failed to parse base project at {}: {source}", path.display())]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A placement root is missing, or a node on a feature path is not an object.
    #[error("malformed project tree: '{location}' is missing or not an object")]
    MalformedManifest { location: String },

    /// JSON serialization error (manifest output).
    #[error("manifest JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An I/O error, with annotated path for context.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`SyncError::Io`].
pub(crate) fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> SyncError {
    SyncError::Io {
        path: path.into(),
        source,
    }
}
