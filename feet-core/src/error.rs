//! Error types for feet-core.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can arise from configuration, registry and lifecycle operations.
#[derive(Debug, Error)]
pub enum FeetError {
    /// `add` was called with a path that is already registered.
    #[error("feature '{path}' already exists")]
    DuplicateFeature { path: String },

    /// Something already occupies the directory a new feature would own.
    #[error("'{}' already exists, cannot create feature", path.display())]
    PathConflict { path: PathBuf },

    /// `remove` was called with a path that is not registered.
    #[error("feature '{path}' does not exist")]
    UnknownFeature { path: String },

    /// A folder feature holds an entry other than `server`, `client` or `shared`.
    #[error("feature item '{item}' is unknown, can't remove feature '{feature}'")]
    UnexpectedItem { feature: String, item: String },

    /// A directory that would be deleted still has entries.
    #[error("'{}' is not empty, can't remove feature", path.display())]
    NonEmptyDirectory { path: PathBuf },

    /// The filesystem refused to remove a feature directory because entries remain.
    #[error("feature directory '{}' is not empty after removing its subdirectories", path.display())]
    DirectoryNotEmpty { path: PathBuf },

    /// The feature path cannot be used as a relative, slash-separated key.
    #[error("invalid feature path '{path}': {reason}")]
    InvalidFeaturePath { path: String, reason: &'static str },

    /// `feet.json` exists but is not a JSON object.
    #[error("failed to parse config at {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The registry file exists but is malformed.
    #[error("failed to parse registry at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The registry parsed, but an entry has an invalid or repeated path.
    #[error("invalid registry at {}: {reason}", path.display())]
    InvalidRegistry { path: PathBuf, reason: String },

    /// JSON serialization error (save path).
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Underlying I/O failure, annotated with the path involved.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience constructor for [`FeetError::Io`].
pub fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> FeetError {
    FeetError::Io {
        path: path.into(),
        source,
    }
}
