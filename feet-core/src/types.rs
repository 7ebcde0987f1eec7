//! Domain types for the feet registry.
//!
//! A [`Feature`] is keyed by its slash-separated [`FeaturePath`], relative to
//! the configured root directory. The registry keeps features in insertion order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::FeetError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A slash-separated feature path such as `combat` or `ui/hud`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeaturePath(pub String);

impl FeaturePath {
    /// Validate user input as a feature path.
    ///
    /// Rejects empty and absolute paths, empty / `.` / `..` segments, backslashes,
    /// and segments starting with `$` (reserved for manifest attributes).
    pub fn parse(raw: &str) -> Result<Self, FeetError> {
        let invalid = |reason| FeetError::InvalidFeaturePath {
            path: raw.to_owned(),
            reason,
        };

        if raw.is_empty() {
            return Err(invalid("path is empty"));
        }
        if raw.starts_with('/') {
            return Err(invalid("path must be relative"));
        }
        if raw.contains('\\') {
            return Err(invalid("use '/' to separate segments"));
        }
        for segment in raw.split('/') {
            match segment {
                "" => return Err(invalid("path contains an empty segment")),
                "." | ".." => return Err(invalid("'.' and '..' segments are not allowed")),
                s if s.starts_with('$') => {
                    return Err(invalid("segments may not start with '$'"))
                }
                _ => {}
            }
        }
        Ok(Self(raw.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for FeaturePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for FeaturePath {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for FeaturePath {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Where a feature's code is placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureMode {
    /// Server-only feature; the directory itself holds the sources.
    Server,
    /// Client-only feature; the directory itself holds the sources.
    Client,
    /// Split feature with `server/`, `client/` and optionally `shared/` subdirectories.
    Folder,
}

impl FeatureMode {
    /// Subdirectory names a folder feature may contain.
    pub const FOLDER_ITEMS: [&'static str; 3] = ["server", "client", "shared"];

    /// Pick the mode from the `add` flags. `server` wins when both are set.
    pub fn from_flags(server: bool, client: bool) -> Self {
        if server {
            FeatureMode::Server
        } else if client {
            FeatureMode::Client
        } else {
            FeatureMode::Folder
        }
    }
}

impl fmt::Display for FeatureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureMode::Server => write!(f, "server"),
            FeatureMode::Client => write!(f, "client"),
            FeatureMode::Folder => write!(f, "folder"),
        }
    }
}

// ---------------------------------------------------------------------------
// Domain structs
// ---------------------------------------------------------------------------

/// A registered feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub path: FeaturePath,
    pub mode: FeatureMode,
}

/// Root of the registry file (`big-toe.json` by default).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Registry {
    #[serde(default)]
    pub features: Vec<Feature>,
}

impl Registry {
    pub fn find(&self, path: &FeaturePath) -> Option<&Feature> {
        self.features.iter().find(|f| &f.path == path)
    }

    pub fn contains(&self, path: &FeaturePath) -> bool {
        self.find(path).is_some()
    }

    /// Remove the entry for `path`, keeping the order of the others.
    pub fn take(&mut self, path: &FeaturePath) -> Option<Feature> {
        let index = self.features.iter().position(|f| &f.path == path)?;
        Some(self.features.remove(index))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
