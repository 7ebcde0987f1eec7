//! `feet.json` configuration.
//!
//! # API pattern
//!
//! - [`load_at`] — explicit working directory; used by tests with `TempDir`
//! - [`load`] — uses the process working directory, delegates to `load_at`
//!
//! Only the CLI entry point calls [`load`]; every other component receives a
//! resolved [`Config`].

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{io_err, FeetError};
use crate::types::FeaturePath;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "feet.json";

pub const DEFAULT_ROOT_DIR: &str = "src";
pub const DEFAULT_PROJECT: &str = "default.project.json";
pub const DEFAULT_BASE_PROJECT: &str = "base.project.json";
pub const DEFAULT_DATA: &str = "big-toe.json";

/// The contents of `feet.json`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_project: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Unrecognized keys, carried through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fully resolved configuration for one invocation.
///
/// The string fields are kept exactly as configured because `root_dir` and
/// `out_dir` also end up in the generated manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Directory relative paths are resolved against.
    pub work_dir: PathBuf,
    pub root_dir: String,
    pub out_dir: Option<String>,
    pub project: String,
    pub base_project: String,
    pub data: String,
    pub extra: Map<String, Value>,
}

impl Config {
    /// Overlay `partial` on the defaults. Present keys win.
    pub fn resolve(work_dir: impl Into<PathBuf>, partial: PartialConfig) -> Self {
        Self {
            work_dir: work_dir.into(),
            root_dir: partial.root_dir.unwrap_or_else(|| DEFAULT_ROOT_DIR.to_owned()),
            out_dir: partial.out_dir,
            project: partial.project.unwrap_or_else(|| DEFAULT_PROJECT.to_owned()),
            base_project: partial
                .base_project
                .unwrap_or_else(|| DEFAULT_BASE_PROJECT.to_owned()),
            data: partial.data.unwrap_or_else(|| DEFAULT_DATA.to_owned()),
            extra: partial.extra,
        }
    }

    /// Defaults only, rooted at `work_dir`.
    pub fn with_defaults(work_dir: impl Into<PathBuf>) -> Self {
        Self::resolve(work_dir, PartialConfig::default())
    }

    /// `work_dir/<p>`; absolute `p` is returned as-is.
    pub fn resolve_path(&self, p: impl AsRef<Path>) -> PathBuf {
        self.work_dir.join(p)
    }

    pub fn root_path(&self) -> PathBuf {
        self.resolve_path(&self.root_dir)
    }

    /// Directory owned by the feature at `path`.
    pub fn feature_dir(&self, path: &FeaturePath) -> PathBuf {
        path.segments()
            .fold(self.root_path(), |dir, segment| dir.join(segment))
    }

    pub fn project_path(&self) -> PathBuf {
        self.resolve_path(&self.project)
    }

    pub fn base_project_path(&self) -> PathBuf {
        self.resolve_path(&self.base_project)
    }

    pub fn data_path(&self) -> PathBuf {
        self.resolve_path(&self.data)
    }
}

/// Read `<work_dir>/feet.json` (if present) and resolve it.
pub fn load_at(work_dir: &Path) -> Result<Config, FeetError> {
    let path = work_dir.join(CONFIG_FILE);
    let partial = if path.exists() {
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        serde_json::from_str(&contents).map_err(|e| FeetError::ConfigParse {
            path: path.clone(),
            source: e,
        })?
    } else {
        tracing::debug!("no {} in {}, using defaults", CONFIG_FILE, work_dir.display());
        PartialConfig::default()
    };
    Ok(Config::resolve(work_dir, partial))
}

/// `load_at` convenience wrapper for the process working directory.
pub fn load() -> Result<Config, FeetError> {
    let cwd = std::env::current_dir().map_err(|e| io_err(".", e))?;
    load_at(&cwd)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
