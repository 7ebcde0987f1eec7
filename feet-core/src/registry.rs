//! Feature registry persistence.
//!
//! The registry lives at [`Config::data_path`] (`big-toe.json` by default):
//!
//! ```text
//! {
//!     "features": [
//!         { "path": "combat", "mode": "folder" },
//!         { "path": "ui/hud", "mode": "client" }
//!     ]
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::error::{io_err, FeetError};
use crate::json;
use crate::types::{FeaturePath, Registry};

/// Load the registry. Returns an empty registry if the file does not exist or
/// holds `null`, `FeetError::Parse` (with path) if it is malformed, and
/// `FeetError::InvalidRegistry` if an entry has a bad or repeated path.
pub fn load(config: &Config) -> Result<Registry, FeetError> {
    let path = config.data_path();
    if !path.exists() {
        tracing::debug!("no registry at {}, starting empty", path.display());
        return Ok(Registry::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
    let registry: Option<Registry> =
        serde_json::from_str(&contents).map_err(|e| FeetError::Parse {
            path: path.clone(),
            source: e,
        })?;
    let registry = registry.unwrap_or_default();
    check_entries(&path, &registry)?;
    Ok(registry)
}

/// Every path must be a valid [`FeaturePath`] and appear once.
fn check_entries(path: &Path, registry: &Registry) -> Result<(), FeetError> {
    let invalid = |reason: String| FeetError::InvalidRegistry {
        path: path.to_path_buf(),
        reason,
    };

    let mut seen = HashSet::new();
    for feature in &registry.features {
        FeaturePath::parse(feature.path.as_str()).map_err(|e| invalid(e.to_string()))?;
        if !seen.insert(feature.path.as_str()) {
            return Err(invalid(format!(
                "feature '{}' is listed more than once",
                feature.path
            )));
        }
    }
    Ok(())
}

/// Save the registry, overwriting the previous file.
pub fn save(config: &Config, registry: &Registry) -> Result<(), FeetError> {
    let path = config.data_path();
    let contents = json::to_string_pretty(registry)?;
    json::write_atomic(&path, &contents)?;
    tracing::info!("saved registry: {}", path.display());
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
