//! Dry-run unified diff support for `feet sync --dry-run`.

use std::path::PathBuf;

use similar::TextDiff;

use feet_core::{types::Registry, Config};

use crate::{manifest, writer::read_existing, SyncError};

/// What a sync would change in the output manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestDiff {
    pub path: PathBuf,
    pub unified_diff: String,
}

/// Render the manifest `registry` calls for and compare it to the current
/// output file. Returns `None` when they match.
///
/// No files are written.
pub fn diff_manifest(config: &Config, registry: &Registry) -> Result<Option<ManifestDiff>, SyncError> {
    let rendered = manifest::render(config, registry)?;
    let path = config.project_path();
    let existing = read_existing(&path)?.unwrap_or_default();
    if existing == rendered {
        return Ok(None);
    }

    let old_header = format!("a/{}", config.project);
    let new_header = format!("b/{}", config.project);
    let unified_diff = TextDiff::from_lines(&existing, &rendered)
        .unified_diff()
        .header(&old_header, &new_header)
        .context_radius(3)
        .to_string();

    Ok(Some(ManifestDiff { path, unified_diff }))
}
