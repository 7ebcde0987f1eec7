//! Command pipeline shared by every `feet` subcommand.
//!
//! `add` / `remove`: load registry → lifecycle → save registry → sync manifest.
//! `sync`: load registry → sync manifest.
//!
//! Validation errors abort before anything is written. A failure after the
//! filesystem has been touched aborts the remaining steps; nothing is rolled back.

use std::path::PathBuf;

use feet_core::{
    lifecycle::{self, AddOptions},
    registry,
    types::{Feature, Registry},
    Config,
};

use crate::{diff_manifest, sync_manifest, ManifestDiff, SyncError, WriteResult};

/// Outcome of `feet add` / `feet remove`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub feature: Feature,
    /// Directories created (add) or deleted (remove).
    pub directories: Vec<PathBuf>,
    pub manifest: WriteResult,
}

/// Outcome of `feet sync`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    pub registry: Registry,
    pub manifest: WriteResult,
    /// Only computed for dry runs.
    pub diff: Option<ManifestDiff>,
}

/// Register and scaffold a new feature.
pub fn add(config: &Config, path: &str, options: AddOptions) -> Result<CommandOutcome, SyncError> {
    let mut reg = registry::load(config)?;
    let outcome = lifecycle::add(config, &mut reg, path, options)?;
    registry::save(config, &reg)?;
    let manifest = sync_manifest(config, &reg, false)?;
    Ok(CommandOutcome {
        feature: outcome.feature,
        directories: outcome.created,
        manifest,
    })
}

/// Unregister a feature, deleting its empty directories unless `preserve`.
pub fn remove(config: &Config, path: &str, preserve: bool) -> Result<CommandOutcome, SyncError> {
    let mut reg = registry::load(config)?;
    let outcome = lifecycle::remove(config, &mut reg, path, preserve)?;
    registry::save(config, &reg)?;
    let manifest = sync_manifest(config, &reg, false)?;
    Ok(CommandOutcome {
        feature: outcome.feature,
        directories: outcome.removed,
        manifest,
    })
}

/// Regenerate the manifest from the persisted registry.
pub fn sync(config: &Config, dry_run: bool) -> Result<SyncOutcome, SyncError> {
    let reg = registry::load(config)?;
    let diff = if dry_run {
        diff_manifest(config, &reg)?
    } else {
        None
    };
    let manifest = sync_manifest(config, &reg, dry_run)?;
    Ok(SyncOutcome {
        registry: reg,
        manifest,
        diff,
    })
}
