//! Feature add / remove.
//!
//! Both operations mutate the filesystem and the in-memory [`Registry`] only.
//! Persisting the registry and regenerating the manifest is sequenced by the
//! caller (`feet_sync::pipeline`).
//!
//! Removal is deliberately non-recursive: a directory is only deleted when it
//! is empty, so user sources are never discarded.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{io_err, FeetError};
use crate::types::{Feature, FeatureMode, FeaturePath, Registry};

/// Flags accepted by `feet add`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AddOptions {
    pub server: bool,
    pub client: bool,
    /// Also create `shared/` (folder features only).
    pub shared: bool,
}

/// Result of a successful [`add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddOutcome {
    pub feature: Feature,
    /// Directories created, feature directory first.
    pub created: Vec<PathBuf>,
}

/// Result of a successful [`remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveOutcome {
    pub feature: Feature,
    /// Directories deleted, feature directory last. Empty when preserved or
    /// already gone.
    pub removed: Vec<PathBuf>,
}

// ---------------------------------------------------------------------------
// add
// ---------------------------------------------------------------------------

/// Register a new feature at `raw_path` and create its directories.
///
/// Fails with `DuplicateFeature` if the path is registered and `PathConflict`
/// if anything already exists on disk there. Both checks run before any
/// directory is created.
pub fn add(
    config: &Config,
    registry: &mut Registry,
    raw_path: &str,
    options: AddOptions,
) -> Result<AddOutcome, FeetError> {
    let path = FeaturePath::parse(raw_path)?;
    if registry.contains(&path) {
        return Err(FeetError::DuplicateFeature { path: path.0 });
    }

    let dir = config.feature_dir(&path);
    if entry_exists(&dir)? {
        return Err(FeetError::PathConflict { path: dir });
    }

    let mode = FeatureMode::from_flags(options.server, options.client);
    let mut created = Vec::new();

    std::fs::create_dir_all(&dir).map_err(|e| io_err(&dir, e))?;
    tracing::debug!("created {}", dir.display());
    created.push(dir.clone());

    match mode {
        FeatureMode::Folder => {
            let subdirs = ["server", "client"]
                .into_iter()
                .chain(options.shared.then_some("shared"));
            for name in subdirs {
                let sub = dir.join(name);
                std::fs::create_dir(&sub).map_err(|e| io_err(&sub, e))?;
                tracing::debug!("created {}", sub.display());
                created.push(sub);
            }
        }
        FeatureMode::Server | FeatureMode::Client => {}
    }

    let feature = Feature { path, mode };
    registry.features.push(feature.clone());
    Ok(AddOutcome { feature, created })
}

// ---------------------------------------------------------------------------
// remove
// ---------------------------------------------------------------------------

/// Unregister the feature at `raw_path`, deleting its (empty) directories
/// unless `preserve` is set.
pub fn remove(
    config: &Config,
    registry: &mut Registry,
    raw_path: &str,
    preserve: bool,
) -> Result<RemoveOutcome, FeetError> {
    let path = FeaturePath::from(raw_path);
    let feature = registry
        .find(&path)
        .cloned()
        .ok_or_else(|| FeetError::UnknownFeature {
            path: raw_path.to_owned(),
        })?;

    let dir = config.feature_dir(&path);
    let removed = if preserve {
        tracing::debug!("preserving {}", dir.display());
        Vec::new()
    } else if !entry_exists(&dir)? {
        tracing::debug!("{} already gone", dir.display());
        Vec::new()
    } else {
        match feature.mode {
            FeatureMode::Folder => remove_folder_feature(&feature, &dir)?,
            FeatureMode::Server | FeatureMode::Client => {
                if !is_empty_dir(&dir)? {
                    return Err(FeetError::NonEmptyDirectory { path: dir });
                }
                std::fs::remove_dir(&dir).map_err(|e| io_err(&dir, e))?;
                tracing::debug!("removed {}", dir.display());
                vec![dir]
            }
        }
    };

    registry.take(&path);
    Ok(RemoveOutcome { feature, removed })
}

/// Every child is checked before anything is deleted.
fn remove_folder_feature(feature: &Feature, dir: &Path) -> Result<Vec<PathBuf>, FeetError> {
    let mut children = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| io_err(dir, e))? {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let child = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry
            .file_type()
            .map_err(|e| io_err(&child, e))?
            .is_dir();

        if !is_dir || !FeatureMode::FOLDER_ITEMS.contains(&name.as_str()) {
            return Err(FeetError::UnexpectedItem {
                feature: feature.path.0.clone(),
                item: name,
            });
        }
        if !is_empty_dir(&child)? {
            return Err(FeetError::NonEmptyDirectory { path: child });
        }
        children.push(child);
    }
    children.sort();

    let mut removed = Vec::with_capacity(children.len() + 1);
    for child in children {
        std::fs::remove_dir(&child).map_err(|e| io_err(&child, e))?;
        tracing::debug!("removed {}", child.display());
        removed.push(child);
    }

    // Children were all checked above, so entries showing up here were
    // created concurrently.
    if let Err(e) = std::fs::remove_dir(dir) {
        return Err(if entry_exists(dir)? && !is_empty_dir(dir)? {
            FeetError::DirectoryNotEmpty {
                path: dir.to_path_buf(),
            }
        } else {
            io_err(dir, e)
        });
    }
    tracing::debug!("removed {}", dir.display());
    removed.push(dir.to_path_buf());
    Ok(removed)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// True if anything (including a dangling symlink) exists at `path`.
fn entry_exists(path: &Path) -> Result<bool, FeetError> {
    match std::fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(io_err(path, e)),
    }
}

fn is_empty_dir(path: &Path) -> Result<bool, FeetError> {
    let mut entries = std::fs::read_dir(path).map_err(|e| io_err(path, e))?;
    Ok(entries.next().is_none())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
