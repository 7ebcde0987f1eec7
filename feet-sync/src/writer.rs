//! Manifest writer.
//!
//! ## `sync_manifest`
//!
//! 1. Load the base manifest (`baseProject`).
//! 2. Apply every registered feature in registry order.
//! 3. Compare with the current output (`project`) → skip if identical.
//! 4. Write to `<project>.tmp`, rename to the final path.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use feet_core::{json, types::Registry, Config};

use crate::error::{io_err, SyncError};
use crate::manifest;

// ---------------------------------------------------------------------------
// Write result
// ---------------------------------------------------------------------------

/// Outcome of writing the output manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written (content changed or did not previously exist).
    Written { path: PathBuf },
    /// File was skipped — rendered content matches what is on disk.
    Unchanged { path: PathBuf },
    /// `--dry-run` mode: the file *would* have been written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

// ---------------------------------------------------------------------------
// write_if_changed
// ---------------------------------------------------------------------------

pub(crate) fn write_if_changed(
    path: &Path,
    content: &str,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    if read_existing(path)?.as_deref() == Some(content) {
        tracing::debug!("unchanged: {}", path.display());
        return Ok(WriteResult::Unchanged {
            path: path.to_path_buf(),
        });
    }

    if dry_run {
        tracing::info!("[dry-run] would write: {}", path.display());
        return Ok(WriteResult::WouldWrite {
            path: path.to_path_buf(),
        });
    }

    json::write_atomic(path, content)?;
    tracing::info!("wrote: {}", path.display());
    Ok(WriteResult::Written {
        path: path.to_path_buf(),
    })
}

/// Current content of `path`, `None` if it does not exist.
pub(crate) fn read_existing(path: &Path) -> Result<Option<String>, SyncError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content.replace("\r\n", "\n"))),
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
        Err(err) => Err(io_err(path, err)),
    }
}

// ---------------------------------------------------------------------------
// sync_manifest
// ---------------------------------------------------------------------------

/// Regenerate the output manifest from the base manifest and `registry`.
pub fn sync_manifest(
    config: &Config,
    registry: &Registry,
    dry_run: bool,
) -> Result<WriteResult, SyncError> {
    let rendered = manifest::render(config, registry)?;
    write_if_changed(&config.project_path(), &rendered, dry_run)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use feet_core::types::{Feature, FeatureMode, FeaturePath};
    use serde_json::Value;
    use std::fs;
    use tempfile::TempDir;

    const BASE: &str = r#"{
	"name": "game",
	"tree": {
		"$className": "DataModel",
		"ReplicatedStorage": { "$className": "ReplicatedStorage" },
		"ServerScriptService": { "$className": "ServerScriptService" },
		"StarterPlayer": {
			"$className": "StarterPlayer",
			"StarterPlayerScripts": { "$className": "StarterPlayerScripts" }
		}
	}
}"#;

    fn setup() -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("base.project.json"), BASE).unwrap();
        let config = Config::with_defaults(dir.path());
        (dir, config)
    }

    fn registry(features: &[(&str, FeatureMode)]) -> Registry {
        Registry {
            features: features
                .iter()
                .map(|(path, mode)| Feature {
                    path: FeaturePath::from(*path),
                    mode: *mode,
                })
                .collect(),
        }
    }

    fn read_output(config: &Config) -> Value {
        serde_json::from_str(&fs::read_to_string(config.project_path()).unwrap()).unwrap()
    }

    #[test]
    fn first_sync_writes_manifest() {
        let (_dir, config) = setup();
        let reg = registry(&[("combat", FeatureMode::Folder)]);
        let result = sync_manifest(&config, &reg, false).unwrap();
        assert!(matches!(result, WriteResult::Written { .. }));

        let out = read_output(&config);
        assert_eq!(
            out["tree"]["ReplicatedStorage"]["combat"]["$path"]["optional"],
            "src/combat/shared"
        );
        assert_eq!(out["name"], "game");
    }

    #[test]
    fn second_sync_same_registry_is_unchanged() {
        let (_dir, config) = setup();
        let reg = registry(&[("net", FeatureMode::Server)]);
        sync_manifest(&config, &reg, false).unwrap();
        let result = sync_manifest(&config, &reg, false).unwrap();
        assert!(matches!(result, WriteResult::Unchanged { .. }));
    }

    #[test]
    fn dry_run_does_not_write_file() {
        let (_dir, config) = setup();
        let reg = registry(&[("net", FeatureMode::Server)]);
        let result = sync_manifest(&config, &reg, true).unwrap();
        assert!(matches!(result, WriteResult::WouldWrite { .. }));
        assert!(!config.project_path().exists(), "dry-run must not create files");
    }

    #[test]
    fn typed_source_marker_switches_output_root() {
        let (dir, config) = setup();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        let reg = registry(&[("ui/hud", FeatureMode::Client)]);
        sync_manifest(&config, &reg, false).unwrap();

        let out = read_output(&config);
        assert_eq!(
            out["tree"]["StarterPlayer"]["StarterPlayerScripts"]["ui"]["hud"]["$path"]["optional"],
            "out/ui/hud"
        );
    }

    #[test]
    fn configured_out_dir_wins_over_marker() {
        let (dir, mut config) = setup();
        fs::write(dir.path().join("tsconfig.json"), "{}").unwrap();
        config.out_dir = Some("build".into());
        let reg = registry(&[("net", FeatureMode::Server)]);
        sync_manifest(&config, &reg, false).unwrap();

        let out = read_output(&config);
        assert_eq!(out["tree"]["ServerScriptService"]["net"]["$path"]["optional"], "build/net");
    }

    #[test]
    fn removed_feature_disappears_from_output() {
        let (_dir, config) = setup();
        sync_manifest(&config, &registry(&[("ui/hud", FeatureMode::Client)]), false).unwrap();
        sync_manifest(&config, &registry(&[]), false).unwrap();

        let out = read_output(&config);
        assert!(out["tree"]["StarterPlayer"]["StarterPlayerScripts"]
            .get("ui")
            .is_none());
    }

    #[test]
    fn missing_base_manifest_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = Config::with_defaults(dir.path());
        let err = sync_manifest(&config, &Registry::default(), false).unwrap_err();
        assert!(matches!(err, SyncError::ManifestNotFound { .. }), "got: {err}");
        assert!(!config.project_path().exists());
    }

    #[test]
    fn malformed_base_manifest_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("base.project.json"), "[\"not\", \"an object\"]").unwrap();
        let config = Config::with_defaults(dir.path());
        let err = sync_manifest(&config, &Registry::default(), false).unwrap_err();
        assert!(matches!(err, SyncError::ManifestParse { .. }), "got: {err}");
    }

    #[test]
    fn base_manifest_is_never_modified() {
        let (dir, config) = setup();
        sync_manifest(&config, &registry(&[("combat", FeatureMode::Folder)]), false).unwrap();
        let base = fs::read_to_string(dir.path().join("base.project.json")).unwrap();
        assert_eq!(base, BASE);
    }
}
