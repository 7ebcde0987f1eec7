//! Rojo project manifest model.
//!
//! The manifest is kept as an untyped, order-preserving JSON object so that
//! everything feet does not own survives a load/save cycle untouched. feet only
//! ever creates `{ "$className": "Folder" }` nodes along a feature's path and
//! (over)writes the `$path` attribute on the terminal node.
//!
//! ```text
//! tree
//! ├── ReplicatedStorage                     (shared)
//! ├── ServerScriptService                   (server)
//! └── StarterPlayer
//!     └── StarterPlayerScripts              (client)
//! ```

use std::io::ErrorKind;
use std::path::Path;

use serde_json::{json, Map, Value};

use feet_core::{
    json as feet_json,
    types::{Feature, FeatureMode, FeaturePath, Registry},
    Config,
};

use crate::error::{io_err, SyncError};

/// Marker file that switches the default output root to `out`.
pub const TYPED_SOURCE_MARKER: &str = "tsconfig.json";

/// Output root used when [`TYPED_SOURCE_MARKER`] is present.
pub const TYPED_OUTPUT_ROOT: &str = "out";

const PATH_ATTRIBUTE: &str = "$path";

// ---------------------------------------------------------------------------
// Placement roots
// ---------------------------------------------------------------------------

/// One of the three manifest locations features are attached under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Shared,
    Server,
    Client,
}

impl Placement {
    /// Key chain from the manifest root to the placement root.
    pub fn root_keys(self) -> &'static [&'static str] {
        match self {
            Placement::Shared => &["tree", "ReplicatedStorage"],
            Placement::Server => &["tree", "ServerScriptService"],
            Placement::Client => &["tree", "StarterPlayer", "StarterPlayerScripts"],
        }
    }

    /// Where a feature of `mode` is placed, with the subdirectory each
    /// placement points at (`None` = the feature directory itself).
    pub fn targets(mode: FeatureMode) -> &'static [(Placement, Option<&'static str>)] {
        match mode {
            FeatureMode::Folder => &[
                (Placement::Shared, Some("shared")),
                (Placement::Server, Some("server")),
                (Placement::Client, Some("client")),
            ],
            FeatureMode::Server => &[(Placement::Server, None)],
            FeatureMode::Client => &[(Placement::Client, None)],
        }
    }
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    root: Map<String, Value>,
}

impl Manifest {
    pub fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Load a manifest file. A missing file is `ManifestNotFound`; anything
    /// other than a JSON object is `ManifestParse`.
    pub fn load(path: &Path) -> Result<Self, SyncError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(SyncError::ManifestNotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(e) => return Err(io_err(path, e)),
        };
        let root = serde_json::from_str(&contents).map_err(|e| SyncError::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self { root })
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.root)
    }

    /// Look up the node at `segments` under `placement`, if present.
    pub fn node(&self, placement: Placement, segments: &[&str]) -> Option<&Map<String, Value>> {
        placement
            .root_keys()
            .iter()
            .copied()
            .chain(segments.iter().copied())
            .try_fold(&self.root, |node, key| node.get(key)?.as_object())
    }

    /// Walk to the node at `path` under `placement`, creating missing
    /// segments as `Folder` nodes.
    fn ensure_node(
        &mut self,
        placement: Placement,
        path: &FeaturePath,
    ) -> Result<&mut Map<String, Value>, SyncError> {
        let mut location: Vec<&str> = Vec::new();
        let mut current = &mut self.root;

        for key in placement.root_keys() {
            location.push(*key);
            current = match current.get_mut(*key).and_then(Value::as_object_mut) {
                Some(node) => node,
                None => {
                    return Err(SyncError::MalformedManifest {
                        location: location.join("."),
                    })
                }
            };
        }

        for segment in path.segments() {
            location.push(segment);
            let node = current
                .entry(segment.to_owned())
                .or_insert_with(|| json!({ "$className": "Folder" }));
            current = match node.as_object_mut() {
                Some(node) => node,
                None => {
                    return Err(SyncError::MalformedManifest {
                        location: location.join("."),
                    })
                }
            };
        }

        Ok(current)
    }

    /// Attach `feature` under every placement its mode calls for.
    pub fn apply_feature(&mut self, feature: &Feature, output_root: &str) -> Result<(), SyncError> {
        for (placement, suffix) in Placement::targets(feature.mode) {
            let reference = reference_path(output_root, &feature.path, *suffix);
            let node = self.ensure_node(*placement, &feature.path)?;
            tracing::debug!("{:?} {} -> {}", placement, feature.path, reference);
            node.insert(
                PATH_ATTRIBUTE.to_owned(),
                json!({ "optional": reference }),
            );
        }
        Ok(())
    }

    /// Apply every registered feature, in registry order.
    pub fn apply_registry(&mut self, registry: &Registry, output_root: &str) -> Result<(), SyncError> {
        for feature in &registry.features {
            self.apply_feature(feature, output_root)?;
        }
        Ok(())
    }

    /// Tab-indented JSON, as written to disk.
    pub fn to_pretty_string(&self) -> Result<String, SyncError> {
        Ok(feet_json::to_string_pretty(&self.root)?)
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Root that `$path` references are built from: `outDir` if configured, else
/// `out` when the typed-source marker exists, else `rootDir`.
pub fn output_root(config: &Config) -> String {
    if let Some(out_dir) = &config.out_dir {
        return out_dir.clone();
    }
    if config.resolve_path(TYPED_SOURCE_MARKER).exists() {
        TYPED_OUTPUT_ROOT.to_owned()
    } else {
        config.root_dir.clone()
    }
}

/// Build the manifest the registry calls for, without writing it.
pub fn render(config: &Config, registry: &Registry) -> Result<String, SyncError> {
    let mut manifest = Manifest::load(&config.base_project_path())?;
    manifest.apply_registry(registry, &output_root(config))?;
    manifest.to_pretty_string()
}

/// `<root>/<feature>[/<suffix>]` with `/` separators. Empty and `.` segments of
/// `root` are dropped; a leading `/` is kept.
fn reference_path(root: &str, feature: &FeaturePath, suffix: Option<&str>) -> String {
    let parts: Vec<&str> = root
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .chain(feature.segments())
        .chain(suffix)
        .collect();
    let joined = parts.join("/");
    if root.starts_with('/') {
        format!("/{joined}")
    } else {
        joined
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
