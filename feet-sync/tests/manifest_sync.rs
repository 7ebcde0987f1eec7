//! End-to-end manifest synchronization against a realistic Rojo project.

use std::fs;

use feet_core::{lifecycle::AddOptions, registry, Config};
use feet_sync::{pipeline, Manifest, Placement};
use serde_json::{json, Value};
use tempfile::TempDir;

const BASE: &str = r#"{
	"name": "place",
	"globIgnorePaths": ["**/*.spec.luau"],
	"tree": {
		"$className": "DataModel",
		"ReplicatedStorage": {
			"$className": "ReplicatedStorage",
			"Packages": { "$path": "Packages" }
		},
		"ServerScriptService": { "$className": "ServerScriptService" },
		"StarterPlayer": {
			"$className": "StarterPlayer",
			"StarterPlayerScripts": { "$className": "StarterPlayerScripts" }
		},
		"Workspace": { "$properties": { "FilteredEnabled": true } }
	}
}"#;

fn workspace() -> (TempDir, Config) {
    let dir = TempDir::new().expect("tempdir");
    fs::write(dir.path().join("base.project.json"), BASE).expect("base");
    let config = Config::with_defaults(dir.path());
    (dir, config)
}

fn folder() -> AddOptions {
    AddOptions::default()
}

#[test]
fn every_folder_feature_is_reachable_under_all_roots() {
    let (_dir, config) = workspace();
    for path in ["combat", "systems/inventory", "systems/inventory/ui"] {
        pipeline::add(&config, path, folder()).expect("add");
    }

    let manifest = Manifest::load(&config.project_path()).expect("load output");
    for feature in registry::load(&config).expect("registry").features {
        let segments: Vec<&str> = feature.path.segments().collect();
        for (placement, suffix) in [
            (Placement::Shared, "/shared"),
            (Placement::Server, "/server"),
            (Placement::Client, "/client"),
        ] {
            let node = manifest
                .node(placement, &segments)
                .unwrap_or_else(|| panic!("{} missing under {placement:?}", feature.path));
            let target = node["$path"]["optional"].as_str().expect("optional path");
            assert!(target.ends_with(suffix), "{target} should end with {suffix}");
        }
    }
}

#[test]
fn unrelated_manifest_content_survives_in_order() {
    let (_dir, config) = workspace();
    pipeline::add(&config, "combat", folder()).expect("add");

    let out: Value =
        serde_json::from_str(&fs::read_to_string(config.project_path()).expect("read"))
            .expect("json");
    assert_eq!(out["globIgnorePaths"], json!(["**/*.spec.luau"]));
    assert_eq!(out["tree"]["ReplicatedStorage"]["Packages"], json!({ "$path": "Packages" }));
    assert_eq!(out["tree"]["Workspace"]["$properties"]["FilteredEnabled"], true);

    let top: Vec<&String> = out.as_object().expect("object").keys().collect();
    assert_eq!(top, vec!["name", "globIgnorePaths", "tree"]);
    let tree: Vec<&String> = out["tree"].as_object().expect("tree").keys().collect();
    assert_eq!(
        tree,
        vec!["$className", "ReplicatedStorage", "ServerScriptService", "StarterPlayer", "Workspace"]
    );
}

#[test]
fn output_is_tab_indented() {
    let (_dir, config) = workspace();
    pipeline::sync(&config, false).expect("sync");
    let text = fs::read_to_string(config.project_path()).expect("read");
    assert!(text.starts_with("{\n\t\"name\": \"place\","));
    assert!(text.ends_with("}\n"));
}

#[test]
fn shared_base_and_output_keeps_stale_nodes() {
    let (dir, _) = workspace();
    fs::write(
        dir.path().join("feet.json"),
        r#"{ "project": "base.project.json" }"#,
    )
    .expect("config");
    let config = feet_core::config::load_at(dir.path()).expect("config");

    pipeline::add(&config, "net", AddOptions { server: true, ..folder() }).expect("add");
    pipeline::remove(&config, "net", false).expect("remove");

    // Output and base are one file, so the node written by `add` is still there.
    let manifest = Manifest::load(&config.project_path()).expect("load");
    assert!(manifest.node(Placement::Server, &["net"]).is_some());
}
