//! Lifecycle integration tests: add / remove against a real directory tree.

use assert_fs::prelude::*;
use feet_core::{
    config::{self, Config},
    lifecycle::{self, AddOptions},
    registry,
    types::{FeatureMode, Registry},
    FeetError,
};
use predicates::prelude::predicate;

fn folder_with_shared() -> AddOptions {
    AddOptions { server: false, client: false, shared: true }
}

// ---------------------------------------------------------------------------
// 1. Add / remove inverse
// ---------------------------------------------------------------------------

#[test]
fn add_then_remove_restores_registry_and_tree() {
    let work = assert_fs::TempDir::new().expect("tempdir");
    let config = Config::with_defaults(work.path());
    work.child("src").create_dir_all().expect("src");

    let mut reg = registry::load(&config).expect("load");
    let before = reg.clone();

    lifecycle::add(&config, &mut reg, "systems/combat", folder_with_shared()).expect("add");
    registry::save(&config, &reg).expect("save");
    work.child("src/systems/combat/shared").assert(predicate::path::is_dir());

    let mut reg = registry::load(&config).expect("reload");
    lifecycle::remove(&config, &mut reg, "systems/combat", false).expect("remove");
    registry::save(&config, &reg).expect("save");

    assert_eq!(registry::load(&config).expect("load"), before);
    work.child("src/systems/combat").assert(predicate::path::missing());
    // Parents created by add are not feature-owned and stay.
    work.child("src/systems").assert(predicate::path::is_dir());
}

// ---------------------------------------------------------------------------
// 2. Config-driven roots
// ---------------------------------------------------------------------------

#[test]
fn root_dir_from_config_file_is_honoured() {
    let work = assert_fs::TempDir::new().expect("tempdir");
    work.child("feet.json")
        .write_str(r#"{ "rootDir": "game/src", "data": "state/features.json" }"#)
        .expect("write config");

    let config = config::load_at(work.path()).expect("config");
    let mut reg = Registry::default();
    let opts = AddOptions { server: true, ..AddOptions::default() };
    lifecycle::add(&config, &mut reg, "net", opts).expect("add");
    registry::save(&config, &reg).expect("save");

    work.child("game/src/net").assert(predicate::path::is_dir());
    work.child("state/features.json")
        .assert(predicate::str::contains("\"mode\": \"server\""));
}

// ---------------------------------------------------------------------------
// 3. Error messages
// ---------------------------------------------------------------------------

#[test]
fn duplicate_message_names_the_feature() {
    let work = assert_fs::TempDir::new().expect("tempdir");
    let config = Config::with_defaults(work.path());
    let mut reg = Registry::default();
    lifecycle::add(&config, &mut reg, "combat", AddOptions::default()).expect("add");

    // Even with the directory gone, the registry entry wins.
    std::fs::remove_dir_all(work.path().join("src/combat")).expect("rm");
    let err = lifecycle::add(&config, &mut reg, "combat", AddOptions::default()).unwrap_err();
    assert!(matches!(err, FeetError::DuplicateFeature { .. }));
    assert_eq!(err.to_string(), "feature 'combat' already exists");
}

#[test]
fn conflict_with_plain_file_is_reported() {
    let work = assert_fs::TempDir::new().expect("tempdir");
    work.child("src/combat").write_str("not a dir").expect("write");
    let config = Config::with_defaults(work.path());
    let mut reg = Registry::default();

    let err = lifecycle::add(&config, &mut reg, "combat", AddOptions::default()).unwrap_err();
    assert!(matches!(err, FeetError::PathConflict { .. }), "got: {err}");
    assert!(err.to_string().contains("already exists, cannot create feature"));
}

#[test]
fn client_remove_scenario() {
    let work = assert_fs::TempDir::new().expect("tempdir");
    let config = Config::with_defaults(work.path());
    let mut reg = Registry::default();
    let opts = AddOptions { client: true, ..AddOptions::default() };
    lifecycle::add(&config, &mut reg, "ui/hud", opts).expect("add");
    assert_eq!(reg.features[0].mode, FeatureMode::Client);

    lifecycle::remove(&config, &mut reg, "ui/hud", false).expect("remove");
    work.child("src/ui/hud").assert(predicate::path::missing());
    assert!(reg.features.is_empty());
}
