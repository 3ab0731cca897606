//! Save domain: tests for snapshots and the save store.

use std::path::PathBuf;

use bevy::prelude::*;

use super::{LastCheckpoint, ObjectSnapshot, SaveGame, SaveStore, CHECKPOINT_SLOT};

fn temp_store(test: &str) -> (SaveStore, PathBuf) {
    let dir = std::env::temp_dir().join(format!("cyborg-save-{}-{}", test, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    (SaveStore::new(dir.clone()), dir)
}

fn player_snapshot() -> ObjectSnapshot {
    let mut snapshot = ObjectSnapshot::capture(
        "Player",
        &Transform::from_xyz(120.0, -40.0, 1.0),
        Some(&Visibility::Inherited),
    );
    snapshot.abilities = vec!["Dash".to_string(), "Shield".to_string()];
    snapshot.health = Some(2);
    snapshot
}

// -----------------------------------------------------------------------------
// Snapshots
// -----------------------------------------------------------------------------

#[test]
fn test_capture_reads_transform_and_visibility() {
    let transform = Transform::from_xyz(3.0, 4.0, 9.0)
        .with_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));
    let snapshot = ObjectSnapshot::capture("Crate", &transform, Some(&Visibility::Hidden));

    assert_eq!(snapshot.position, [3.0, 4.0]);
    assert!((snapshot.rotation - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    assert!(!snapshot.active);
    assert!(snapshot.abilities.is_empty());
    assert_eq!(snapshot.health, None);
}

#[test]
fn test_apply_keeps_depth() {
    let snapshot = player_snapshot();
    let mut transform = Transform::from_xyz(0.0, 0.0, 5.0);
    snapshot.apply_to(&mut transform);
    assert_eq!(transform.translation, Vec3::new(120.0, -40.0, 5.0));
}

#[test]
fn test_last_checkpoint_only_accepts_a_new_one() {
    let mut last = LastCheckpoint::default();
    assert!(last.accepts("start"));
    last.id = Some("cp1".to_string());
    assert!(!last.accepts("cp1"));
    assert!(last.accepts("cp2"));
}

// -----------------------------------------------------------------------------
// Store
// -----------------------------------------------------------------------------

#[test]
fn test_path_layout() {
    let store = SaveStore::new("saves");
    assert_eq!(
        store.path_for("TestLevel", CHECKPOINT_SLOT),
        PathBuf::from("saves/TestLevel/checkpoint.json")
    );
}

#[test]
fn test_write_then_read_back() {
    let (store, dir) = temp_store("roundtrip");
    let game = SaveGame {
        scene: "TestLevel".to_string(),
        checkpoint: "cp1".to_string(),
        objects: vec![player_snapshot()],
    };

    let written = match store.write(CHECKPOINT_SLOT, &game) {
        Ok(path) => path,
        Err(err) => panic!("{}", err),
    };
    assert!(written.ends_with("TestLevel/checkpoint.json"));

    let loaded = match store.read("TestLevel", CHECKPOINT_SLOT) {
        Ok(game) => game,
        Err(err) => panic!("{}", err),
    };
    assert_eq!(loaded, game);
    assert_eq!(loaded.find("Player").and_then(|o| o.health), Some(2));
    assert!(loaded.find("Crate").is_none());

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn test_reading_a_missing_save_fails() {
    let (store, _) = temp_store("missing");
    let Err(err) = store.read("Nowhere", CHECKPOINT_SLOT) else {
        panic!("expected a missing file");
    };
    assert!(err.message.starts_with("IO error"));
}

#[test]
fn test_corrupt_save_is_a_parse_error() {
    let (store, dir) = temp_store("corrupt");
    let path = store.path_for("TestLevel", CHECKPOINT_SLOT);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    std::fs::write(&path, "{ not json").ok();

    let Err(err) = store.read("TestLevel", CHECKPOINT_SLOT) else {
        panic!("expected a parse error");
    };
    assert!(err.message.starts_with("Parse error"));

    let _ = std::fs::remove_dir_all(dir);
}
