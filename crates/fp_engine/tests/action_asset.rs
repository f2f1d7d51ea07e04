//! Loading binding assets from disk

use fp_engine::config::{Config, ConfigError, ConfigFormat};
use fp_engine::input::{ActionKind, Binding, InputActionAsset, InputError, InputService, KeyCode, MapRole};
use std::path::PathBuf;

fn shipped_asset() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fp_game/resources/input_actions.ron")
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("fp_engine_{}_{}", std::process::id(), name))
}

#[test]
fn shipped_asset_resolves_every_routed_action() {
    let asset = InputActionAsset::load_from_file(shipped_asset()).unwrap();
    let resolved = asset.resolve().unwrap();

    assert!(resolved.has_map(MapRole::Gameplay));
    assert!(resolved.has_map(MapRole::Ui));
    for kind in [
        ActionKind::Move,
        ActionKind::Look,
        ActionKind::Jump,
        ActionKind::Run,
        ActionKind::Menu,
        ActionKind::Interact,
    ] {
        assert!(
            resolved.actions.iter().any(|action| action.kind == kind && action.map == MapRole::Gameplay),
            "{:?} missing from gameplay map",
            kind
        );
    }
}

#[test]
fn asset_round_trips_through_disk() {
    let asset = InputActionAsset::load_from_file(shipped_asset()).unwrap();
    let path = temp_path("actions.ron");
    asset.save_to_file(&path).unwrap();

    let reloaded = InputActionAsset::load_from_file(&path).unwrap();
    assert_eq!(reloaded, asset);
    assert!(!InputService::load(&path).unwrap().is_inert());

    std::fs::remove_file(&path).ok();
}

#[test]
fn toml_asset_loads() {
    let path = temp_path("actions.toml");
    std::fs::write(
        &path,
        r#"
[[maps]]
name = "Player"

[[maps.actions]]
name = "Jump"
bindings = [{ Key = "Space" }]

[[maps.actions]]
name = "Look"
bindings = ["MouseDelta"]
"#,
    )
    .unwrap();

    let asset = InputActionAsset::load_from_file(&path).unwrap();
    assert_eq!(asset.maps.len(), 1);
    assert_eq!(asset.maps[0].actions[0].bindings, vec![Binding::Key(KeyCode::Space)]);
    assert_eq!(asset.maps[0].actions[1].bindings, vec![Binding::MouseDelta]);
    assert!(!InputService::load(&path).unwrap().is_inert());

    std::fs::remove_file(&path).ok();
}

#[test]
fn missing_file_is_an_io_error() {
    let err = InputService::load(temp_path("nope.ron")).unwrap_err();
    assert!(matches!(err, InputError::Asset(ConfigError::Io { .. })));
}

#[test]
fn asset_without_player_map_is_rejected() {
    let path = temp_path("ui_only.ron");
    let asset = InputActionAsset::from_str_as(r#"(maps: [(name: "UI", actions: [])])"#, ConfigFormat::Ron).unwrap();
    asset.save_to_file(&path).unwrap();

    assert!(matches!(InputService::load(&path), Err(InputError::MissingMap(name)) if name == "Player"));
    assert!(InputService::load_or_inert(&path).is_inert());

    std::fs::remove_file(&path).ok();
}

#[test]
fn unknown_extension_is_unsupported() {
    let err = InputService::load("bindings.json").unwrap_err();
    assert!(matches!(err, InputError::Asset(ConfigError::UnsupportedFormat(_))));
}
