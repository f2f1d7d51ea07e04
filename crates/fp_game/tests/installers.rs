//! Installer wiring and the engine loop end to end

mod common;

use fp_engine::core::config::{ApplicationConfig, EngineConfig, InputConfig};
use fp_engine::foundation::math::Vec3;
use fp_engine::input::{InputMode, KeyCode};
use fp_engine::{AppEvent, Engine};
use fp_game::installers::{PlayerInstaller, ProjectInstaller};
use fp_game::services::CameraService;
use fp_game::{FirstPersonApp, PlayerMovementConfig};

fn project_config() -> ApplicationConfig {
    ApplicationConfig {
        input: InputConfig::new(common::actions_path()),
        ..Default::default()
    }
}

#[test]
fn project_installer_builds_gameplay_input() {
    let project = ProjectInstaller::new(project_config()).install();
    assert!(!project.input.is_inert());
    assert_eq!(project.input.mode(), InputMode::Gameplay);
    assert!(project.input.cursor().is_locked());
}

#[test]
fn initial_mode_comes_from_config() {
    let mut config = project_config();
    config.input = config.input.with_initial_mode(InputMode::Ui);
    let project = ProjectInstaller::new(config).install();
    assert_eq!(project.input.mode(), InputMode::Ui);
}

#[test]
fn missing_movement_config_falls_back_to_defaults() {
    let project = ProjectInstaller::new(project_config()).install();
    let scene = PlayerInstaller::new()
        .with_movement_config_file("missing/player_movement.ron")
        .with_spawn_position(Vec3::zeros())
        .install(&project);
    assert_eq!(scene.movement_config, PlayerMovementConfig::default());
    assert!(scene.player.is_some());
}

#[test]
fn shipped_movement_config_loads() {
    let project = ProjectInstaller::new(project_config()).install();
    let path = format!("{}/resources/player_movement.ron", env!("CARGO_MANIFEST_DIR"));
    let scene = PlayerInstaller::new().with_movement_config_file(path).install(&project);
    assert_eq!(scene.movement_config.run_fov, 70.0);
    assert!(scene.player.is_none());
}

#[test]
fn spawned_player_is_attached() {
    let project = ProjectInstaller::new(project_config()).install();
    let scene = PlayerInstaller::new()
        .with_movement_config(PlayerMovementConfig::default())
        .with_spawn_position(Vec3::new(0.0, 0.0, 4.0))
        .install(&project);

    let player = scene.player.as_ref().expect("player spawned");
    assert!(player.is_movement_enabled());
    assert_eq!(player.position(), Vec3::new(0.0, 0.0, 4.0));
    let camera = scene.camera.borrow().camera_transform().expect("camera present");
    assert!((camera.position.y - 1.6).abs() < 1e-4);
}

#[test]
fn engine_runs_the_scene() {
    let project = ProjectInstaller::new(project_config()).install();
    let installer = PlayerInstaller::new()
        .with_movement_config(PlayerMovementConfig::default())
        .with_spawn_position(Vec3::zeros());
    let mut app = FirstPersonApp::new(installer);
    let mut engine = Engine::new(EngineConfig::new(), project.input.clone(), project.time_scale.clone())
        .expect("valid engine config");

    let mut frames = vec![vec![AppEvent::key_down(KeyCode::W)]];
    frames.extend(std::iter::repeat_with(Vec::new).take(59));
    frames.push(vec![AppEvent::key_down(KeyCode::Escape), AppEvent::key_up(KeyCode::Escape)]);
    frames.extend(std::iter::repeat_with(Vec::new).take(30));
    engine.run(&mut app, frames).expect("loop runs");

    let scene = app.scene().expect("initialized");
    let player = scene.player.as_ref().expect("player spawned");
    assert!(player.position().z > 3.0);
    assert!(player.is_paused());
    assert!(project.time_scale.is_frozen());
    assert_eq!(project.input.mode(), InputMode::Ui);
    // cleanup disabled the controller
    assert!(!player.is_movement_enabled());
}
