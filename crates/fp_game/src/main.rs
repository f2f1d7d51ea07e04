//! Headless demo: walk, run, jump, look around, pause and resume

use fp_engine::core::config::ApplicationConfig;
use fp_engine::config::{Config, ConfigError};
use fp_engine::foundation::logging;
use fp_engine::foundation::math::Vec3;
use fp_engine::input::KeyCode;
use fp_engine::{AppEvent, Engine};
use fp_game::installers::{PlayerInstaller, ProjectInstaller};
use fp_game::services::CameraService;
use fp_game::FirstPersonApp;
use std::path::{Path, PathBuf};

/// Shipped resources, independent of the working directory
fn resources_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("resources")
}

fn load_config(resources: &Path) -> (ApplicationConfig, Option<ConfigError>) {
    let path = resources.join("game.toml");
    let (mut config, error) = if !path.exists() {
        (ApplicationConfig::default(), None)
    } else {
        match ApplicationConfig::load_from_file(&path) {
            Ok(config) => (config, None),
            Err(err) => (ApplicationConfig::default(), Some(err)),
        }
    };
    config.input = config.input.relative_to(resources);
    (config, error)
}

/// Frames of host events: each inner list is one frame
fn script() -> Vec<Vec<AppEvent>> {
    let mut frames = Vec::new();
    let mut hold = |events: Vec<AppEvent>, idle: usize| {
        frames.push(events);
        frames.extend(std::iter::repeat_with(Vec::new).take(idle));
    };

    hold(vec![AppEvent::key_down(KeyCode::W)], 30);
    hold(vec![AppEvent::key_down(KeyCode::LeftShift)], 30);
    hold(vec![AppEvent::key_down(KeyCode::Space)], 2);
    hold(vec![AppEvent::key_up(KeyCode::Space)], 40);
    hold(vec![AppEvent::key_up(KeyCode::LeftShift), AppEvent::mouse_motion(10.0, -5.0)], 10);
    hold(vec![AppEvent::key_down(KeyCode::Escape), AppEvent::key_up(KeyCode::Escape)], 10);
    hold(vec![AppEvent::key_down(KeyCode::Escape), AppEvent::key_up(KeyCode::Escape)], 10);
    hold(vec![AppEvent::key_down(KeyCode::E), AppEvent::key_up(KeyCode::E)], 0);
    hold(vec![AppEvent::key_up(KeyCode::W), AppEvent::WindowCloseRequested], 0);
    frames
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let resources = resources_dir();
    let (config, load_error) = load_config(&resources);
    logging::init(&config.engine.log_level);
    if let Some(err) = load_error {
        log::warn!("Using default configuration: {}", err);
    }
    config.validate()?;

    log::info!("Starting first-person demo");

    let project = ProjectInstaller::new(config.clone()).install();
    let installer = PlayerInstaller::new()
        .with_movement_config_file(resources.join("player_movement.ron"))
        .with_spawn_position(Vec3::zeros());
    let mut app = FirstPersonApp::new(installer).with_debug_mode(project.debug_mode);

    let mut engine = Engine::new(config.engine, project.input.clone(), project.time_scale.clone())?;
    engine.run(&mut app, script())?;

    if let Some(scene) = app.scene() {
        if let Some(player) = &scene.player {
            log::info!(
                "Player at {:?}, yaw {:.1}, pitch {:.1}, interactions {}",
                player.position(),
                player.yaw(),
                player.pitch(),
                player.interaction_count()
            );
        }
        log::info!("Camera fov {:?}", scene.camera.borrow().field_of_view());
    }

    project.input.shutdown();
    Ok(())
}
