//! Scene-lifetime services: movement config, camera and the player

use super::project::ProjectContext;
use crate::config::PlayerMovementConfig;
use crate::player::PlayerController;
use crate::services::{CameraConfig, FirstPersonCamera, SharedCamera};
use fp_engine::config::Config;
use fp_engine::foundation::math::Vec3;
use fp_engine::physics::FlatGroundBody;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// What the scene ends up with
#[derive(Debug)]
pub struct SceneContext {
    /// Movement tuning handed to the player
    pub movement_config: PlayerMovementConfig,
    /// The scene camera
    pub camera: Rc<RefCell<FirstPersonCamera>>,
    /// The player, if one was spawned
    pub player: Option<PlayerController>,
}

/// Builds the [`SceneContext`]
#[derive(Debug, Clone, Default)]
pub struct PlayerInstaller {
    movement_config: Option<PlayerMovementConfig>,
    camera_config: CameraConfig,
    spawn_position: Option<Vec3>,
}

impl PlayerInstaller {
    /// Installer with nothing assigned
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign the movement config
    pub fn with_movement_config(mut self, config: PlayerMovementConfig) -> Self {
        self.movement_config = Some(config);
        self
    }

    /// Assign the movement config from a RON or TOML file
    ///
    /// An unreadable or invalid file leaves the config unassigned.
    pub fn with_movement_config_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let loaded = PlayerMovementConfig::load_from_file(path)
            .and_then(|config| config.validate().map(|()| config));
        match loaded {
            Ok(config) => {
                log::info!("[PlayerInstaller] Loaded movement config from {}", path.display());
                self.movement_config = Some(config);
            }
            Err(err) => log::error!("[PlayerInstaller] {}: {}", path.display(), err),
        }
        self
    }

    /// Camera rig tuning
    pub fn with_camera_config(mut self, config: CameraConfig) -> Self {
        self.camera_config = config;
        self
    }

    /// Spawn the player at `position`
    pub fn with_spawn_position(mut self, position: Vec3) -> Self {
        self.spawn_position = Some(position);
        self
    }

    /// Wire the scene on top of the project services
    pub fn install(&self, project: &ProjectContext) -> SceneContext {
        log::info!("[PlayerInstaller] Installing player bindings...");

        let movement_config = match &self.movement_config {
            Some(config) => config.clone(),
            None => {
                log::error!("[PlayerInstaller] PlayerMovementConfig is not assigned; using defaults");
                PlayerMovementConfig::default()
            }
        };

        let camera = Rc::new(RefCell::new(FirstPersonCamera::with_main_camera(
            self.camera_config.clone(),
        )));

        let player = match self.spawn_position {
            Some(position) => {
                let shared: SharedCamera = camera.clone();
                let body = FlatGroundBody::new(position, movement_config.character_radius);
                let mut player = PlayerController::new(
                    movement_config.clone(),
                    Rc::clone(&project.input),
                    Some(shared),
                    Box::new(body),
                    project.time_scale.clone(),
                );
                player.attach();
                log::info!("[PlayerInstaller] Player spawned at {:?}", position);
                Some(player)
            }
            None => {
                log::warn!("[PlayerInstaller] No player spawn configured; scene has no player");
                None
            }
        };

        SceneContext {
            movement_config,
            camera,
            player,
        }
    }
}
