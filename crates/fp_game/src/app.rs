//! The game as an engine [`Application`]

use crate::installers::{PlayerInstaller, ProjectContext, SceneContext};
use fp_engine::{AppError, Application, Engine};

/// Hosts one scene built by a [`PlayerInstaller`]
#[derive(Debug)]
pub struct FirstPersonApp {
    installer: PlayerInstaller,
    debug_mode: bool,
    scene: Option<SceneContext>,
}

impl FirstPersonApp {
    /// App that installs its scene with `installer` on initialize
    pub fn new(installer: PlayerInstaller) -> Self {
        Self {
            installer,
            debug_mode: false,
            scene: None,
        }
    }

    /// Carry the project's debug flag into the scene
    pub fn with_debug_mode(mut self, enabled: bool) -> Self {
        self.debug_mode = enabled;
        self
    }

    /// The installed scene, once initialized
    pub fn scene(&self) -> Option<&SceneContext> {
        self.scene.as_ref()
    }
}

impl Application for FirstPersonApp {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        let project = ProjectContext {
            input: engine.input().clone(),
            time_scale: engine.time_scale().clone(),
            debug_mode: self.debug_mode,
        };
        self.scene = Some(self.installer.install(&project));
        Ok(())
    }

    fn update(&mut self, _engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        if let Some(player) = self.scene.as_mut().and_then(|scene| scene.player.as_mut()) {
            player.tick(delta_time);
        }
        Ok(())
    }

    fn cleanup(&mut self, _engine: &mut Engine) {
        if let Some(player) = self.scene.as_mut().and_then(|scene| scene.player.as_mut()) {
            player.set_movement_enabled(false);
        }
        log::info!("[FirstPersonApp] Scene unloaded");
    }
}
