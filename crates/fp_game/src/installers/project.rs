//! Process-lifetime services

use fp_engine::core::config::ApplicationConfig;
use fp_engine::foundation::time::TimeScale;
use fp_engine::input::InputService;
use std::rc::Rc;

/// Services shared by every scene
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// The one input service
    pub input: Rc<InputService>,
    /// Simulation time scale
    pub time_scale: TimeScale,
    /// Whether debug services were requested
    pub debug_mode: bool,
}

/// Builds the [`ProjectContext`]
#[derive(Debug, Clone, Default)]
pub struct ProjectInstaller {
    config: ApplicationConfig,
}

impl ProjectInstaller {
    /// Installer for `config`
    pub fn new(config: ApplicationConfig) -> Self {
        Self { config }
    }

    /// Construct the global services
    ///
    /// A missing or broken action asset does not fail startup: the input
    /// service comes up inert and the error is logged.
    pub fn install(&self) -> ProjectContext {
        log::info!("[ProjectInstaller] Installing global services...");

        let input = InputService::load_or_inert(&self.config.input.actions_path);
        input.set_mode(self.config.input.initial_mode);
        log::info!("[ProjectInstaller] Input service ready ({:?})", input.mode());

        let debug_mode = self.config.engine.debug_mode;
        if debug_mode {
            log::info!("[ProjectInstaller] Debug mode enabled");
        }

        ProjectContext {
            input: Rc::new(input),
            time_scale: TimeScale::new(),
            debug_mode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp_engine::core::config::InputConfig;
    use fp_engine::input::InputMode;

    #[test]
    fn test_missing_asset_yields_inert_input() {
        let config = ApplicationConfig {
            input: InputConfig::new("does/not/exist.ron"),
            ..Default::default()
        };
        let project = ProjectInstaller::new(config).install();
        assert!(project.input.is_inert());
        assert_eq!(project.input.mode(), InputMode::None);
        assert!(!project.time_scale.is_frozen());
    }
}
