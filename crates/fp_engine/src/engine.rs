//! Core engine implementation
//!
//! The engine owns the frame clock, the shared time scale and a handle to the
//! input service. Each frame it routes host events into the input service,
//! ticks the application with the scaled delta, then lets the input layer
//! emit its end-of-frame resets.

use crate::{
    application::{AppError, AppEvent, Application},
    config::ConfigError,
    core::config::EngineConfig,
    foundation::time::{TimeScale, Timer},
    input::{DeviceEvent, InputService},
};
use std::rc::Rc;
use thiserror::Error;

/// Main engine struct
pub struct Engine {
    input: Rc<InputService>,
    time_scale: TimeScale,
    timer: Timer,
    config: EngineConfig,
    running: bool,
}

impl Engine {
    /// Create a new engine instance around already constructed services
    pub fn new(
        config: EngineConfig,
        input: Rc<InputService>,
        time_scale: TimeScale,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        log::info!(
            "Initializing engine (fixed step {:.4}s, debug {})",
            config.fixed_timestep,
            config.debug_mode
        );

        Ok(Self {
            input,
            time_scale,
            timer: Timer::new(),
            config,
            running: true,
        })
    }

    /// Run `app` over scripted frames at the configured fixed step
    ///
    /// Each item of `frames` is the list of host events for one frame. The
    /// loop ends early if the engine is asked to stop.
    pub fn run<T, F>(&mut self, app: &mut T, frames: F) -> Result<(), EngineError>
    where
        T: Application,
        F: IntoIterator<Item = Vec<AppEvent>>,
    {
        app.initialize(self)
            .map_err(|e| EngineError::ApplicationError(format!("App initialization: {}", e)))?;

        log::info!("Starting main loop...");

        let step = self.config.fixed_timestep;
        let mut result = Ok(());
        for events in frames {
            if !self.running {
                break;
            }
            if let Err(e) = self.step(app, &events, step) {
                result = Err(e);
                break;
            }
        }

        app.cleanup(self);
        log::info!("Engine loop finished after {} frames", self.timer.frame_count());
        result
    }

    /// Advance one frame
    pub fn step<T: Application>(
        &mut self,
        app: &mut T,
        events: &[AppEvent],
        delta_time: f32,
    ) -> Result<(), EngineError> {
        for event in events {
            app.handle_event(self, event)
                .map_err(|e| EngineError::ApplicationError(format!("App event: {}", e)))?;
        }

        self.timer.advance(delta_time);
        let scaled = self.time_scale.scale(delta_time);

        app.update(self, scaled)
            .map_err(|e| EngineError::ApplicationError(format!("App update: {}", e)))?;

        self.input.end_frame();
        Ok(())
    }

    /// Handle an application event
    pub fn handle_event(&mut self, event: &AppEvent) -> Result<(), AppError> {
        let device_event = match *event {
            AppEvent::WindowCloseRequested => {
                self.quit();
                return Ok(());
            }
            AppEvent::WindowFocused | AppEvent::WindowUnfocused => {
                log::debug!("Focus changed: {:?}", event);
                return Ok(());
            }
            AppEvent::KeyInput { key, pressed } => DeviceEvent::Key { key, pressed },
            AppEvent::MouseButton { button, pressed } => DeviceEvent::MouseButton { button, pressed },
            AppEvent::MouseMotion { delta_x, delta_y } => DeviceEvent::MouseMotion { delta_x, delta_y },
        };
        self.input.handle_device_event(&device_event);
        Ok(())
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the loop keeps going
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The shared input service
    pub fn input(&self) -> &Rc<InputService> {
        &self.input
    }

    /// The shared time scale
    pub fn time_scale(&self) -> &TimeScale {
        &self.time_scale
    }

    /// Frame clock
    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get the current frame delta time (unscaled)
    pub fn delta_time(&self) -> f32 {
        self.timer.delta_time()
    }
}

/// Engine errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Engine configuration rejected
    #[error("Invalid engine configuration: {0}")]
    Config(#[from] ConfigError),

    /// Application returned an error
    #[error("Application error: {0}")]
    ApplicationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{ActionMapDef, ActionDef, Binding, InputActionAsset, KeyCode};
    use approx::assert_relative_eq;

    fn service() -> Rc<InputService> {
        let asset = InputActionAsset {
            maps: vec![
                ActionMapDef {
                    name: "Player".into(),
                    actions: vec![
                        ActionDef { name: "Jump".into(), bindings: vec![Binding::Key(KeyCode::Space)] },
                        ActionDef { name: "Look".into(), bindings: vec![Binding::MouseDelta] },
                    ],
                },
                ActionMapDef { name: "UI".into(), actions: vec![] },
            ],
        };
        let service = InputService::from_asset(&asset).expect("asset resolves");
        service.enable_gameplay_input();
        Rc::new(service)
    }

    #[derive(Default)]
    struct Recorder {
        initialized: bool,
        cleaned_up: bool,
        deltas: Vec<f32>,
        jumping: Vec<bool>,
        looks: Vec<f32>,
    }

    impl Application for Recorder {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
            self.deltas.push(delta_time);
            self.jumping.push(engine.input().is_jumping());
            self.looks.push(engine.input().look_input().x);
            Ok(())
        }

        fn cleanup(&mut self, _engine: &mut Engine) {
            self.cleaned_up = true;
        }
    }

    #[test]
    fn test_events_reach_input_before_update() {
        let time_scale = TimeScale::new();
        let mut engine = Engine::new(EngineConfig::new(), service(), time_scale).unwrap();
        let mut app = Recorder::default();

        let frames = vec![
            vec![AppEvent::key_down(KeyCode::Space), AppEvent::mouse_motion(3.0, 0.0)],
            vec![],
            vec![AppEvent::key_up(KeyCode::Space)],
        ];
        engine.run(&mut app, frames).unwrap();

        assert!(app.initialized && app.cleaned_up);
        assert_eq!(app.jumping, vec![true, true, false]);
        // pointer delta only lasts one frame
        assert_eq!(app.looks, vec![3.0, 0.0, 0.0]);
    }

    #[test]
    fn test_update_receives_scaled_delta() {
        let time_scale = TimeScale::new();
        let mut engine = Engine::new(EngineConfig::new(), service(), time_scale.clone()).unwrap();
        let mut app = Recorder::default();

        engine.step(&mut app, &[], 0.5).unwrap();
        time_scale.set(TimeScale::FROZEN);
        engine.step(&mut app, &[], 0.5).unwrap();

        assert_eq!(app.deltas, vec![0.5, 0.0]);
        assert_relative_eq!(engine.timer().total_time(), 1.0);
    }

    #[test]
    fn test_close_request_stops_loop() {
        let mut engine = Engine::new(EngineConfig::new(), service(), TimeScale::new()).unwrap();
        let mut app = Recorder::default();
        let frames = vec![vec![AppEvent::WindowCloseRequested], vec![], vec![]];
        engine.run(&mut app, frames).unwrap();
        assert_eq!(app.deltas.len(), 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = EngineConfig::new().with_fixed_timestep(0.0);
        assert!(matches!(
            Engine::new(config, service(), TimeScale::new()),
            Err(EngineError::Config(_))
        ));
    }
}
