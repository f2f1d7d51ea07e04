//! Shared setup for the player integration tests

#![allow(dead_code)]

use fp_engine::foundation::math::Vec3;
use fp_engine::foundation::time::TimeScale;
use fp_engine::input::{DeviceEvent, InputService, KeyCode};
use fp_engine::physics::FlatGroundBody;
use fp_game::services::{CameraConfig, FirstPersonCamera, SharedCamera};
use fp_game::{PlayerController, PlayerMovementConfig};
use std::cell::RefCell;
use std::rc::Rc;

pub const DT: f32 = 1.0 / 60.0;

pub fn actions_path() -> String {
    format!("{}/resources/input_actions.ron", env!("CARGO_MANIFEST_DIR"))
}

/// Input service over the shipped bindings, gameplay mode on
pub fn input() -> Rc<InputService> {
    let service = InputService::load(actions_path()).expect("shipped asset loads");
    service.enable_gameplay_input();
    Rc::new(service)
}

pub struct Rig {
    pub input: Rc<InputService>,
    pub camera: Rc<RefCell<FirstPersonCamera>>,
    pub time_scale: TimeScale,
    pub player: PlayerController,
}

impl Rig {
    pub fn new() -> Self {
        Self::with_config(PlayerMovementConfig::default())
    }

    pub fn with_config(config: PlayerMovementConfig) -> Self {
        let input = input();
        let camera = Rc::new(RefCell::new(FirstPersonCamera::with_main_camera(CameraConfig::default())));
        let shared: SharedCamera = camera.clone();
        let time_scale = TimeScale::new();
        let body = FlatGroundBody::new(Vec3::zeros(), config.character_radius);
        let mut player = PlayerController::new(
            config,
            Rc::clone(&input),
            Some(shared),
            Box::new(body),
            time_scale.clone(),
        );
        player.attach();
        Self { input, camera, time_scale, player }
    }

    pub fn press(&self, key: KeyCode) {
        self.input.handle_device_event(&DeviceEvent::Key { key, pressed: true });
    }

    pub fn release(&self, key: KeyCode) {
        self.input.handle_device_event(&DeviceEvent::Key { key, pressed: false });
    }

    pub fn tap(&self, key: KeyCode) {
        self.press(key);
        self.release(key);
    }

    pub fn look(&self, delta_x: f32, delta_y: f32) {
        self.input.handle_device_event(&DeviceEvent::MouseMotion { delta_x, delta_y });
    }

    /// One frame the way the engine runs it
    pub fn frame(&mut self) {
        let scaled = self.time_scale.scale(DT);
        self.player.tick(scaled);
        self.input.end_frame();
    }

    pub fn frames(&mut self, count: usize) {
        for _ in 0..count {
            self.frame();
        }
    }

    pub fn fov(&self) -> f32 {
        use fp_game::services::CameraService;
        self.camera.borrow().field_of_view().expect("camera present")
    }
}
