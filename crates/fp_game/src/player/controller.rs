//! First-person player controller
//!
//! Reads continuous input every tick (move, look, running) and reacts to
//! discrete input events (jump, run FOV, pause, interact). Event handlers hold
//! a weak handle to the controller state, so the input service never keeps a
//! dropped player alive; dropping the controller also unsubscribes them.

use crate::config::PlayerMovementConfig;
use crate::services::{SharedCamera, SharedTransform};
use fp_engine::events::{InputEvent, SubscriptionId};
use fp_engine::foundation::math::{utils, Transform, Vec2, Vec3};
use fp_engine::foundation::time::TimeScale;
use fp_engine::input::InputService;
use fp_engine::physics::{BoundingSphere, CharacterBody};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// How far below the feet the ground probe sphere is centered
const GROUND_PROBE_OFFSET: f32 = 0.1;

/// Vertical velocity kept while standing, so the probe stays in contact
const GROUNDED_VELOCITY: f32 = -2.0;

/// Look input below this squared magnitude is ignored
const LOOK_DEADZONE_SQ: f32 = 0.01;

/// Smoothed input magnitude above which the player counts as moving
const MOVING_THRESHOLD: f32 = 0.1;

struct ControllerState {
    config: PlayerMovementConfig,
    input: Rc<InputService>,
    camera: Option<SharedCamera>,
    body: Box<dyn CharacterBody>,
    time_scale: TimeScale,
    transform: SharedTransform,

    velocity: Vec3,
    smoothed_move: Vec2,
    move_damp_velocity: Vec2,
    grounded: bool,
    yaw: f32,
    pitch: f32,
    paused: bool,
    interactions: u32,
}

impl ControllerState {
    fn tick(&mut self, delta_time: f32) {
        self.check_grounded();
        self.apply_movement(delta_time);
        self.apply_look();
        self.apply_gravity(delta_time);
        self.sync_transform();

        if self.config.show_debug_info {
            log::debug!(
                "[PlayerController] pos {:?} vel {:?} grounded {} (ground ray {:.2})",
                self.body.position(),
                self.velocity,
                self.grounded,
                self.config.ground_check_distance
            );
        }
    }

    fn check_grounded(&mut self) {
        let center = self.body.position() - Vec3::new(0.0, GROUND_PROBE_OFFSET, 0.0);
        let probe = BoundingSphere::new(center, self.config.character_radius);
        self.grounded = self.body.check_sphere(&probe, self.config.ground_layers);
    }

    fn apply_movement(&mut self, delta_time: f32) {
        let raw = self.input.move_input();
        self.smoothed_move = utils::smooth_damp_vec2(
            self.smoothed_move,
            raw,
            &mut self.move_damp_velocity,
            self.config.movement_smooth_time,
            delta_time,
        );

        let facing = self.transform.borrow().clone();
        let direction = facing.right() * self.smoothed_move.x + facing.forward() * self.smoothed_move.y;
        self.body.move_by(direction * self.current_speed() * delta_time);
    }

    fn apply_look(&mut self) {
        let look = self.input.look_input();
        if look.norm_squared() < LOOK_DEADZONE_SQ {
            return;
        }

        let sensitivity = self.config.mouse_sensitivity;
        let limit = self.config.look_x_limit;
        self.yaw = utils::wrap_degrees(self.yaw + look.x * sensitivity);
        self.pitch = utils::clamp(self.pitch - look.y * sensitivity, -limit, limit);

        self.transform.borrow_mut().rotation = utils::yaw_rotation(self.yaw);
        if let Some(camera) = &self.camera {
            camera.borrow_mut().update_rotation(self.pitch);
        }
    }

    fn apply_gravity(&mut self, delta_time: f32) {
        if self.grounded && self.velocity.y < 0.0 {
            self.velocity.y = GROUNDED_VELOCITY;
        }
        self.velocity.y += self.config.gravity * delta_time;
        self.body.move_by(self.velocity * delta_time);
    }

    fn sync_transform(&self) {
        self.transform.borrow_mut().position = self.body.position();
    }

    fn current_speed(&self) -> f32 {
        if self.input.is_running() {
            self.config.run_speed
        } else {
            self.config.walk_speed
        }
    }

    fn on_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::JumpPressed => self.jump(),
            InputEvent::RunStarted => self.set_fov(self.config.run_fov),
            InputEvent::RunCanceled => self.set_fov(self.config.walk_fov),
            InputEvent::MenuPressed => self.toggle_pause(),
            InputEvent::InteractPressed => {
                self.interactions += 1;
                log::info!("[PlayerController] Interact!");
            }
            InputEvent::JumpReleased => {}
        }
    }

    fn jump(&mut self) {
        if self.grounded && !self.paused {
            self.velocity.y = self.config.jump_velocity();
            log::debug!("[PlayerController] Jump! vy = {:.3}", self.velocity.y);
        }
    }

    fn set_fov(&self, fov: f32) {
        if let Some(camera) = &self.camera {
            camera.borrow_mut().set_field_of_view(fov);
        }
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.input.enable_ui_input();
            self.time_scale.set(TimeScale::FROZEN);
            log::info!("[PlayerController] Game paused");
        } else {
            self.input.enable_gameplay_input();
            self.time_scale.set(TimeScale::NORMAL);
            log::info!("[PlayerController] Game resumed");
        }
        // Cancels raised by the switch arrive while this state is borrowed
        let fov = if self.input.is_running() { self.config.run_fov } else { self.config.walk_fov };
        self.set_fov(fov);
    }
}

/// Events the controller listens to
const HANDLED_EVENTS: [InputEvent; 5] = [
    InputEvent::JumpPressed,
    InputEvent::RunStarted,
    InputEvent::RunCanceled,
    InputEvent::MenuPressed,
    InputEvent::InteractPressed,
];

/// First-person player controller
pub struct PlayerController {
    state: Rc<RefCell<ControllerState>>,
    input: Rc<InputService>,
    subscriptions: Vec<SubscriptionId>,
    enabled: bool,
}

impl PlayerController {
    /// Build a controller around its collaborators
    ///
    /// The controller is inert until [`attach`](Self::attach) subscribes it to
    /// input and mounts the camera. A missing camera only disables camera
    /// effects.
    pub fn new(
        config: PlayerMovementConfig,
        input: Rc<InputService>,
        camera: Option<SharedCamera>,
        body: Box<dyn CharacterBody>,
        time_scale: TimeScale,
    ) -> Self {
        if camera.is_none() {
            log::warn!("[PlayerController] No camera service; look pitch and FOV changes are skipped");
        }
        let transform = Rc::new(RefCell::new(Transform::from_position(body.position())));
        let state = ControllerState {
            config,
            input: Rc::clone(&input),
            camera,
            body,
            time_scale,
            transform,
            velocity: Vec3::zeros(),
            smoothed_move: Vec2::zeros(),
            move_damp_velocity: Vec2::zeros(),
            grounded: false,
            yaw: 0.0,
            pitch: 0.0,
            paused: false,
            interactions: 0,
        };
        log::debug!("[PlayerController] Dependencies wired");
        Self {
            state: Rc::new(RefCell::new(state)),
            input,
            subscriptions: Vec::new(),
            enabled: false,
        }
    }

    /// Mount the camera on the player and start listening to input
    pub fn attach(&mut self) {
        {
            let state = self.state.borrow();
            if let Some(camera) = &state.camera {
                camera.borrow_mut().set_follow_target(Rc::clone(&state.transform));
            }
        }
        self.set_movement_enabled(true);
        log::info!("[PlayerController] Player initialized");
    }

    /// Enable or disable the controller
    ///
    /// Enabling subscribes to input events and enables gameplay input.
    /// Disabling unsubscribes but leaves the input mode alone, since other
    /// systems may still need it.
    pub fn set_movement_enabled(&mut self, enabled: bool) {
        if enabled == self.enabled {
            return;
        }
        self.enabled = enabled;
        if enabled {
            self.subscribe();
            self.input.enable_gameplay_input();
        } else {
            self.unsubscribe();
        }
    }

    /// Advance one frame; `delta_time` is already time-scaled
    pub fn tick(&mut self, delta_time: f32) {
        if !self.enabled {
            return;
        }
        let Ok(mut state) = self.state.try_borrow_mut() else {
            log::warn!("[PlayerController] Tick skipped: state is busy");
            return;
        };
        if state.paused {
            return;
        }
        state.tick(delta_time);
    }

    /// Teleport to `position`, stop all motion and level the view
    pub fn reset_position(&mut self, position: Vec3) {
        let mut state = self.state.borrow_mut();
        state.body.set_position(position);
        state.velocity = Vec3::zeros();
        state.pitch = 0.0;
        state.sync_transform();
        if let Some(camera) = &state.camera {
            camera.borrow_mut().reset_camera();
        }
    }

    fn subscribe(&mut self) {
        if self.input.is_inert() {
            log::warn!("[PlayerController] Input service has no bindings; not subscribing");
            return;
        }
        for event in HANDLED_EVENTS {
            let weak: Weak<RefCell<ControllerState>> = Rc::downgrade(&self.state);
            let id = self.input.subscribe(event, move |event: InputEvent| {
                let Some(state) = weak.upgrade() else {
                    return;
                };
                match state.try_borrow_mut() {
                    Ok(mut state) => state.on_event(event),
                    Err(_) => log::warn!("[PlayerController] Dropped {:?}: state is busy", event),
                };
            });
            self.subscriptions.push(id);
        }
        log::debug!("[PlayerController] Subscribed to input events");
    }

    fn unsubscribe(&mut self) {
        for id in self.subscriptions.drain(..) {
            self.input.unsubscribe(id);
        }
    }

    /// Whether the ground probe hit on the last tick
    pub fn is_grounded(&self) -> bool {
        self.state.borrow().grounded
    }

    /// Whether the smoothed movement input is significant
    pub fn is_moving(&self) -> bool {
        self.state.borrow().smoothed_move.norm() > MOVING_THRESHOLD
    }

    /// Whether the run action is held
    pub fn is_running(&self) -> bool {
        self.input.is_running()
    }

    /// Run or walk speed, whichever applies now
    pub fn current_speed(&self) -> f32 {
        self.state.borrow().current_speed()
    }

    /// Whether the game is paused by this controller
    pub fn is_paused(&self) -> bool {
        self.state.borrow().paused
    }

    /// Whether the controller is subscribed and ticking
    pub fn is_movement_enabled(&self) -> bool {
        self.enabled
    }

    /// Heading in degrees, `[0, 360)`
    pub fn yaw(&self) -> f32 {
        self.state.borrow().yaw
    }

    /// Look pitch in degrees, positive looks down
    pub fn pitch(&self) -> f32 {
        self.state.borrow().pitch
    }

    /// Feet position
    pub fn position(&self) -> Vec3 {
        self.state.borrow().body.position()
    }

    /// Current velocity (only the vertical part is integrated)
    pub fn velocity(&self) -> Vec3 {
        self.state.borrow().velocity
    }

    /// Times interact was pressed
    pub fn interaction_count(&self) -> u32 {
        self.state.borrow().interactions
    }

    /// The player transform the camera follows
    pub fn transform(&self) -> SharedTransform {
        Rc::clone(&self.state.borrow().transform)
    }

    /// Movement tuning in use
    pub fn config(&self) -> PlayerMovementConfig {
        self.state.borrow().config.clone()
    }
}

impl Drop for PlayerController {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for PlayerController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlayerController")
            .field("enabled", &self.enabled)
            .field("subscriptions", &self.subscriptions.len())
            .finish_non_exhaustive()
    }
}
