//! Input service
//!
//! Built once at startup and shared as `Rc<InputService>` for the lifetime of
//! the process. Every method takes `&self`: event handlers run synchronously
//! inside [`InputService::handle_device_event`] and are allowed to call the
//! mode switches of the service that is dispatching them.

use super::action::{ActionKind, ActionPhase, ActionSample, ActionValue, MapRole};
use super::asset::{InputActionAsset, ResolvedAsset};
use super::cursor::CursorState;
use super::device::{DeviceBinding, DeviceEvent};
use super::maps::{ActionMapStore, MapGate};
use super::state::InputStateCache;
use super::{InputError, InputMode};
use crate::config::Config;
use crate::events::{EventHandler, EventRouter, InputEvent, SubscriptionId};
use crate::foundation::math::Vec2;
use std::cell::{Cell, Ref, RefCell, RefMut};
use std::collections::HashMap;
use std::path::Path;

/// Process-wide input service
pub struct InputService {
    maps: ActionMapStore,
    state: InputStateCache,
    router: EventRouter,
    cursor: Cell<CursorState>,
    binding: RefCell<Option<DeviceBinding>>,
    named: HashMap<String, Vec<(MapRole, ActionKind)>>,
    disposed: Cell<bool>,
}

impl InputService {
    /// Build the service from a binding asset
    ///
    /// Maps start disabled; call one of the mode switches (usually
    /// [`enable_gameplay_input`](Self::enable_gameplay_input)) afterwards.
    pub fn from_asset(asset: &InputActionAsset) -> Result<Self, InputError> {
        let resolved = asset.resolve()?;
        Ok(Self::from_resolved(&resolved))
    }

    /// Load the binding asset from `path` and build the service
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let asset = InputActionAsset::load_from_file(path)?;
        let service = Self::from_asset(&asset)?;
        log::info!("[InputService] Loaded actions from {}", path.display());
        Ok(service)
    }

    /// Load like [`load`](Self::load), but fall back to an inert service
    ///
    /// The failure is logged. An inert service has no maps and no device
    /// binding: readers return zero values and every other call is a no-op.
    pub fn load_or_inert(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(service) => service,
            Err(err) => {
                log::error!(
                    "[InputService] {} ({}); input is disabled for this session",
                    err,
                    path.as_ref().display()
                );
                Self::inert()
            }
        }
    }

    /// A service with no configuration that produces no input
    pub fn inert() -> Self {
        Self {
            maps: ActionMapStore::default(),
            state: InputStateCache::new(),
            router: EventRouter::new(),
            cursor: Cell::new(CursorState::default()),
            binding: RefCell::new(None),
            named: HashMap::new(),
            disposed: Cell::new(false),
        }
    }

    fn from_resolved(resolved: &ResolvedAsset) -> Self {
        let mut named: HashMap<String, Vec<(MapRole, ActionKind)>> = HashMap::new();
        for action in &resolved.actions {
            named.entry(action.name.clone()).or_default().push((action.map, action.kind));
        }

        let mut binding = DeviceBinding::new(resolved);
        binding.attach_listener();
        log::debug!("[InputService] Subscribed to device binding");

        Self {
            maps: ActionMapStore::with_maps(&resolved.maps),
            state: InputStateCache::new(),
            router: EventRouter::new(),
            cursor: Cell::new(CursorState::default()),
            binding: RefCell::new(Some(binding)),
            named,
            disposed: Cell::new(false),
        }
    }

    /// Whether the service was built without a usable configuration
    pub fn is_inert(&self) -> bool {
        self.binding.borrow().is_none()
    }

    // ---- state readers ----------------------------------------------------

    /// Latest move vector
    pub fn move_input(&self) -> Vec2 {
        self.state.move_input()
    }

    /// Latest look vector
    pub fn look_input(&self) -> Vec2 {
        self.state.look_input()
    }

    /// Whether jump is held
    pub fn is_jumping(&self) -> bool {
        self.state.is_jumping()
    }

    /// Whether run is held
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Pointer state requested by the last mode switch
    pub fn cursor(&self) -> CursorState {
        self.cursor.get()
    }

    /// Action maps and their enabled flags
    pub fn maps(&self) -> &ActionMapStore {
        &self.maps
    }

    /// Mode derived from the enabled maps
    pub fn mode(&self) -> InputMode {
        let gate = self.maps.gate();
        match (gate.gameplay, gate.ui) {
            (true, false) => InputMode::Gameplay,
            (false, true) => InputMode::Ui,
            (true, true) => InputMode::All,
            (false, false) => InputMode::None,
        }
    }

    // ---- mode control -----------------------------------------------------

    /// Enable gameplay, disable UI, lock and hide the pointer
    ///
    /// Cached input state is left as it is.
    pub fn enable_gameplay_input(&self) {
        if self.is_inert() {
            return;
        }
        self.maps.enable(MapRole::Gameplay);
        self.close_map(MapRole::Ui);
        self.cursor.set(CursorState::MOUSELOOK);
        log::info!("[InputService] Gameplay input enabled");
    }

    /// Disable gameplay and zero every cached value
    pub fn disable_gameplay_input(&self) {
        if self.is_inert() {
            return;
        }
        self.close_map(MapRole::Gameplay);
        self.state.reset();
        log::info!("[InputService] Gameplay input disabled");
    }

    /// Enable UI, disable gameplay, free and show the pointer
    ///
    /// Gameplay actions held at the switch are canceled, so move returns to
    /// zero and run ends even if the keys are released while UI is up.
    pub fn enable_ui_input(&self) {
        if self.is_inert() {
            return;
        }
        self.maps.enable(MapRole::Ui);
        self.close_map(MapRole::Gameplay);
        self.cursor.set(CursorState::FREE);
        log::info!("[InputService] UI input enabled");
    }

    /// Disable UI
    pub fn disable_ui_input(&self) {
        if self.is_inert() {
            return;
        }
        self.close_map(MapRole::Ui);
        log::info!("[InputService] UI input disabled");
    }

    /// Turn the whole input surface on: device binding active, both maps enabled
    ///
    /// This is the one transition that leaves gameplay and UI enabled together.
    pub fn enable_all_input(&self) {
        let Some(mut binding) = self.binding_mut() else {
            return;
        };
        binding.activate();
        self.maps.enable(MapRole::Gameplay);
        self.maps.enable(MapRole::Ui);
        log::info!("[InputService] All input enabled");
    }

    /// Turn the whole input surface off: device binding inactive, both maps disabled
    pub fn disable_all_input(&self) {
        match self.binding_mut() {
            Some(mut binding) => binding.deactivate(),
            None => return,
        }
        self.close_map(MapRole::Gameplay);
        self.close_map(MapRole::Ui);
        log::info!("[InputService] All input disabled");
    }

    /// Disable `role` and route a cancel for each of its held actions
    fn close_map(&self, role: MapRole) {
        let canceled = match self.binding_mut() {
            Some(mut binding) => binding.cancel_map(role),
            None => Vec::new(),
        };
        self.maps.disable(role);
        for sample in canceled {
            self.route(sample);
        }
    }

    /// Apply `mode` through the matching entry point
    pub fn set_mode(&self, mode: InputMode) {
        match mode {
            InputMode::Gameplay => self.enable_gameplay_input(),
            InputMode::Ui => self.enable_ui_input(),
            InputMode::All => self.enable_all_input(),
            InputMode::None => self.disable_all_input(),
        }
    }

    // ---- subscriptions ----------------------------------------------------

    /// Register `handler` for `event`
    pub fn subscribe<H>(&self, event: InputEvent, handler: H) -> SubscriptionId
    where
        H: EventHandler + 'static,
    {
        self.router.subscribe(event, handler)
    }

    /// Remove a registration; returns `false` if it was not registered
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.router.unsubscribe(id)
    }

    /// Register for jump-pressed
    pub fn on_jump_pressed(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::JumpPressed, handler)
    }

    /// Register for jump-released
    pub fn on_jump_released(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::JumpReleased, handler)
    }

    /// Register for run-started
    pub fn on_run_started(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::RunStarted, handler)
    }

    /// Register for run-canceled
    pub fn on_run_canceled(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::RunCanceled, handler)
    }

    /// Register for menu-pressed
    pub fn on_menu_pressed(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::MenuPressed, handler)
    }

    /// Register for interact-pressed
    pub fn on_interact_pressed(&self, handler: impl FnMut(InputEvent) + 'static) -> SubscriptionId {
        self.subscribe(InputEvent::InteractPressed, handler)
    }

    /// Number of handlers registered for `event`
    pub fn subscriber_count(&self, event: InputEvent) -> usize {
        self.router.subscriber_count(event)
    }

    // ---- routing ----------------------------------------------------------

    /// Feed one raw device event through the binding and route the results
    ///
    /// Map gating is evaluated once per device event, before any handler
    /// runs, so a handler that switches modes cannot let the same key press
    /// through a second map. Returns the number of handler invocations.
    pub fn handle_device_event(&self, event: &DeviceEvent) -> usize {
        let gate = self.maps.gate();
        let samples = {
            let Some(mut binding) = self.binding_mut() else {
                return 0;
            };
            if !binding.is_active() {
                // Keep held-key state current; nothing is routed
                binding.translate(event, MapGate::default());
                return 0;
            }
            binding.translate(event, gate)
        };
        self.route_gated(samples, gate)
    }

    /// Let the binding emit per-frame resets (pointer delta back to zero)
    pub fn end_frame(&self) -> usize {
        let samples = match self.binding_mut() {
            Some(mut binding) => binding.end_frame(),
            None => return 0,
        };
        self.route_gated(samples, self.maps.gate())
    }

    /// Route one typed sample, subject to map gating
    pub fn handle_sample(&self, sample: ActionSample) -> usize {
        if !self.binding.borrow().as_ref().is_some_and(DeviceBinding::is_active) {
            return 0;
        }
        self.route_gated(vec![sample], self.maps.gate())
    }

    /// Route a sample addressed by asset action name
    ///
    /// The name is looked up in the table built when the asset was loaded;
    /// the first map that defines it and is enabled receives the sample.
    /// Unknown names are ignored and route nothing.
    pub fn handle_named(&self, action: &str, phase: ActionPhase, value: ActionValue) -> usize {
        let Some(targets) = self.named.get(action) else {
            log::debug!("[InputService] Ignoring unknown action '{}'", action);
            return 0;
        };
        let gate = self.maps.gate();
        match targets.iter().find(|(map, _)| gate.allows(*map)) {
            Some((map, kind)) => self.handle_sample(ActionSample { kind: *kind, map: *map, phase, value }),
            None => 0,
        }
    }

    /// Route the samples of one device event
    ///
    /// A control bound in both maps (Escape as Pause and as Menu) yields the
    /// same kind and phase twice when both maps are open; only the first is
    /// routed.
    fn route_gated(&self, samples: Vec<ActionSample>, gate: MapGate) -> usize {
        let mut seen: Vec<(ActionKind, ActionPhase)> = Vec::with_capacity(samples.len());
        samples
            .into_iter()
            .filter(|sample| gate.allows(sample.map))
            .filter(|sample| {
                let edge = (sample.kind, sample.phase);
                let first = !seen.contains(&edge);
                seen.push(edge);
                first
            })
            .map(|sample| self.route(sample))
            .sum()
    }

    fn route(&self, sample: ActionSample) -> usize {
        match (sample.kind, sample.phase) {
            (ActionKind::Move, _) => {
                self.state.set_move(sample.value.axis());
                0
            }
            (ActionKind::Look, _) => {
                self.state.set_look(sample.value.axis());
                0
            }
            (ActionKind::Jump, ActionPhase::Performed) => {
                self.state.set_jumping(true);
                self.router.dispatch(InputEvent::JumpPressed)
            }
            (ActionKind::Jump, ActionPhase::Canceled) => {
                self.state.set_jumping(false);
                self.router.dispatch(InputEvent::JumpReleased)
            }
            (ActionKind::Run, ActionPhase::Started | ActionPhase::Performed) => {
                // Started and Performed arrive together for a button press
                if self.state.set_running(true) {
                    0
                } else {
                    self.router.dispatch(InputEvent::RunStarted)
                }
            }
            (ActionKind::Run, ActionPhase::Canceled) => {
                self.state.set_running(false);
                self.router.dispatch(InputEvent::RunCanceled)
            }
            (ActionKind::Menu, ActionPhase::Performed) => self.router.dispatch(InputEvent::MenuPressed),
            (ActionKind::Interact, ActionPhase::Performed) => self.router.dispatch(InputEvent::InteractPressed),
            (ActionKind::Jump | ActionKind::Menu | ActionKind::Interact, _) => 0,
        }
    }

    // ---- escape hatch and teardown -----------------------------------------

    /// The underlying device binding, for cases this API does not cover
    pub fn device_binding(&self) -> Option<Ref<'_, DeviceBinding>> {
        Ref::filter_map(self.binding.borrow(), Option::as_ref).ok()
    }

    fn binding_mut(&self) -> Option<RefMut<'_, DeviceBinding>> {
        RefMut::filter_map(self.binding.borrow_mut(), Option::as_mut).ok()
    }

    /// Tear the service down: drop every subscription, detach from the device
    /// binding, then release it. Runs at most once; also called on drop.
    pub fn shutdown(&self) {
        if self.disposed.replace(true) {
            return;
        }
        self.router.clear();
        if let Some(mut binding) = self.binding.borrow_mut().take() {
            binding.detach_listener();
        }
        self.maps.disable(MapRole::Gameplay);
        self.maps.disable(MapRole::Ui);
        self.state.reset();
        log::info!("[InputService] Disposed");
    }

    /// Whether [`shutdown`](Self::shutdown) has run
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }
}

impl Drop for InputService {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for InputService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputService")
            .field("mode", &self.mode())
            .field("inert", &self.is_inert())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}
