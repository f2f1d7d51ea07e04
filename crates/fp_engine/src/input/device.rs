//! Device binding
//!
//! Turns raw device events into [`ActionSample`]s using the resolved asset.
//! Button actions emit `Started` + `Performed` once when the first bound
//! control goes down and `Canceled` once when the last one comes up; key
//! repeat while held produces nothing. Composite actions emit whenever their
//! vector changes. Pointer-delta actions emit on motion and are canceled back
//! to zero by [`DeviceBinding::end_frame`]. Actions of a closed map stay at
//! rest; [`DeviceBinding::cancel_map`] returns a map's held actions to rest
//! when it closes.

use super::action::{ActionPhase, ActionSample, ActionValue, MapRole};
use super::asset::{Binding, ResolvedAction, ResolvedAsset};
use super::maps::MapGate;
use super::{KeyCode, MouseButton};
use crate::foundation::math::Vec2;
use std::collections::HashSet;

/// Raw events from keyboard and mouse
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceEvent {
    /// Key went down or up
    Key {
        /// The key
        key: KeyCode,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// Mouse button went down or up
    MouseButton {
        /// The button
        button: MouseButton,
        /// `true` on press, `false` on release
        pressed: bool,
    },
    /// Relative pointer motion since the last event
    MouseMotion {
        /// Horizontal delta
        delta_x: f32,
        /// Vertical delta
        delta_y: f32,
    },
}

#[derive(Debug)]
struct BoundAction {
    action: ResolvedAction,
    value: ActionValue,
    pointer_dirty: bool,
}

impl BoundAction {
    fn new(action: ResolvedAction) -> Self {
        let value = Self::rest(&action);
        Self {
            action,
            value,
            pointer_dirty: false,
        }
    }

    fn rest(action: &ResolvedAction) -> ActionValue {
        if action.kind.is_axis() {
            ActionValue::Axis2(Vec2::zeros())
        } else {
            ActionValue::Button(false)
        }
    }

    fn uses_key(&self, key: KeyCode) -> bool {
        self.action.bindings.iter().any(|binding| match binding {
            Binding::Key(bound) => *bound == key,
            Binding::Composite2D { up, down, left, right } => [up, down, left, right].contains(&&key),
            Binding::Mouse(_) | Binding::MouseDelta => false,
        })
    }

    fn uses_button(&self, button: MouseButton) -> bool {
        self.action
            .bindings
            .iter()
            .any(|binding| matches!(binding, Binding::Mouse(bound) if *bound == button))
    }

    fn uses_pointer(&self) -> bool {
        self.action.bindings.contains(&Binding::MouseDelta)
    }

    fn sample(&self, phase: ActionPhase, value: ActionValue) -> ActionSample {
        ActionSample {
            kind: self.action.kind,
            map: self.action.map,
            phase,
            value,
        }
    }
}

/// The object that owns device state and the action bindings
///
/// Exposed to consumers through the input service's escape hatch.
#[derive(Debug)]
pub struct DeviceBinding {
    actions: Vec<BoundAction>,
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    active: bool,
    listener_attached: bool,
}

impl DeviceBinding {
    /// Bind every resolved action; the binding starts active with no listener
    pub fn new(asset: &ResolvedAsset) -> Self {
        Self {
            actions: asset.actions.iter().cloned().map(BoundAction::new).collect(),
            keys_down: HashSet::new(),
            buttons_down: HashSet::new(),
            active: true,
            listener_attached: false,
        }
    }

    /// Whether the whole input surface is on
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Turn the whole input surface on
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Turn the whole input surface off
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Whether a sample listener is attached
    pub fn has_listener(&self) -> bool {
        self.listener_attached
    }

    pub(crate) fn attach_listener(&mut self) {
        self.listener_attached = true;
    }

    pub(crate) fn detach_listener(&mut self) {
        self.listener_attached = false;
    }

    /// Whether `key` is currently held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Names of the bound actions, in asset order
    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(|bound| bound.action.name.as_str())
    }

    /// Translate one device event into action samples
    ///
    /// Device state (held keys and buttons) is always tracked; only actions
    /// whose map passes `gate` change value and emit.
    pub fn translate(&mut self, event: &DeviceEvent, gate: MapGate) -> Vec<ActionSample> {
        let mut samples = Vec::new();
        match *event {
            DeviceEvent::Key { key, pressed } => {
                let changed = if pressed {
                    self.keys_down.insert(key)
                } else {
                    self.keys_down.remove(&key)
                };
                if !changed {
                    return samples;
                }
                for index in 0..self.actions.len() {
                    let bound = &self.actions[index];
                    if gate.allows(bound.action.map) && bound.uses_key(key) {
                        self.refresh(index, &mut samples);
                    }
                }
            }
            DeviceEvent::MouseButton { button, pressed } => {
                let changed = if pressed {
                    self.buttons_down.insert(button)
                } else {
                    self.buttons_down.remove(&button)
                };
                if !changed {
                    return samples;
                }
                for index in 0..self.actions.len() {
                    let bound = &self.actions[index];
                    if gate.allows(bound.action.map) && bound.uses_button(button) {
                        self.refresh(index, &mut samples);
                    }
                }
            }
            DeviceEvent::MouseMotion { delta_x, delta_y } => {
                let delta = Vec2::new(delta_x, delta_y);
                let pointer_actions = self
                    .actions
                    .iter_mut()
                    .filter(|bound| gate.allows(bound.action.map) && bound.uses_pointer());
                for bound in pointer_actions {
                    if !bound.pointer_dirty {
                        samples.push(bound.sample(ActionPhase::Started, ActionValue::Axis2(delta)));
                    }
                    bound.pointer_dirty = true;
                    bound.value = ActionValue::Axis2(delta);
                    samples.push(bound.sample(ActionPhase::Performed, bound.value));
                }
            }
        }
        samples
    }

    /// Return pointer-delta actions to rest at the end of a frame
    pub fn end_frame(&mut self) -> Vec<ActionSample> {
        let mut samples = Vec::new();
        for bound in self.actions.iter_mut().filter(|bound| bound.pointer_dirty) {
            bound.pointer_dirty = false;
            bound.value = ActionValue::Axis2(Vec2::zeros());
            samples.push(bound.sample(ActionPhase::Canceled, bound.value));
        }
        samples
    }

    /// Return every held or non-zero action of `role` to rest
    ///
    /// Emits one `Canceled` per action that was not already at rest. Keys that
    /// stay held do not re-trigger until their next edge.
    pub fn cancel_map(&mut self, role: MapRole) -> Vec<ActionSample> {
        let mut samples = Vec::new();
        for bound in self.actions.iter_mut().filter(|bound| bound.action.map == role) {
            let rest = BoundAction::rest(&bound.action);
            if bound.value == rest && !bound.pointer_dirty {
                continue;
            }
            bound.value = rest;
            bound.pointer_dirty = false;
            samples.push(bound.sample(ActionPhase::Canceled, rest));
        }
        samples
    }

    fn refresh(&mut self, index: usize, samples: &mut Vec<ActionSample>) {
        let next = self.evaluate(&self.actions[index]);
        let bound = &mut self.actions[index];
        let previous = bound.value;
        if next == previous {
            return;
        }
        bound.value = next;

        let was_active = previous.is_pressed();
        let is_active = next.is_pressed();
        if is_active && !was_active {
            samples.push(bound.sample(ActionPhase::Started, next));
            samples.push(bound.sample(ActionPhase::Performed, next));
        } else if is_active {
            // Composite moved between two non-zero values
            samples.push(bound.sample(ActionPhase::Performed, next));
        } else {
            samples.push(bound.sample(ActionPhase::Canceled, next));
        }
    }

    fn evaluate(&self, bound: &BoundAction) -> ActionValue {
        if bound.action.kind.is_axis() {
            let mut vector = Vec2::zeros();
            for binding in &bound.action.bindings {
                if let Binding::Composite2D { up, down, left, right } = binding {
                    vector.x += self.axis(*right, *left);
                    vector.y += self.axis(*up, *down);
                }
            }
            if vector.norm() > 1.0 {
                vector = vector.normalize();
            }
            ActionValue::Axis2(vector)
        } else {
            let pressed = bound.action.bindings.iter().any(|binding| match binding {
                Binding::Key(key) => self.keys_down.contains(key),
                Binding::Mouse(button) => self.buttons_down.contains(button),
                Binding::Composite2D { .. } | Binding::MouseDelta => false,
            });
            ActionValue::Button(pressed)
        }
    }

    fn axis(&self, positive: KeyCode, negative: KeyCode) -> f32 {
        let mut value = 0.0;
        if self.keys_down.contains(&positive) {
            value += 1.0;
        }
        if self.keys_down.contains(&negative) {
            value -= 1.0;
        }
        value
    }
}
