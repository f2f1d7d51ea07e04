//! Typed input actions
//!
//! Action names from the binding asset are resolved to [`ActionKind`] once, when
//! the asset is loaded. Nothing downstream of that point dispatches on strings.

use crate::foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// The two action maps the service manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapRole {
    /// First-person gameplay map (named "Player" in the asset)
    Gameplay,
    /// Menu/UI navigation map (named "UI" in the asset)
    Ui,
}

impl MapRole {
    /// Name of the map in the binding asset
    pub const fn asset_name(self) -> &'static str {
        match self {
            MapRole::Gameplay => "Player",
            MapRole::Ui => "UI",
        }
    }

    /// Role for a map name from the asset, if it is one we manage
    pub fn from_asset_name(name: &str) -> Option<Self> {
        match name {
            "Player" => Some(MapRole::Gameplay),
            "UI" => Some(MapRole::Ui),
            _ => None,
        }
    }
}

/// Actions the service knows how to route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Continuous 2D movement
    Move,
    /// Continuous 2D look delta
    Look,
    /// Jump button
    Jump,
    /// Run/sprint button
    Run,
    /// Menu/pause button
    Menu,
    /// Interact button
    Interact,
}

impl ActionKind {
    /// Resolve an asset action name, including aliases
    ///
    /// Returns `None` for names the service does not route.
    pub fn from_action_name(name: &str) -> Option<Self> {
        match name {
            "Move" => Some(ActionKind::Move),
            "Look" => Some(ActionKind::Look),
            "Jump" => Some(ActionKind::Jump),
            "Run" | "Sprint" => Some(ActionKind::Run),
            "Menu" | "Pause" => Some(ActionKind::Menu),
            "Interact" => Some(ActionKind::Interact),
            _ => None,
        }
    }

    /// Whether this action carries a 2D value rather than a button state
    pub const fn is_axis(self) -> bool {
        matches!(self, ActionKind::Move | ActionKind::Look)
    }
}

/// Phase of an action callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionPhase {
    /// Input began (button went down, stick left dead zone)
    Started,
    /// Action completed its interaction; value is current
    Performed,
    /// Input ended (button released, stick returned to rest)
    Canceled,
}

/// Value carried by an action sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionValue {
    /// Button state
    Button(bool),
    /// 2D axis value
    Axis2(Vec2),
}

impl ActionValue {
    /// Read as a 2D vector; buttons read as zero
    pub fn axis(self) -> Vec2 {
        match self {
            ActionValue::Axis2(v) => v,
            ActionValue::Button(_) => Vec2::zeros(),
        }
    }

    /// Read as a button; axes read as pressed when non-zero
    pub fn is_pressed(self) -> bool {
        match self {
            ActionValue::Button(pressed) => pressed,
            ActionValue::Axis2(v) => v != Vec2::zeros(),
        }
    }
}

/// One action callback produced by the device binding
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionSample {
    /// Which action fired
    pub kind: ActionKind,
    /// Map the action belongs to
    pub map: MapRole,
    /// Callback phase
    pub phase: ActionPhase,
    /// Current value
    pub value: ActionValue,
}

impl ActionSample {
    /// Button sample in the gameplay map
    pub fn button(kind: ActionKind, phase: ActionPhase) -> Self {
        Self {
            kind,
            map: MapRole::Gameplay,
            phase,
            value: ActionValue::Button(phase != ActionPhase::Canceled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_resolve() {
        assert_eq!(ActionKind::from_action_name("Sprint"), Some(ActionKind::Run));
        assert_eq!(ActionKind::from_action_name("Pause"), Some(ActionKind::Menu));
        assert_eq!(ActionKind::from_action_name("Crouch"), None);
        // Names are case-sensitive, as in the asset
        assert_eq!(ActionKind::from_action_name("jump"), None);
    }

    #[test]
    fn test_map_names_round_trip() {
        for role in [MapRole::Gameplay, MapRole::Ui] {
            assert_eq!(MapRole::from_asset_name(role.asset_name()), Some(role));
        }
        assert_eq!(MapRole::from_asset_name("Vehicle"), None);
    }

    #[test]
    fn test_button_sample_value_follows_phase() {
        let pressed = ActionSample::button(ActionKind::Jump, ActionPhase::Performed);
        let released = ActionSample::button(ActionKind::Jump, ActionPhase::Canceled);
        assert!(pressed.value.is_pressed());
        assert!(!released.value.is_pressed());
        assert_eq!(released.value.axis(), Vec2::zeros());
    }
}
