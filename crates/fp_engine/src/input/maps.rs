//! Action-map store
//!
//! Holds the gameplay and UI maps and their enabled flags. Either map may be
//! absent when the asset did not define it; operations on an absent map are
//! no-ops.

use super::action::MapRole;
use std::cell::Cell;

/// A named, independently enable-able group of bindings
#[derive(Debug)]
pub struct ActionMap {
    name: String,
    enabled: Cell<bool>,
}

impl ActionMap {
    /// Create a disabled map
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: Cell::new(false),
        }
    }

    /// Map name as written in the asset
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the map currently routes input
    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    /// Enable the map
    pub fn enable(&self) {
        self.enabled.set(true);
    }

    /// Disable the map
    pub fn disable(&self) {
        self.enabled.set(false);
    }
}

/// Which maps were enabled at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MapGate {
    /// Gameplay map enabled
    pub gameplay: bool,
    /// UI map enabled
    pub ui: bool,
}

impl MapGate {
    /// Whether samples from `role` pass the gate
    pub fn allows(self, role: MapRole) -> bool {
        match role {
            MapRole::Gameplay => self.gameplay,
            MapRole::Ui => self.ui,
        }
    }
}

/// The two maps the service manages
#[derive(Debug, Default)]
pub struct ActionMapStore {
    gameplay: Option<ActionMap>,
    ui: Option<ActionMap>,
}

impl ActionMapStore {
    /// Store with the given maps present, all disabled
    pub fn with_maps(roles: &[MapRole]) -> Self {
        let mut store = Self::default();
        for role in roles {
            let map = Some(ActionMap::new(role.asset_name()));
            match role {
                MapRole::Gameplay => store.gameplay = map,
                MapRole::Ui => store.ui = map,
            }
        }
        store
    }

    /// The map for `role`, if the asset defined one
    pub fn map(&self, role: MapRole) -> Option<&ActionMap> {
        match role {
            MapRole::Gameplay => self.gameplay.as_ref(),
            MapRole::Ui => self.ui.as_ref(),
        }
    }

    /// Whether `role` exists and is enabled
    pub fn is_enabled(&self, role: MapRole) -> bool {
        self.map(role).is_some_and(ActionMap::is_enabled)
    }

    /// Enable `role` if present
    pub fn enable(&self, role: MapRole) {
        if let Some(map) = self.map(role) {
            map.enable();
        }
    }

    /// Disable `role` if present
    pub fn disable(&self, role: MapRole) {
        if let Some(map) = self.map(role) {
            map.disable();
        }
    }

    /// Capture the enabled flags of both maps
    pub fn gate(&self) -> MapGate {
        MapGate {
            gameplay: self.is_enabled(MapRole::Gameplay),
            ui: self.is_enabled(MapRole::Ui),
        }
    }
}
