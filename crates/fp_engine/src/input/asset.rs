//! Action binding asset
//!
//! The static document that groups actions into named maps and lists the
//! device controls bound to each action. Loaded once at startup.

use super::action::{ActionKind, MapRole};
use super::{InputError, KeyCode, MouseButton};
use crate::config::Config;
use serde::{Deserialize, Serialize};

/// A device control an action listens to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    /// Single keyboard key
    Key(KeyCode),
    /// Single mouse button
    Mouse(MouseButton),
    /// Four keys combined into a 2D vector
    Composite2D {
        /// +Y key
        up: KeyCode,
        /// -Y key
        down: KeyCode,
        /// -X key
        left: KeyCode,
        /// +X key
        right: KeyCode,
    },
    /// Relative pointer motion
    MouseDelta,
}

impl Binding {
    /// Whether the binding produces a 2D value
    pub const fn is_axis(&self) -> bool {
        matches!(self, Binding::Composite2D { .. } | Binding::MouseDelta)
    }
}

/// One action as written in the asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionDef {
    /// Action name ("Move", "Jump", ...)
    pub name: String,
    /// Controls bound to the action
    #[serde(default)]
    pub bindings: Vec<Binding>,
}

/// One named action map as written in the asset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionMapDef {
    /// Map name ("Player", "UI", ...)
    pub name: String,
    /// Actions in the map
    #[serde(default)]
    pub actions: Vec<ActionDef>,
}

/// The whole binding asset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputActionAsset {
    /// Every action map in the asset
    #[serde(default)]
    pub maps: Vec<ActionMapDef>,
}

impl Config for InputActionAsset {}

/// An action after name resolution, ready for the device binding
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAction {
    /// Routed action
    pub kind: ActionKind,
    /// Map the action belongs to
    pub map: MapRole,
    /// Name as written in the asset
    pub name: String,
    /// Bindings compatible with the action's value type
    pub bindings: Vec<Binding>,
}

/// Result of resolving an asset against the actions the service routes
#[derive(Debug, Clone, Default)]
pub struct ResolvedAsset {
    /// Routed actions in asset order
    pub actions: Vec<ResolvedAction>,
    /// Maps present in the asset that the service manages
    pub maps: Vec<MapRole>,
}

impl ResolvedAsset {
    /// Whether the asset defined a map for `role`
    pub fn has_map(&self, role: MapRole) -> bool {
        self.maps.contains(&role)
    }

    /// Resolved actions with the given asset name, across maps
    pub fn find(&self, name: &str) -> impl Iterator<Item = &ResolvedAction> {
        let name = name.to_owned();
        self.actions.iter().filter(move |action| action.name == name)
    }
}

impl InputActionAsset {
    /// Resolve action names to [`ActionKind`] and check the required maps exist
    ///
    /// The gameplay map is required; a missing UI map is only a warning.
    /// Unknown map or action names are skipped.
    pub fn resolve(&self) -> Result<ResolvedAsset, InputError> {
        let mut resolved = ResolvedAsset::default();

        for map_def in &self.maps {
            let Some(role) = MapRole::from_asset_name(&map_def.name) else {
                log::debug!("[InputActionAsset] Ignoring unmanaged map '{}'", map_def.name);
                continue;
            };
            if resolved.has_map(role) {
                return Err(InputError::DuplicateMap(map_def.name.clone()));
            }
            resolved.maps.push(role);

            for action in &map_def.actions {
                let Some(kind) = ActionKind::from_action_name(&action.name) else {
                    log::debug!(
                        "[InputActionAsset] Action '{}/{}' is not routed",
                        map_def.name,
                        action.name
                    );
                    continue;
                };

                let (bindings, rejected): (Vec<_>, Vec<_>) = action
                    .bindings
                    .iter()
                    .cloned()
                    .partition(|binding| binding.is_axis() == kind.is_axis());
                for binding in rejected {
                    log::warn!(
                        "[InputActionAsset] Binding {:?} does not fit action '{}/{}'",
                        binding,
                        map_def.name,
                        action.name
                    );
                }

                resolved.actions.push(ResolvedAction {
                    kind,
                    map: role,
                    name: action.name.clone(),
                    bindings,
                });
            }
        }

        if !resolved.has_map(MapRole::Gameplay) {
            return Err(InputError::MissingMap(MapRole::Gameplay.asset_name().to_string()));
        }
        if !resolved.has_map(MapRole::Ui) {
            log::warn!("[InputActionAsset] '{}' action map not found", MapRole::Ui.asset_name());
        }

        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigFormat;

    const ASSET: &str = r#"(
        maps: [
            (
                name: "Player",
                actions: [
                    (name: "Move", bindings: [Composite2D(up: W, down: S, left: A, right: D)]),
                    (name: "Jump", bindings: [Key(Space), MouseDelta]),
                    (name: "Sprint", bindings: [Key(LeftShift)]),
                    (name: "Crouch", bindings: [Key(C)]),
                ],
            ),
            (
                name: "UI",
                actions: [(name: "Menu", bindings: [Key(Escape)])],
            ),
        ],
    )"#;

    #[test]
    fn test_resolve_routes_known_actions() {
        let asset = InputActionAsset::from_str_as(ASSET, ConfigFormat::Ron).unwrap();
        let resolved = asset.resolve().unwrap();

        let kinds: Vec<_> = resolved.actions.iter().map(|a| (a.map, a.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (MapRole::Gameplay, ActionKind::Move),
                (MapRole::Gameplay, ActionKind::Jump),
                (MapRole::Gameplay, ActionKind::Run),
                (MapRole::Ui, ActionKind::Menu),
            ]
        );
        assert!(resolved.find("Crouch").next().is_none());
    }

    #[test]
    fn test_incompatible_bindings_are_dropped() {
        let asset = InputActionAsset::from_str_as(ASSET, ConfigFormat::Ron).unwrap();
        let resolved = asset.resolve().unwrap();
        let jump = resolved.find("Jump").next().unwrap();
        assert_eq!(jump.bindings, vec![Binding::Key(KeyCode::Space)]);
    }

    #[test]
    fn test_missing_gameplay_map_is_an_error() {
        let asset = InputActionAsset {
            maps: vec![ActionMapDef { name: "UI".to_string(), actions: Vec::new() }],
        };
        assert!(matches!(asset.resolve(), Err(InputError::MissingMap(name)) if name == "Player"));
    }

    #[test]
    fn test_missing_ui_map_is_tolerated() {
        let asset = InputActionAsset {
            maps: vec![ActionMapDef { name: "Player".to_string(), actions: Vec::new() }],
        };
        let resolved = asset.resolve().unwrap();
        assert!(resolved.has_map(MapRole::Gameplay));
        assert!(!resolved.has_map(MapRole::Ui));
    }

    #[test]
    fn test_duplicate_map_rejected() {
        let map = ActionMapDef { name: "Player".to_string(), actions: Vec::new() };
        let asset = InputActionAsset { maps: vec![map.clone(), map] };
        assert!(matches!(asset.resolve(), Err(InputError::DuplicateMap(_))));
    }
}
