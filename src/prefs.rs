//! User preferences: a flat, versioned settings record stored as JSON.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::bindings::{default_bindings, NavigationAction, NavigationButtonBinding};
use crate::core::controller::{Key, MouseButton, Trigger};
use crate::core::pivot::BackfacePolicy;
use crate::core::wasd::MoveDirection;
use crate::error::{NavError, Result};

/// Newest settings layout this crate reads and writes
pub const PREFERENCES_VERSION: u32 = 1;

/// Quantity the alternate-modifier wheel adjusts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FovMode {
    #[default]
    FocalLength,
    HorizontalFov,
    VerticalFov,
}

/// Whether the activation trigger must be held or toggles the session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationMode {
    #[default]
    Hold,
    Toggle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub activation: Trigger,
    pub forward: Key,
    pub backward: Key,
    pub left: Key,
    pub right: Key,
    pub down: Key,
    pub up: Key,
    pub relocate_pivot: Key,
    pub reset_roll: Key,
    pub gear: Key,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            activation: Trigger::Key(Key::Space),
            forward: Key::Letter('W'),
            backward: Key::Letter('S'),
            left: Key::Letter('A'),
            right: Key::Letter('D'),
            down: Key::Letter('Q'),
            up: Key::Letter('E'),
            relocate_pivot: Key::Letter('C'),
            reset_roll: Key::Letter('R'),
            gear: Key::Letter('G'),
        }
    }
}

impl KeyBindings {
    pub fn direction_for(&self, key: Key) -> Option<MoveDirection> {
        [
            (self.forward, MoveDirection::Forward),
            (self.backward, MoveDirection::Backward),
            (self.left, MoveDirection::Left),
            (self.right, MoveDirection::Right),
            (self.down, MoveDirection::Down),
            (self.up, MoveDirection::Up),
        ]
        .into_iter()
        .find_map(|(bound, direction)| (bound == key).then_some(direction))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub version: u32,
    /// Distance travelled by a moderate mouse movement (1000 px over 20 frames)
    pub strafe_distance: f32,
    /// Exponent of the strafe curve; higher values damp slow movement more
    pub strafe_potential: f32,
    pub wasd_top_speed: f32,
    /// Seconds until top speed is reached
    pub wasd_accel_time: f32,
    pub wasd_normalize_diagonal: bool,
    /// Degrees of turn per pixel while looking around
    pub turn_sensitivity: f32,
    /// Turn sensitivity while a movement key is held
    pub wasd_turn_sensitivity: f32,
    pub rappel_sensitivity: f32,
    pub invert_mouse: bool,
    pub show_crosshair: bool,
    pub wheel_distance: f32,
    pub auto_relocate_pivot: bool,
    /// Pivot overshoot into the surface, percent of distance
    pub pivot_dig: f32,
    pub backface_policy: BackfacePolicy,
    pub faster_factor: f32,
    pub slower_factor: f32,
    pub alternate_factor: f32,
    pub gears: Vec<f32>,
    pub gear_wrap: bool,
    pub fov_mode: FovMode,
    pub activation_mode: ActivationMode,
    /// Keep the current focal length when recalling a camera state
    pub recall_keeps_lens: bool,
    /// Motion events dropped after each mouse button press
    pub ignored_motion_events: u32,
    pub button_bindings: Vec<NavigationButtonBinding>,
    pub keys: KeyBindings,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            version: PREFERENCES_VERSION,
            strafe_distance: 40.0,
            strafe_potential: 1.2,
            wasd_top_speed: 8.0,
            wasd_accel_time: 0.2,
            wasd_normalize_diagonal: false,
            turn_sensitivity: 0.25,
            wasd_turn_sensitivity: 0.15,
            rappel_sensitivity: 0.15,
            invert_mouse: true,
            show_crosshair: true,
            wheel_distance: 0.5,
            auto_relocate_pivot: false,
            pivot_dig: 5.0,
            backface_policy: BackfacePolicy::WhenCulling,
            faster_factor: 5.0,
            slower_factor: 0.2,
            alternate_factor: 0.5,
            gears: vec![0.25, 1.0, 4.0, 16.0],
            gear_wrap: false,
            fov_mode: FovMode::FocalLength,
            activation_mode: ActivationMode::Hold,
            recall_keeps_lens: false,
            ignored_motion_events: 0,
            button_bindings: default_bindings(),
            keys: KeyBindings::default(),
        }
    }
}

/// Scalar settings renamed from the legacy camelCase layout
const LEGACY_FIELDS: [(&str, &str); 12] = [
    ("strafingDistance", "strafe_distance"),
    ("strafingPotential", "strafe_potential"),
    ("wasdTopSpeed", "wasd_top_speed"),
    ("wasdTime", "wasd_accel_time"),
    ("sensitivityDefault", "turn_sensitivity"),
    ("sensitivityWasd", "wasd_turn_sensitivity"),
    ("sensitivityRappel", "rappel_sensitivity"),
    ("invertMouse", "invert_mouse"),
    ("showCrosshair", "show_crosshair"),
    ("wheelDistance", "wheel_distance"),
    ("adjustPivot", "auto_relocate_pivot"),
    ("pivotDig", "pivot_dig"),
];

/// Per-combination action settings of the legacy layout, in resolution order
const LEGACY_ACTIONS: [(&str, MouseButton, Option<MouseButton>); 4] = [
    ("lmbAction", MouseButton::Lmb, None),
    ("rmbAction", MouseButton::Rmb, None),
    ("bmbAction", MouseButton::Lmb, Some(MouseButton::Rmb)),
    ("mmbAction", MouseButton::Mmb, None),
];

/// Rewrite a legacy (unversioned) document into the current layout
fn migrate_legacy(legacy: Map<String, Value>) -> Result<Map<String, Value>> {
    let mut current = Map::new();
    for (old, new) in LEGACY_FIELDS {
        if let Some(value) = legacy.get(old) {
            current.insert(new.to_string(), value.clone());
        }
    }

    if LEGACY_ACTIONS.iter().any(|(name, _, _)| legacy.contains_key(*name)) {
        let defaults = default_bindings();
        let mut bindings = Vec::with_capacity(LEGACY_ACTIONS.len());
        for ((name, button1, button2), fallback) in LEGACY_ACTIONS.into_iter().zip(defaults) {
            let action = match legacy.get(name) {
                Some(value) => serde_json::from_value::<NavigationAction>(value.clone())?,
                None => fallback.action,
            };
            bindings.push(NavigationButtonBinding {
                button1,
                button2,
                action,
            });
        }
        current.insert("button_bindings".to_string(), serde_json::to_value(bindings)?);
    }

    current.insert("version".to_string(), Value::from(PREFERENCES_VERSION));
    Ok(current)
}

impl Preferences {
    /// Parse a settings document of any known version
    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        let document = match document {
            Value::Object(map) => match map.get("version").and_then(Value::as_u64) {
                None => {
                    debug!("migrating legacy preferences layout");
                    Value::Object(migrate_legacy(map)?)
                }
                Some(found) if found > PREFERENCES_VERSION as u64 => {
                    return Err(NavError::UnsupportedVersion {
                        found: found.min(u32::MAX as u64) as u32,
                        supported: PREFERENCES_VERSION,
                    });
                }
                Some(_) => Value::Object(map),
            },
            other => other,
        };
        let prefs: Preferences = serde_json::from_value(document)?;
        Ok(prefs.validated())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let prefs = Self::from_json(&text)?;
        info!("loaded preferences from {}", path.display());
        Ok(prefs)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Clamp every value into its supported range
    pub fn validated(mut self) -> Self {
        self.version = PREFERENCES_VERSION;
        self.strafe_distance = self.strafe_distance.clamp(0.1, 5000.0);
        self.strafe_potential = self.strafe_potential.clamp(1.0, 2.0);
        self.wasd_top_speed = self.wasd_top_speed.clamp(0.001, 20000.0);
        self.wasd_accel_time = self.wasd_accel_time.clamp(0.0, 4.0);
        self.turn_sensitivity = self.turn_sensitivity.clamp(0.0, 2.0);
        self.wasd_turn_sensitivity = self.wasd_turn_sensitivity.clamp(0.0, 2.0);
        self.rappel_sensitivity = self.rappel_sensitivity.clamp(0.0, 2.0);
        self.wheel_distance = self.wheel_distance.clamp(-128.0, 128.0);
        self.pivot_dig = self.pivot_dig.clamp(0.0, 100.0);
        self.faster_factor = self.faster_factor.clamp(1.0, 100.0);
        self.slower_factor = self.slower_factor.clamp(0.001, 1.0);
        self.alternate_factor = self.alternate_factor.clamp(0.001, 1.0);
        self.gears.retain(|g| g.is_finite() && *g >= 0.0);
        self
    }

    /// Turn sensitivity in radians per pixel
    pub fn turn_rate(sensitivity: f32) -> f32 {
        sensitivity.to_radians()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_json() {
        let prefs = Preferences::default();
        let parsed = Preferences::from_json(&prefs.to_json().unwrap()).unwrap();
        assert_eq!(parsed, prefs);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let prefs = Preferences::from_json(r#"{"version":1,"wheel_distance":2.0}"#).unwrap();
        assert_eq!(prefs.wheel_distance, 2.0);
        assert_eq!(prefs.strafe_distance, 40.0);
        assert_eq!(prefs.keys.activation, Trigger::Key(Key::Space));
    }

    #[test]
    fn test_legacy_layout_is_migrated() {
        let legacy = r#"{
            "strafingDistance": 80.0,
            "invertMouse": false,
            "adjustPivot": true,
            "bmbAction": "strafeXY",
            "mmbAction": "turnXRappel"
        }"#;
        let prefs = Preferences::from_json(legacy).unwrap();
        assert_eq!(prefs.version, PREFERENCES_VERSION);
        assert_eq!(prefs.strafe_distance, 80.0);
        assert!(!prefs.invert_mouse);
        assert!(prefs.auto_relocate_pivot);
        assert_eq!(prefs.button_bindings[0].action, NavigationAction::TurnXY);
        assert_eq!(prefs.button_bindings[2].button2, Some(MouseButton::Rmb));
        assert_eq!(prefs.button_bindings[2].action, NavigationAction::StrafeXY);
        assert_eq!(prefs.button_bindings[3].action, NavigationAction::TurnXRappel);
    }

    #[test]
    fn test_newer_version_rejected() {
        let err = Preferences::from_json(r#"{"version":7}"#).unwrap_err();
        assert!(matches!(err, NavError::UnsupportedVersion { found: 7, .. }));
    }

    #[test]
    fn test_values_are_clamped() {
        let prefs = Preferences::from_json(
            r#"{"version":1,"strafe_potential":9.0,"pivot_dig":-3.0,"gears":[1.0,-2.0,4.0]}"#,
        )
        .unwrap();
        assert_eq!(prefs.strafe_potential, 2.0);
        assert_eq!(prefs.pivot_dig, 0.0);
        assert_eq!(prefs.gears, vec![1.0, 4.0]);
    }

    #[test]
    fn test_movement_keys_resolve() {
        let keys = KeyBindings::default();
        assert_eq!(keys.direction_for(Key::Letter('Q')), Some(MoveDirection::Down));
        assert_eq!(keys.direction_for(Key::Letter('C')), None);
    }
}
