//! Per-file navigation memory: camera-state slots and a few per-scene overrides.

use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::core::state_store::CameraStateStore;
use crate::error::{NavError, Result};
use crate::prefs::Preferences;

pub const SCENE_STATE_VERSION: u32 = 2;

/// Strafe sensitivity a scene starts with before it is first adjusted
const DEFAULT_SCENE_STRAFE_SENSITIVITY: f32 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneState {
    pub version: u32,
    pub camera_states: CameraStateStore,
    /// Read and adjusted instead of the preference while `use_scene_strafe_sensitivity` is set
    pub strafe_sensitivity: f32,
    pub use_scene_strafe_sensitivity: bool,
    pub gear: f32,
    /// Auto pivot relocation for this scene; the preference applies when unset
    pub auto_pivot: Option<bool>,
}

impl Default for SceneState {
    fn default() -> Self {
        Self {
            version: SCENE_STATE_VERSION,
            camera_states: CameraStateStore::new(),
            strafe_sensitivity: DEFAULT_SCENE_STRAFE_SENSITIVITY,
            use_scene_strafe_sensitivity: false,
            gear: 1.0,
            auto_pivot: None,
        }
    }
}

/// Version 1 stored the scene sensitivity as an optional override
fn migrate_v1(mut document: Map<String, Value>) -> Map<String, Value> {
    match document.remove("strafe_sensitivity") {
        Some(Value::Number(value)) => {
            document.insert("strafe_sensitivity".to_string(), Value::Number(value));
            document.insert("use_scene_strafe_sensitivity".to_string(), Value::Bool(true));
        }
        _ => {
            document.insert("use_scene_strafe_sensitivity".to_string(), Value::Bool(false));
        }
    }
    document.insert("version".to_string(), Value::from(SCENE_STATE_VERSION));
    document
}

impl SceneState {
    /// Live strafe sensitivity: this scene's value when it keeps its own, else the preference
    pub fn strafe_sensitivity(&self, prefs: &Preferences) -> f32 {
        if self.use_scene_strafe_sensitivity {
            self.strafe_sensitivity
        } else {
            prefs.strafe_distance
        }
    }

    /// Store an adjusted strafe sensitivity wherever [`Self::strafe_sensitivity`] reads it from
    pub fn set_strafe_sensitivity(&mut self, prefs: &mut Preferences, value: f32) {
        if self.use_scene_strafe_sensitivity {
            self.strafe_sensitivity = value;
        } else {
            prefs.strafe_distance = value;
        }
    }

    pub fn auto_pivot(&self, prefs: &Preferences) -> bool {
        self.auto_pivot.unwrap_or(prefs.auto_relocate_pivot)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(text)?;
        let document = match document {
            Value::Object(map) => match map.get("version").and_then(Value::as_u64) {
                Some(found) if found > SCENE_STATE_VERSION as u64 => {
                    return Err(NavError::UnsupportedVersion {
                        found: found.min(u32::MAX as u64) as u32,
                        supported: SCENE_STATE_VERSION,
                    });
                }
                None | Some(1) => {
                    debug!("migrating scene state from version 1");
                    Value::Object(migrate_v1(map))
                }
                Some(_) => Value::Object(map),
            },
            other => other,
        };

        let mut state: SceneState = serde_json::from_value(document)?;
        state.version = SCENE_STATE_VERSION;
        // Pending timestamps belong to the process that wrote them
        state.camera_states.commit_pending();
        if !state.gear.is_finite() || state.gear <= 0.0 {
            state.gear = 1.0;
        }
        if !state.strafe_sensitivity.is_finite() {
            state.strafe_sensitivity = DEFAULT_SCENE_STRAFE_SENSITIVITY;
        }
        state.strafe_sensitivity = state.strafe_sensitivity.clamp(0.1, 5000.0);
        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let state = Self::from_json(&text)?;
        info!("loaded scene state from {}", path.display());
        Ok(state)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.to_json()?).map_err(|source| NavError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::CameraPose;

    #[test]
    fn test_pending_candidate_committed_on_load() {
        let mut state = SceneState::default();
        state
            .camera_states
            .begin_candidate(5, CameraPose::default(), 100.0)
            .unwrap();
        let loaded = SceneState::from_json(&state.to_json().unwrap()).unwrap();
        assert!(loaded.camera_states.is_used(5));
        assert!(loaded.camera_states.imminent().is_none());
    }

    #[test]
    fn test_overrides_fall_back_to_preferences() {
        let prefs = Preferences {
            strafe_distance: 60.0,
            ..Preferences::default()
        };
        let mut state = SceneState::default();
        assert_eq!(state.strafe_sensitivity(&prefs), 60.0);
        assert!(!state.auto_pivot(&prefs));
        state.strafe_sensitivity = 12.5;
        state.use_scene_strafe_sensitivity = true;
        state.auto_pivot = Some(true);
        assert_eq!(state.strafe_sensitivity(&prefs), 12.5);
        assert!(state.auto_pivot(&prefs));
    }

    #[test]
    fn test_adjustment_lands_where_it_is_read() {
        let mut prefs = Preferences::default();
        let mut state = SceneState::default();
        state.set_strafe_sensitivity(&mut prefs, 50.0);
        assert_eq!(prefs.strafe_distance, 50.0);
        assert_eq!(state.strafe_sensitivity, 40.0);

        state.use_scene_strafe_sensitivity = true;
        state.set_strafe_sensitivity(&mut prefs, 7.0);
        assert_eq!(state.strafe_sensitivity(&prefs), 7.0);
        assert_eq!(prefs.strafe_distance, 50.0);
    }

    #[test]
    fn test_version_one_override_migrates_to_scene_value() {
        let state = SceneState::from_json(r#"{"version":1,"strafe_sensitivity":12.5}"#).unwrap();
        assert!(state.use_scene_strafe_sensitivity);
        assert_eq!(state.strafe_sensitivity, 12.5);
        assert_eq!(state.version, SCENE_STATE_VERSION);

        let state = SceneState::from_json(r#"{"version":1,"strafe_sensitivity":null}"#).unwrap();
        assert!(!state.use_scene_strafe_sensitivity);
        assert_eq!(state.strafe_sensitivity, 40.0);
    }

    #[test]
    fn test_bad_gear_reset() {
        let state = SceneState::from_json(r#"{"gear":0.0}"#).unwrap();
        assert_eq!(state.gear, 1.0);
    }
}
