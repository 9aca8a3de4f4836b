use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::controller::{ButtonSet, MouseButton};
use crate::math::{forward_dir, pan, roll, translate};

/// What mouse motion does while a button combination is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NavigationAction {
    /// Look around
    TurnXY,
    /// Strafe left/right and forward/backward
    StrafeXZ,
    /// Strafe left/right and up/down
    StrafeXY,
    /// Strafe left/right and rappel along world Z
    StrafeXRappel,
    /// Turn left/right and rappel along world Z
    TurnXRappel,
    /// Roll about the view direction
    Roll,
}

/// Mouse motion already converted to radians and world units
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ActionInput {
    /// x = yaw, y = pitch (radians)
    pub turn: Vec2,
    /// x = rightwards, y = upwards (world units, after the sensitivity curve)
    pub strafe: Vec2,
    /// Yaw used while rappelling (radians)
    pub rappel_turn: f32,
    pub roll: f32,
}

/// Pose change produced by one action step
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseDelta {
    pub yaw: f32,
    pub pitch: f32,
    pub roll: f32,
    /// Translation in view space
    pub local: Vec3,
    /// Translation in world space
    pub global: Vec3,
}

impl PoseDelta {
    pub fn is_identity(&self) -> bool {
        self.yaw == 0.0
            && self.pitch == 0.0
            && self.roll == 0.0
            && self.local == Vec3::ZERO
            && self.global == Vec3::ZERO
    }

    /// Translate first using the current orientation, then roll, then turn
    pub fn apply(&self, position: Vec3, orientation: Quat) -> (Vec3, Quat) {
        let position = translate(position, orientation, self.local, self.global);
        let orientation = roll(orientation, forward_dir(orientation), self.roll);
        (position, pan(orientation, self.yaw, self.pitch))
    }
}

impl NavigationAction {
    /// True for actions driven by the turn sensitivity rather than the strafe curve
    pub fn turns(self) -> bool {
        matches!(
            self,
            NavigationAction::TurnXY | NavigationAction::TurnXRappel | NavigationAction::Roll
        )
    }

    pub fn pose_delta(self, input: &ActionInput) -> PoseDelta {
        let s = input.strafe;
        match self {
            NavigationAction::TurnXY => PoseDelta {
                yaw: input.turn.x,
                pitch: input.turn.y,
                ..PoseDelta::default()
            },
            NavigationAction::StrafeXZ => PoseDelta {
                local: Vec3::new(s.x, 0.0, -s.y),
                ..PoseDelta::default()
            },
            NavigationAction::StrafeXY => PoseDelta {
                local: Vec3::new(s.x, s.y, 0.0),
                ..PoseDelta::default()
            },
            NavigationAction::StrafeXRappel => PoseDelta {
                local: Vec3::new(s.x, 0.0, 0.0),
                global: Vec3::new(0.0, 0.0, s.y),
                ..PoseDelta::default()
            },
            NavigationAction::TurnXRappel => PoseDelta {
                yaw: input.rappel_turn,
                global: Vec3::new(0.0, 0.0, s.y),
                ..PoseDelta::default()
            },
            NavigationAction::Roll => PoseDelta {
                roll: input.roll,
                ..PoseDelta::default()
            },
        }
    }
}

/// One entry of the ordered button-combination table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationButtonBinding {
    pub button1: MouseButton,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub button2: Option<MouseButton>,
    pub action: NavigationAction,
}

impl NavigationButtonBinding {
    pub fn single(button: MouseButton, action: NavigationAction) -> Self {
        Self {
            button1: button,
            button2: None,
            action,
        }
    }

    pub fn chord(button1: MouseButton, button2: MouseButton, action: NavigationAction) -> Self {
        Self {
            button1,
            button2: Some(button2),
            action,
        }
    }

    /// The pressed set must be exactly this binding's one or two buttons
    pub fn matches(&self, pressed: ButtonSet) -> bool {
        let wanted = match self.button2 {
            Some(second) => ButtonSet::pair(self.button1, second),
            None => ButtonSet::single(self.button1),
        };
        matches!(pressed.len(), 1 | 2) && pressed == wanted
    }
}

/// First binding matching the pressed set wins
pub fn resolve_action(
    bindings: &[NavigationButtonBinding],
    pressed: ButtonSet,
) -> Option<NavigationAction> {
    bindings
        .iter()
        .find(|binding| binding.matches(pressed))
        .map(|binding| binding.action)
}

pub fn default_bindings() -> Vec<NavigationButtonBinding> {
    use MouseButton::*;
    vec![
        NavigationButtonBinding::single(Lmb, NavigationAction::TurnXY),
        NavigationButtonBinding::single(Rmb, NavigationAction::StrafeXY),
        NavigationButtonBinding::chord(Lmb, Rmb, NavigationAction::StrafeXZ),
        NavigationButtonBinding::single(Mmb, NavigationAction::StrafeXRappel),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use MouseButton::*;

    fn table() -> Vec<NavigationButtonBinding> {
        vec![
            NavigationButtonBinding::single(Lmb, NavigationAction::TurnXY),
            NavigationButtonBinding::single(Rmb, NavigationAction::StrafeXY),
            NavigationButtonBinding::chord(Lmb, Rmb, NavigationAction::StrafeXZ),
        ]
    }

    #[test]
    fn test_resolves_exact_combinations() {
        let bindings = table();
        assert_eq!(
            resolve_action(&bindings, ButtonSet::single(Lmb)),
            Some(NavigationAction::TurnXY)
        );
        assert_eq!(
            resolve_action(&bindings, ButtonSet::single(Rmb)),
            Some(NavigationAction::StrafeXY)
        );
        assert_eq!(
            resolve_action(&bindings, ButtonSet::pair(Rmb, Lmb)),
            Some(NavigationAction::StrafeXZ)
        );
        assert_eq!(resolve_action(&bindings, ButtonSet::single(Mmb)), None);
    }

    #[test]
    fn test_three_buttons_resolve_to_nothing() {
        let pressed: ButtonSet = [Lmb, Rmb, Mmb].into_iter().collect();
        assert_eq!(resolve_action(&table(), pressed), None);
        assert_eq!(resolve_action(&table(), ButtonSet::EMPTY), None);
    }

    #[test]
    fn test_same_button_twice_is_single() {
        let binding = NavigationButtonBinding::chord(Mb4, Mb4, NavigationAction::Roll);
        assert!(binding.matches(ButtonSet::single(Mb4)));
    }

    #[test]
    fn test_first_match_wins() {
        let bindings = vec![
            NavigationButtonBinding::single(Lmb, NavigationAction::Roll),
            NavigationButtonBinding::single(Lmb, NavigationAction::TurnXY),
        ];
        assert_eq!(
            resolve_action(&bindings, ButtonSet::single(Lmb)),
            Some(NavigationAction::Roll)
        );
    }

    #[test]
    fn test_strafe_xz_moves_forward_on_mouse_up() {
        let input = ActionInput {
            strafe: Vec2::new(0.0, 2.0),
            ..ActionInput::default()
        };
        let delta = NavigationAction::StrafeXZ.pose_delta(&input);
        assert_eq!(delta.local, Vec3::new(0.0, 0.0, -2.0));
        let (position, orientation) = delta.apply(Vec3::ZERO, Quat::IDENTITY);
        assert!(position.abs_diff_eq(Vec3::new(0.0, 0.0, -2.0), 1e-6));
        assert_eq!(orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_rappel_is_world_vertical() {
        let input = ActionInput {
            strafe: Vec2::new(1.0, 3.0),
            rappel_turn: 0.1,
            ..ActionInput::default()
        };
        let tilted = Quat::from_rotation_x(1.0);
        let delta = NavigationAction::TurnXRappel.pose_delta(&input);
        let (position, _) = delta.apply(Vec3::ZERO, tilted);
        assert!(position.abs_diff_eq(Vec3::new(0.0, 0.0, 3.0), 1e-6));
        assert_eq!(delta.yaw, 0.1);
    }

    #[test]
    fn test_action_names_are_camel_case() {
        let json = serde_json::to_string(&NavigationAction::StrafeXRappel).unwrap();
        assert_eq!(json, "\"strafeXRappel\"");
        let binding: NavigationButtonBinding =
            serde_json::from_str(r#"{"button1":"lmb","action":"turnXY"}"#).unwrap();
        assert_eq!(binding, NavigationButtonBinding::single(Lmb, NavigationAction::TurnXY));
    }
}
