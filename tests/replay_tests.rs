use glam::Vec3;
use mouse_strafing::core::{InputKind, Key, Modifiers, MouseButton, WheelDirection};
use mouse_strafing::math::AABB;
use mouse_strafing::prefs::Preferences;
use mouse_strafing::replay::{run_replay, ReplayScript, ReplayStep, ScriptView};
use mouse_strafing::SceneState;
use tempfile::tempdir;

fn step(at: f64, event: InputKind) -> ReplayStep {
    ReplayStep {
        at,
        event,
        modifiers: Modifiers::NONE,
    }
}

#[cfg(test)]
mod replay_tests {
    use super::*;

    #[test]
    fn test_idle_script_changes_nothing() {
        let script = ReplayScript {
            steps: vec![step(0.0, InputKind::KeyDown { key: Key::Letter('W') })],
            ..ReplayScript::default()
        };
        let report = run_replay(&script, Preferences::default(), SceneState::default()).unwrap();
        assert_eq!(report.sessions, 0);
        assert_eq!(report.pose_changes, 0);
        assert_eq!(report.ticks, 0);
        assert!(report.final_pose.position.abs_diff_eq(Vec3::new(0.0, -10.0, 2.0), 1e-5));
    }

    #[test]
    fn test_strafe_and_wheel_session() {
        let script = ReplayScript {
            steps: vec![
                step(0.0, InputKind::KeyDown { key: Key::Space }),
                step(0.1, InputKind::ButtonDown { button: MouseButton::Rmb }),
                step(0.2, InputKind::Motion { x: 450.0, y: 300.0, dx: 50.0, dy: 0.0 }),
                step(0.3, InputKind::ButtonUp { button: MouseButton::Rmb }),
                step(0.4, InputKind::Wheel { direction: WheelDirection::Up }),
                step(0.5, InputKind::KeyUp { key: Key::Space }),
            ],
            ..ReplayScript::default()
        };
        let report = run_replay(&script, Preferences::default(), SceneState::default()).unwrap();
        assert_eq!(report.sessions, 1);
        assert_eq!(report.pose_changes, 2);
        assert!(
            report.final_pose.position.abs_diff_eq(Vec3::new(2.0, -9.5, 2.0), 1e-3),
            "final {}",
            report.final_pose.position
        );
    }

    #[test]
    fn test_camera_state_ends_up_in_report() {
        let script = ReplayScript {
            steps: vec![
                step(0.0, InputKind::KeyDown { key: Key::Space }),
                step(0.1, InputKind::KeyDown { key: Key::Digit(7) }),
                step(0.2, InputKind::KeyUp { key: Key::Digit(7) }),
                step(2.0, InputKind::KeyUp { key: Key::Space }),
            ],
            ..ReplayScript::default()
        };
        let report = run_replay(&script, Preferences::default(), SceneState::default()).unwrap();
        let saved = report.scene.camera_states.get(7).copied().unwrap();
        assert!(saved.position.abs_diff_eq(Vec3::new(0.0, -10.0, 2.0), 1e-5));
    }

    #[test]
    fn test_scene_boxes_feed_pivot_relocation() {
        let script = ReplayScript {
            scene: vec![AABB::centered(Vec3::new(0.0, 10.0, 2.0), Vec3::splat(2.0))],
            view: ScriptView::default(),
            steps: vec![
                step(0.0, InputKind::KeyDown { key: Key::Space }),
                step(0.1, InputKind::KeyDown { key: Key::Letter('C') }),
                step(0.2, InputKind::KeyUp { key: Key::Letter('C') }),
                step(0.3, InputKind::KeyUp { key: Key::Space }),
            ],
        };
        let report = run_replay(&script, Preferences::default(), SceneState::default()).unwrap();
        // Front face at y = 9, 19 units from the eye, dug in by 5 %
        assert!((report.final_pose.distance - 19.95).abs() < 1e-3);
        assert!(report.final_pose.position.abs_diff_eq(Vec3::new(0.0, -10.0, 2.0), 1e-4));
    }

    #[test]
    fn test_script_loads_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("script.json");
        std::fs::write(
            &path,
            r#"{
                "view": {"eye": [0.0, 0.0, 5.0], "look_at": [10.0, 0.0, 5.0]},
                "steps": [
                    {"at": 0.0, "event": {"kind": "key_down", "key": "SPACE"}},
                    {"at": 0.1, "event": {"kind": "wheel", "direction": "up"}, "modifiers": {"shift": true}},
                    {"at": 0.2, "event": {"kind": "key_up", "key": "SPACE"}}
                ]
            }"#,
        )
        .unwrap();

        let script = ReplayScript::load(&path).unwrap();
        let report = run_replay(&script, Preferences::default(), SceneState::default()).unwrap();
        // Faster wheel step: 0.5 * 5 along +X
        assert!(
            report.final_pose.position.abs_diff_eq(Vec3::new(2.5, 0.0, 5.0), 1e-4),
            "final {}",
            report.final_pose.position
        );
    }
}
