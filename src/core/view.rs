//! Camera pose access through the host.
//!
//! Every read and write of the camera goes through `decompose_pose`/`apply_pose`, so the
//! locked-camera versus free-viewport distinction lives in this file only.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::math::forward_dir;
use crate::traits::{CameraObject, ViewState, ViewTransform};

/// Snapshot of everything a camera-state slot restores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub position: Vec3,
    pub orientation: Quat,
    pub distance: f32,
    pub lens: f32,
    pub perspective: bool,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            distance: 10.0,
            lens: 50.0,
            perspective: true,
        }
    }
}

/// Eye position, orientation and forward direction of the active camera
pub fn decompose_pose<H: ViewTransform + ?Sized>(host: &H) -> (Vec3, Quat, Vec3) {
    match host.locked_camera() {
        Some(camera) => (camera.position, camera.rotation, forward_dir(camera.rotation)),
        None => {
            let view = host.view();
            let forward = forward_dir(view.rotation);
            (view.pivot - forward * view.distance, view.rotation, forward)
        }
    }
}

/// Write an eye position and orientation back to the active camera.
///
/// With `force_viewport` the free viewport camera is written even when a camera object is
/// locked; its pivot is placed `distance` ahead of the eye.
pub fn apply_pose<H: ViewTransform + ?Sized>(
    host: &mut H,
    position: Vec3,
    orientation: Quat,
    force_viewport: bool,
) -> Result<()> {
    if !force_viewport {
        if let Some(camera) = host.locked_camera() {
            return host.set_locked_camera(CameraObject {
                position,
                rotation: orientation,
                ..camera
            });
        }
    }

    let view = host.view();
    host.set_view(ViewState {
        pivot: position + forward_dir(orientation) * view.distance,
        rotation: orientation,
        ..view
    })
}

pub fn capture_pose<H: ViewTransform + ?Sized>(host: &H) -> CameraPose {
    let (position, orientation, _) = decompose_pose(host);
    let view = host.view();
    let (lens, perspective) = match host.locked_camera() {
        Some(camera) => (camera.lens, camera.perspective),
        None => (view.lens, view.perspective),
    };
    CameraPose {
        position,
        orientation,
        distance: view.distance,
        lens,
        perspective,
    }
}

/// Apply a stored pose, switching projection when it differs
pub fn restore_pose<H: ViewTransform + ?Sized>(
    host: &mut H,
    pose: &CameraPose,
    keep_lens: bool,
) -> Result<()> {
    let lens = if keep_lens { current_lens(host) } else { pose.lens };
    let distance = pose.distance.max(0.0);

    if host.locked_camera().is_some() {
        host.set_locked_camera(CameraObject {
            position: pose.position,
            rotation: pose.orientation,
            lens,
            perspective: pose.perspective,
        })?;
        // The free viewport camera keeps the stored pivot distance behind the lock
        let view = host.view();
        host.set_view(ViewState { distance, ..view })?;
        return apply_pose(host, pose.position, pose.orientation, true);
    }

    host.set_view(ViewState {
        pivot: pose.position + forward_dir(pose.orientation) * distance,
        rotation: pose.orientation,
        distance,
        lens,
        perspective: pose.perspective,
    })
}

/// Focal length of the active camera in millimetres
pub fn current_lens<H: ViewTransform + ?Sized>(host: &H) -> f32 {
    host.locked_camera()
        .map_or_else(|| host.view().lens, |camera| camera.lens)
}

pub fn set_lens<H: ViewTransform + ?Sized>(host: &mut H, lens: f32) -> Result<()> {
    match host.locked_camera() {
        Some(camera) => host.set_locked_camera(CameraObject { lens, ..camera }),
        None => {
            let view = host.view();
            host.set_view(ViewState { lens, ..view })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Viewport {
        view: ViewState,
        camera: Option<CameraObject>,
    }

    impl ViewTransform for Viewport {
        fn view(&self) -> ViewState {
            self.view
        }

        fn set_view(&mut self, view: ViewState) -> Result<()> {
            self.view = view;
            Ok(())
        }

        fn locked_camera(&self) -> Option<CameraObject> {
            self.camera
        }

        fn set_locked_camera(&mut self, camera: CameraObject) -> Result<()> {
            self.camera = Some(camera);
            Ok(())
        }

        fn clip_range(&self) -> (f32, f32) {
            (0.1, 100.0)
        }
    }

    #[test]
    fn test_viewport_eye_sits_behind_pivot() {
        let viewport = Viewport::default();
        let (position, _, forward) = decompose_pose(&viewport);
        assert!(forward.abs_diff_eq(Vec3::NEG_Z, 1e-6));
        assert!(position.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-6));
    }

    #[test]
    fn test_apply_then_decompose_round_trips() {
        let mut viewport = Viewport::default();
        let rotation = Quat::from_rotation_x(0.7);
        apply_pose(&mut viewport, Vec3::new(1.0, 2.0, 3.0), rotation, false).unwrap();
        let (position, orientation, _) = decompose_pose(&viewport);
        assert!(position.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 1e-5));
        assert!(orientation.abs_diff_eq(rotation, 1e-6));
    }

    #[test]
    fn test_locked_camera_receives_pose_unless_forced() {
        let mut viewport = Viewport {
            camera: Some(CameraObject {
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                lens: 35.0,
                perspective: true,
            }),
            ..Viewport::default()
        };
        apply_pose(&mut viewport, Vec3::X, Quat::IDENTITY, false).unwrap();
        assert_eq!(viewport.camera.unwrap().position, Vec3::X);
        assert_eq!(viewport.view.pivot, Vec3::ZERO);

        apply_pose(&mut viewport, Vec3::Y, Quat::IDENTITY, true).unwrap();
        assert_eq!(viewport.camera.unwrap().position, Vec3::X);
        assert!(viewport.view.pivot.abs_diff_eq(Vec3::new(0.0, 1.0, -10.0), 1e-6));
        assert_eq!(current_lens(&viewport), 35.0);
    }

    #[test]
    fn test_restore_switches_projection_and_keeps_lens() {
        let mut viewport = Viewport::default();
        let pose = CameraPose {
            position: Vec3::new(0.0, -5.0, 1.0),
            lens: 85.0,
            perspective: false,
            ..CameraPose::default()
        };
        restore_pose(&mut viewport, &pose, true).unwrap();
        assert!(!viewport.view.perspective);
        assert_eq!(viewport.view.lens, 50.0);

        restore_pose(&mut viewport, &pose, false).unwrap();
        assert_eq!(viewport.view.lens, 85.0);
        assert_eq!(capture_pose(&viewport), pose);
    }

    #[test]
    fn test_restore_while_locked_keeps_pivot_distance() {
        let mut viewport = Viewport {
            camera: Some(CameraObject {
                position: Vec3::ZERO,
                rotation: Quat::IDENTITY,
                lens: 35.0,
                perspective: true,
            }),
            ..Viewport::default()
        };
        let pose = CameraPose {
            position: Vec3::new(2.0, 0.0, 0.0),
            distance: 4.0,
            lens: 70.0,
            ..CameraPose::default()
        };
        restore_pose(&mut viewport, &pose, false).unwrap();

        let camera = viewport.camera.unwrap();
        assert_eq!(camera.position, pose.position);
        assert_eq!(camera.lens, 70.0);
        assert_eq!(viewport.view.distance, 4.0);
        assert!(viewport.view.pivot.abs_diff_eq(Vec3::new(2.0, 0.0, -4.0), 1e-6));
    }
}
