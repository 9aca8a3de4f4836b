use glam::{Quat, Vec3};

use crate::error::Result;

/// The viewport's own free camera: it orbits `pivot` at `distance` with `rotation`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub pivot: Vec3,
    pub rotation: Quat,
    pub distance: f32,
    /// Focal length in millimetres
    pub lens: f32,
    pub perspective: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            distance: 10.0,
            lens: 50.0,
            perspective: true,
        }
    }
}

/// A scene camera object the viewport can be locked to
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraObject {
    pub position: Vec3,
    pub rotation: Quat,
    pub lens: f32,
    pub perspective: bool,
}

/// Camera and viewport transform access
pub trait ViewTransform {
    /// Current state of the viewport's free camera
    fn view(&self) -> ViewState;

    fn set_view(&mut self, view: ViewState) -> Result<()>;

    /// Camera object the viewport is locked to, if any
    fn locked_camera(&self) -> Option<CameraObject>;

    fn set_locked_camera(&mut self, camera: CameraObject) -> Result<()>;

    /// Near and far clip distances
    fn clip_range(&self) -> (f32, f32);

    /// Sensor width in millimetres, used for lens/FOV conversion
    fn sensor_width(&self) -> f32 {
        36.0
    }

    /// Whether the viewport hides backfaces
    fn backface_culling(&self) -> bool {
        false
    }
}
