use std::time::Duration;

use glam::Vec3;

use crate::core::timer::StopSignal;
use crate::error::{NavError, Result};
use crate::math::{intersect_aabb, AABB};
use crate::traits::{
    CameraObject, RayHit, SceneRaycast, TickScheduler, ViewState, ViewTransform, ViewportWindow,
};

/// In-memory host: a scene of boxes, a viewport and a window that records what the
/// navigator asked of it.
///
/// ```
/// use glam::Vec3;
/// use mouse_strafing::sandbox::SandboxHost;
///
/// let host = SandboxHost::new()
///     .with_ground(-1.0)
///     .with_box(Vec3::new(0.0, 20.0, 2.0), Vec3::splat(4.0));
/// assert_eq!(host.boxes.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SandboxHost {
    pub boxes: Vec<AABB>,
    pub view: ViewState,
    pub camera: Option<CameraObject>,
    pub clip: (f32, f32),
    pub culling: bool,
    pub region: (u32, u32),
    pub cursor_visible: bool,
    pub overlay_attached: bool,
    /// Every cursor warp, in region coordinates
    pub warps: Vec<(f32, f32)>,
    pub redraws: usize,
    /// Stop signals handed over with each tick registration
    pub scheduled: Vec<StopSignal>,
    pub tick_interval: Option<Duration>,
    pub fail_view_writes: bool,
    pub fail_warps: bool,
    pub panic_on_raycast: bool,
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxHost {
    pub fn new() -> Self {
        Self {
            boxes: Vec::new(),
            view: ViewState::default(),
            camera: None,
            clip: (0.01, 1000.0),
            culling: false,
            region: (800, 600),
            cursor_visible: true,
            overlay_attached: false,
            warps: Vec::new(),
            redraws: 0,
            scheduled: Vec::new(),
            tick_interval: None,
            fail_view_writes: false,
            fail_warps: false,
            panic_on_raycast: false,
        }
    }

    pub fn with_box(mut self, center: Vec3, size: Vec3) -> Self {
        self.boxes.push(AABB::centered(center, size));
        self
    }

    /// Thin slab whose top face is at height `z`
    pub fn with_ground(mut self, z: f32) -> Self {
        self.boxes.push(AABB::new(
            Vec3::new(-500.0, -500.0, z - 1.0),
            Vec3::new(500.0, 500.0, z),
        ));
        self
    }

    pub fn with_view(mut self, view: ViewState) -> Self {
        self.view = view;
        self
    }

    pub fn with_camera(mut self, camera: CameraObject) -> Self {
        self.camera = Some(camera);
        self
    }

    /// Stop signals that have not been raised yet
    pub fn live_ticks(&self) -> Vec<StopSignal> {
        self.scheduled
            .iter()
            .filter(|signal| !signal.is_raised())
            .cloned()
            .collect()
    }
}

impl ViewTransform for SandboxHost {
    fn view(&self) -> ViewState {
        self.view
    }

    fn set_view(&mut self, view: ViewState) -> Result<()> {
        if self.fail_view_writes {
            return Err(NavError::host("viewport rejected the new view"));
        }
        self.view = view;
        Ok(())
    }

    fn locked_camera(&self) -> Option<CameraObject> {
        self.camera
    }

    fn set_locked_camera(&mut self, camera: CameraObject) -> Result<()> {
        if self.fail_view_writes {
            return Err(NavError::host("camera object is read-only"));
        }
        self.camera = Some(camera);
        Ok(())
    }

    fn clip_range(&self) -> (f32, f32) {
        self.clip
    }

    fn backface_culling(&self) -> bool {
        self.culling
    }
}

impl ViewportWindow for SandboxHost {
    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn region_size(&self) -> (u32, u32) {
        self.region
    }

    fn warp_cursor(&mut self, x: f32, y: f32) -> Result<()> {
        if self.fail_warps {
            return Err(NavError::host("cursor warp failed"));
        }
        self.warps.push((x, y));
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) {
        self.cursor_visible = visible;
    }

    fn attach_overlay(&mut self) -> Result<()> {
        self.overlay_attached = true;
        Ok(())
    }

    fn detach_overlay(&mut self) {
        self.overlay_attached = false;
    }
}

impl SceneRaycast for SandboxHost {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        if self.panic_on_raycast {
            panic!("sandbox raycast failure");
        }
        self.boxes
            .iter()
            .filter_map(|bounds| {
                let t = intersect_aabb(origin, direction, bounds)?;
                (t <= max_distance).then_some((t, bounds))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(t, bounds)| {
                let point = origin + direction * t;
                RayHit {
                    point,
                    normal: bounds.normal_at(point),
                }
            })
    }
}

impl TickScheduler for SandboxHost {
    fn schedule_ticks(&mut self, interval: Duration, stop: StopSignal) {
        self.tick_interval = Some(interval);
        self.scheduled.push(stop);
    }
}
