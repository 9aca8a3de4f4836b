use glam::Vec3;

/// Nearest surface hit of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    /// Surface normal as authored; points away from the front face
    pub normal: Vec3,
}

impl RayHit {
    /// True when the ray arrives at the back of the surface
    pub fn is_backface(&self, direction: Vec3) -> bool {
        self.normal.dot(direction) > 0.0
    }
}

/// Scene geometry query
pub trait SceneRaycast {
    /// Nearest hit along `direction` (unit) within `max_distance` of `origin`
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}
