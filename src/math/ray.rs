use glam::Vec3;

use super::aabb::AABB;

/// Minimum exit distance accepted when the ray starts inside the box
const MIN_EXIT_DISTANCE: f32 = 1e-4;

/// Slab test. Returns the distance along `dir` to the first boundary crossing of `bounds`:
/// the entry face from outside, or the exit face when `origin` is already inside.
pub fn intersect_aabb(origin: Vec3, dir: Vec3, bounds: &AABB) -> Option<f32> {
    const EPSILON: f32 = 1e-8;

    // Near-zero direction components become huge inverse values instead of infinities
    let safe_inverse = |d: f32| {
        if d.abs() < EPSILON {
            1.0 / EPSILON.copysign(d)
        } else {
            1.0 / d
        }
    };
    let inv_dir = Vec3::new(safe_inverse(dir.x), safe_inverse(dir.y), safe_inverse(dir.z));

    let to_min = (bounds.min - origin) * inv_dir;
    let to_max = (bounds.max - origin) * inv_dir;

    let t_near = to_min.min(to_max).max_element();
    let t_far = to_min.max(to_max).min_element();

    if t_near > t_far || t_far < 0.0 {
        None
    } else if t_near >= 0.0 {
        Some(t_near)
    } else if t_far > MIN_EXIT_DISTANCE {
        Some(t_far)
    } else {
        None
    }
}
