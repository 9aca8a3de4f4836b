use glam::Vec3;
use log::{trace, warn};
use serde::{Deserialize, Serialize};

use crate::traits::{RayHit, SceneRaycast};

/// Re-casts allowed while skipping backfaces before the cast counts as a miss
pub const MAX_RAYCAST_ATTEMPTS: u32 = 100;

const MIN_NUDGE: f32 = 1e-5;
const MAX_NUDGE: f32 = 4e-3;
const NUDGE_PER_UNIT: f32 = 1e-5;

/// When a backface hit is skipped in favour of the surface behind it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackfacePolicy {
    Always,
    /// Only while the viewport hides backfaces
    #[default]
    WhenCulling,
    Never,
}

impl BackfacePolicy {
    pub fn skips_backfaces(self, viewport_culls: bool) -> bool {
        match self {
            BackfacePolicy::Always => true,
            BackfacePolicy::WhenCulling => viewport_culls,
            BackfacePolicy::Never => false,
        }
    }
}

/// Finds the surface under the crosshair and places the pivot slightly into it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PivotRaycaster {
    pub policy: BackfacePolicy,
    /// Overshoot past the hit, as a percentage of the eye-to-hit distance
    pub dig_percent: f32,
}

impl PivotRaycaster {
    pub fn new(policy: BackfacePolicy, dig_percent: f32) -> Self {
        Self {
            policy,
            dig_percent,
        }
    }

    /// Nearest acceptable hit along `direction` (unit) within `max_distance` of `origin`
    pub fn cast<S: SceneRaycast + ?Sized>(
        &self,
        scene: &S,
        origin: Vec3,
        direction: Vec3,
        max_distance: f32,
        viewport_culls: bool,
    ) -> Option<RayHit> {
        let skip_backfaces = self.policy.skips_backfaces(viewport_culls);
        let mut start = origin;
        let mut remaining = max_distance;

        for attempt in 0..MAX_RAYCAST_ATTEMPTS {
            let hit = scene.cast_ray(start, direction, remaining)?;
            if !(skip_backfaces && hit.is_backface(direction)) {
                return Some(hit);
            }

            let traveled = (hit.point - origin).length();
            let nudge = (traveled * NUDGE_PER_UNIT).clamp(MIN_NUDGE, MAX_NUDGE);
            start = hit.point + direction * nudge;
            remaining = max_distance - (start - origin).length();
            trace!("backface at {traveled:.4}, recast {attempt} from {start}");
            if remaining <= 0.0 {
                return None;
            }
        }

        warn!("pivot raycast gave up after {MAX_RAYCAST_ATTEMPTS} backface hits");
        None
    }

    /// Pivot point `dig_percent` beyond `hit` as seen from `eye`
    pub fn dig(&self, eye: Vec3, hit: Vec3) -> Vec3 {
        eye + (hit - eye) * (1.0 + self.dig_percent / 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Planes perpendicular to X at the given offsets, with their authored normals
    struct Walls(Vec<(f32, Vec3)>);

    impl SceneRaycast for Walls {
        fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
            self.0
                .iter()
                .filter_map(|&(x, normal)| {
                    let t = (x - origin.x) / direction.x;
                    (t >= 0.0 && t <= max_distance).then_some((t, normal))
                })
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .map(|(t, normal)| RayHit {
                    point: origin + direction * t,
                    normal,
                })
        }
    }

    fn back_then_front() -> Walls {
        Walls(vec![(2.0, Vec3::X), (6.0, Vec3::NEG_X)])
    }

    #[test]
    fn test_always_skips_backface() {
        let caster = PivotRaycaster::new(BackfacePolicy::Always, 0.0);
        let hit = caster
            .cast(&back_then_front(), Vec3::ZERO, Vec3::X, 100.0, false)
            .unwrap();
        assert!((hit.point.x - 6.0).abs() < 1e-4);
        assert!(!hit.is_backface(Vec3::X));
    }

    #[test]
    fn test_never_accepts_backface() {
        let caster = PivotRaycaster::new(BackfacePolicy::Never, 0.0);
        let hit = caster
            .cast(&back_then_front(), Vec3::ZERO, Vec3::X, 100.0, true)
            .unwrap();
        assert!((hit.point.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_when_culling_follows_viewport() {
        let caster = PivotRaycaster::new(BackfacePolicy::WhenCulling, 0.0);
        let scene = back_then_front();
        let culled = caster.cast(&scene, Vec3::ZERO, Vec3::X, 100.0, true).unwrap();
        let shown = caster.cast(&scene, Vec3::ZERO, Vec3::X, 100.0, false).unwrap();
        assert!((culled.point.x - 6.0).abs() < 1e-4);
        assert!((shown.point.x - 2.0).abs() < 1e-4);
    }

    #[test]
    fn test_front_face_beyond_range_is_miss() {
        let caster = PivotRaycaster::new(BackfacePolicy::Always, 0.0);
        assert!(caster
            .cast(&back_then_front(), Vec3::ZERO, Vec3::X, 4.0, false)
            .is_none());
    }

    #[test]
    fn test_gives_up_after_attempt_cap() {
        let many = (0..150).map(|i| (1.0 + i as f32 * 0.5, Vec3::X)).collect();
        let caster = PivotRaycaster::new(BackfacePolicy::Always, 0.0);
        assert!(caster.cast(&Walls(many), Vec3::ZERO, Vec3::X, 1000.0, false).is_none());
    }

    #[test]
    fn test_dig_overshoots_by_percentage() {
        let caster = PivotRaycaster::new(BackfacePolicy::Never, 5.0);
        let pivot = caster.dig(Vec3::ZERO, Vec3::new(0.0, 20.0, 0.0));
        assert!(pivot.abs_diff_eq(Vec3::new(0.0, 21.0, 0.0), 1e-5));
    }
}
