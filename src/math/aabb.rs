use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AABB {
    pub min: Vec3,
    pub max: Vec3,
}

impl AABB {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Box centred on `center` with the given full extents
    pub fn centered(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self::new(center - half, center + half)
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Outward normal of the face closest to `point`
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        let to_min = (point - self.min).abs();
        let to_max = (self.max - point).abs();

        let candidates = [
            (to_min.x, Vec3::NEG_X),
            (to_max.x, Vec3::X),
            (to_min.y, Vec3::NEG_Y),
            (to_max.y, Vec3::Y),
            (to_min.z, Vec3::NEG_Z),
            (to_max.z, Vec3::Z),
        ];

        candidates
            .iter()
            .fold((f32::INFINITY, Vec3::Z), |best, &(distance, normal)| {
                if distance < best.0 {
                    (distance, normal)
                } else {
                    best
                }
            })
            .1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_corners() {
        let aabb = AABB::new(Vec3::new(2.0, 0.0, 5.0), Vec3::new(0.0, 3.0, 1.0));
        assert_eq!(aabb.min, Vec3::new(0.0, 0.0, 1.0));
        assert_eq!(aabb.max, Vec3::new(2.0, 3.0, 5.0));
    }

    #[test]
    fn test_centered() {
        let aabb = AABB::centered(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.min, Vec3::ZERO);
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_normal_at_faces() {
        let aabb = AABB::new(Vec3::ZERO, Vec3::splat(2.0));
        assert_eq!(aabb.normal_at(Vec3::new(0.0, 1.0, 1.0)), Vec3::NEG_X);
        assert_eq!(aabb.normal_at(Vec3::new(2.0, 1.0, 1.0)), Vec3::X);
        assert_eq!(aabb.normal_at(Vec3::new(1.0, 1.0, 2.0)), Vec3::Z);
        assert_eq!(aabb.normal_at(Vec3::new(1.0, 0.0, 0.9)), Vec3::NEG_Y);
    }
}
