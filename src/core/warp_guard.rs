use glam::Vec2;
use log::warn;

/// Fraction of the region width/height at each edge that triggers recentering
pub const EDGE_MARGIN: f32 = 0.25;

/// Filters the bogus delta some platforms report right after a cursor warp.
///
/// After a warp of distance `D`, the next delta is replaced with the last applied one when
/// it is larger than `D / 2` and also more than twice the applied delta. Either way the
/// guard disarms after one event.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WarpGuard {
    beware_warp_dist: Option<f32>,
    previous_delta: Vec2,
}

impl WarpGuard {
    /// Arm after warping the cursor `warp_dist` pixels, right after applying `applied`
    pub fn arm(&mut self, applied: Vec2, warp_dist: f32) {
        self.beware_warp_dist = Some(warp_dist);
        self.previous_delta = applied;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_armed(&self) -> bool {
        self.beware_warp_dist.is_some()
    }

    pub fn filter(&mut self, delta: Vec2) -> Vec2 {
        let Some(warp_dist) = self.beware_warp_dist.take() else {
            return delta;
        };
        let magnitude = delta.length();
        if magnitude > warp_dist * 0.5 && magnitude > self.previous_delta.length() * 2.0 {
            warn!(
                "discarding motion {delta} after {warp_dist:.1}px cursor warp, reusing {}",
                self.previous_delta
            );
            self.previous_delta
        } else {
            delta
        }
    }
}

pub fn region_center(region: (u32, u32)) -> Vec2 {
    Vec2::new((region.0 / 2) as f32, (region.1 / 2) as f32)
}

/// True once the cursor is in the outer margin of the region
pub fn needs_recenter(cursor: Vec2, region: (u32, u32)) -> bool {
    let size = Vec2::new(region.0 as f32, region.1 as f32);
    let margin = size * EDGE_MARGIN;
    cursor.x < margin.x
        || cursor.y < margin.y
        || cursor.x > size.x - margin.x
        || cursor.y > size.y - margin.y
}
