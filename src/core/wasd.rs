use std::time::Duration;

use glam::Vec3;

/// Interval requested from the host timer while a movement key is held
pub const WASD_TICK_INTERVAL: Duration = Duration::from_millis(1);

/// Acceleration times below this jump straight to top speed
const INSTANT_ACCEL: f64 = 0.0005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    Forward,
    Backward,
    Left,
    Right,
    Down,
    Up,
}

/// Movement keys currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WasdKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub down: bool,
    pub up: bool,
}

impl WasdKeys {
    pub fn any(&self) -> bool {
        self.forward || self.backward || self.left || self.right || self.down || self.up
    }

    pub fn set(&mut self, direction: MoveDirection, down: bool) {
        let flag = match direction {
            MoveDirection::Forward => &mut self.forward,
            MoveDirection::Backward => &mut self.backward,
            MoveDirection::Left => &mut self.left,
            MoveDirection::Right => &mut self.right,
            MoveDirection::Down => &mut self.down,
            MoveDirection::Up => &mut self.up,
        };
        *flag = down;
    }

    /// View-space translation for one tick. Each held key contributes a full `distance`
    /// along its axis; `normalize` caps combined movement at `distance`.
    pub fn local_delta(&self, distance: f32, normalize: bool) -> Vec3 {
        let axis = |positive: bool, negative: bool| match (positive, negative) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        };
        let direction = Vec3::new(
            axis(self.right, self.left),
            axis(self.up, self.down),
            axis(self.backward, self.forward),
        );
        if normalize {
            direction.normalize_or_zero() * distance
        } else {
            direction * distance
        }
    }
}

/// Linear speed ramp measured from the moment the first movement key went down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WasdRamp {
    start: f64,
    previous: f64,
}

impl WasdRamp {
    pub fn begin(now: f64) -> Self {
        Self {
            start: now,
            previous: now,
        }
    }

    /// Fraction of top speed reached at `now`, in [0, 1]
    pub fn speed_fraction_at(&self, now: f64, accel_time: f64) -> f64 {
        if accel_time < INSTANT_ACCEL {
            return 1.0;
        }
        ((now - self.start) / accel_time).clamp(0.0, 1.0)
    }

    /// Distance to travel since the previous tick
    pub fn advance(&mut self, now: f64, top_speed: f64, accel_time: f64) -> f64 {
        let speed = top_speed * self.speed_fraction_at(now, accel_time);
        let elapsed = (now - self.previous).max(0.0);
        self.previous = now;
        speed * elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_reaches_half_then_saturates() {
        let ramp = WasdRamp::begin(0.0);
        assert!((ramp.speed_fraction_at(1.0, 2.0) - 0.5).abs() < 1e-9);
        for step in 0..=50 {
            let t = 2.0 + step as f64 * 0.1;
            assert_eq!(ramp.speed_fraction_at(t, 2.0), 1.0, "not saturated at {t}");
        }
    }

    #[test]
    fn test_zero_accel_is_instant() {
        let ramp = WasdRamp::begin(3.0);
        assert_eq!(ramp.speed_fraction_at(3.0, 0.0), 1.0);
    }

    #[test]
    fn test_advance_integrates_from_previous_tick() {
        let mut ramp = WasdRamp::begin(0.0);
        let first = ramp.advance(2.0, 10.0, 2.0);
        assert!((first - 20.0).abs() < 1e-9);
        let second = ramp.advance(2.5, 10.0, 2.0);
        assert!((second - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_diagonal_not_normalized_by_default() {
        let mut keys = WasdKeys::default();
        keys.set(MoveDirection::Forward, true);
        keys.set(MoveDirection::Right, true);
        assert_eq!(keys.local_delta(1.0, false), Vec3::new(1.0, 0.0, -1.0));
        let normalized = keys.local_delta(1.0, true);
        assert!((normalized.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = WasdKeys {
            left: true,
            right: true,
            up: true,
            ..WasdKeys::default()
        };
        assert!(keys.any());
        assert_eq!(keys.local_delta(2.0, false), Vec3::new(0.0, 2.0, 0.0));
        assert!(!WasdKeys::default().any());
    }
}
