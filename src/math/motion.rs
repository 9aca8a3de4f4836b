use glam::{Quat, Vec3};

/// Mouse travel (pixels over frames) that the strafe sensitivity is calibrated against:
/// an average movement of 1000 pixels over 20 frames travels exactly `distance`.
const REFERENCE_TRAVEL: f32 = 1000.0;
const REFERENCE_FRAMES: f32 = 20.0;
const PIXEL_SCALE: f32 = 0.1;

/// `sign(base) * |base|^exponent`
pub fn sign_exp(base: f32, exponent: f32) -> f32 {
    let magnitude = base.abs().powf(exponent);
    if base > 0.0 {
        magnitude
    } else {
        -magnitude
    }
}

/// Dynamic sensitivity curve for strafing.
///
/// With `potential > 1` small mouse movements travel proportionally less than large ones,
/// which gives precision at low speed while keeping fast flicks near full range. The curve
/// is normalised so a moderate movement travels `distance`.
pub fn scale_delta(delta: f32, distance: f32, potential: f32) -> f32 {
    let reference =
        sign_exp(REFERENCE_TRAVEL * PIXEL_SCALE / REFERENCE_FRAMES, potential) * REFERENCE_FRAMES;
    sign_exp(delta * PIXEL_SCALE, potential) * (distance / reference)
}

/// Move a view position by a delta in view space (`local`, rotated by `orientation`) plus
/// a delta in world space (`global`).
pub fn translate(position: Vec3, orientation: Quat, local: Vec3, global: Vec3) -> Vec3 {
    position + orientation * local + global
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_exp_keeps_sign() {
        assert_eq!(sign_exp(4.0, 0.5), 2.0);
        assert_eq!(sign_exp(-4.0, 0.5), -2.0);
        assert_eq!(sign_exp(0.0, 1.2), -0.0);
    }

    #[test]
    fn test_reference_movement_travels_distance() {
        // 20 frames of 50 pixels each sum to the calibrated distance
        let per_frame = REFERENCE_TRAVEL / REFERENCE_FRAMES;
        let total: f32 = (0..20).map(|_| scale_delta(per_frame, 40.0, 1.2)).sum();
        assert!((total - 40.0).abs() < 1e-3, "travelled {total}");
    }

    #[test]
    fn test_linear_potential_is_proportional() {
        let a = scale_delta(10.0, 40.0, 1.0);
        let b = scale_delta(20.0, 40.0, 1.0);
        assert!((b - 2.0 * a).abs() < 1e-6);
    }

    #[test]
    fn test_high_potential_damps_small_moves() {
        let small = scale_delta(2.0, 40.0, 1.6) / scale_delta(2.0, 40.0, 1.0);
        let large = scale_delta(200.0, 40.0, 1.6) / scale_delta(200.0, 40.0, 1.0);
        assert!(small < large);
    }

    #[test]
    fn test_translate_rotates_local_only() {
        let quarter = Quat::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2);
        let moved = translate(Vec3::ZERO, quarter, Vec3::X, Vec3::Z);
        assert!(moved.abs_diff_eq(Vec3::new(0.0, 1.0, 1.0), 1e-6));
    }
}
