use glam::{Quat, Vec3};

/// Horizontal length of the forward vector below which the yaw of a view is undefined
pub const NEAR_VERTICAL_EPSILON: f32 = 1e-6;

/// Horizontal length below which the heading is renormalised before extraction
const BORDERLINE_EPSILON: f32 = 1e-3;

/// View forward direction: local -Z rotated by the orientation
pub fn forward_dir(orientation: Quat) -> Vec3 {
    orientation * Vec3::NEG_Z
}

/// View up direction: local +Y rotated by the orientation
pub fn up_dir(orientation: Quat) -> Vec3 {
    orientation * Vec3::Y
}

/// View right direction: local +X rotated by the orientation
pub fn right_dir(orientation: Quat) -> Vec3 {
    orientation * Vec3::X
}

/// Turn a view by yaw (about world +Z) and pitch (about the view's own right axis).
///
/// Pitch is applied first and yaw second, so yawing always happens around world Z no
/// matter how far the view is pitched and the horizon stays level.
pub fn pan(orientation: Quat, yaw_delta: f32, pitch_delta: f32) -> Quat {
    if yaw_delta == 0.0 && pitch_delta == 0.0 {
        return orientation;
    }

    let yaw = Quat::from_axis_angle(Vec3::Z, -yaw_delta);
    let pitch = Quat::from_axis_angle(right_dir(orientation).normalize(), pitch_delta);

    (yaw * pitch * orientation).normalize()
}

/// Roll a view about its forward direction
pub fn roll(orientation: Quat, forward: Vec3, roll_delta: f32) -> Quat {
    if roll_delta == 0.0 {
        return orientation;
    }

    let axis = forward.normalize();
    (Quat::from_axis_angle(axis, roll_delta) * orientation).normalize()
}

/// Pitch (elevation above the XY plane) and yaw (heading, 0 = looking along +Y,
/// counter-clockwise seen from above) of a forward direction, in radians.
///
/// Returns `None` for yaw when the direction is (near) vertical.
pub fn pitch_yaw(forward: Vec3) -> (f32, Option<f32>) {
    let horizontal = forward.truncate().length();
    let pitch = forward.z.atan2(horizontal);

    if horizontal < NEAR_VERTICAL_EPSILON {
        (pitch, None)
    } else {
        (pitch, Some(heading(forward.x, forward.y, horizontal)))
    }
}

fn heading(x: f32, y: f32, length: f32) -> f32 {
    // Tiny horizontal components are widened to unit length first; atan2 keeps the
    // direction but the subsequent quaternion build stays in a well-conditioned range.
    let (x, y) = if length < BORDERLINE_EPSILON {
        (x / length, y / length)
    } else {
        (x, y)
    };
    (-x).atan2(y)
}

/// Orientation that looks along `forward` with no roll: the view's up vector is as close
/// to world +Z as the forward direction allows.
///
/// When looking straight up or down the heading cannot be derived from `forward`, so the
/// current up vector of `orientation` supplies it instead.
pub fn reset_roll(orientation: Quat, forward: Vec3) -> Quat {
    let forward = forward.normalize();
    let (pitch, yaw) = pitch_yaw(forward);

    let yaw = yaw.unwrap_or_else(|| {
        // Looking down, screen-up points where the view is heading; looking up, it
        // points the opposite way.
        let up = up_dir(orientation);
        let heading_dir = if forward.z < 0.0 { up } else { -up };
        let length = heading_dir.truncate().length().max(f32::MIN_POSITIVE);
        heading(heading_dir.x, heading_dir.y, length)
    });

    let level = Quat::from_axis_angle(Vec3::X, std::f32::consts::FRAC_PI_2 + pitch);
    (Quat::from_axis_angle(Vec3::Z, yaw) * level).normalize()
}
