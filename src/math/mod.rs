mod aabb;
mod lens;
mod motion;
mod nudge;
mod ray;
mod rotation;

pub use aabb::AABB;
pub use lens::{focal_length_to_fov, fov_to_focal_length, sensor_extent, FovAxis};
pub use motion::{scale_delta, sign_exp, translate};
pub use nudge::{
    nudge_by, nudge_value, repeated, NudgeRange, NudgeTable, FOCAL_LENGTH_TABLE, FOV_TABLE,
    PRECISE_STEP, STRAFE_SENSITIVITY_TABLE,
};
pub use ray::intersect_aabb;
pub use rotation::{
    forward_dir, pan, pitch_yaw, reset_roll, right_dir, roll, up_dir, NEAR_VERTICAL_EPSILON,
};
