/// Field of view in degrees for a pinhole camera with the given focal length and sensor
/// size (both in millimetres).
pub fn focal_length_to_fov(focal_length: f64, sensor_size: f64) -> f64 {
    (2.0 * (sensor_size / (2.0 * focal_length)).atan()).to_degrees()
}

/// Inverse of [`focal_length_to_fov`]
pub fn fov_to_focal_length(fov_degrees: f64, sensor_size: f64) -> f64 {
    sensor_size / (2.0 * (fov_degrees.to_radians() * 0.5).tan())
}

/// Which image axis a field of view is measured along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FovAxis {
    Horizontal,
    Vertical,
}

/// Sensor extent along `axis` when the sensor width is fitted to the larger image
/// dimension.
pub fn sensor_extent(sensor_width: f64, aspect: f64, axis: FovAxis) -> f64 {
    let aspect = if aspect > 0.0 { aspect } else { 1.0 };
    match axis {
        FovAxis::Horizontal if aspect >= 1.0 => sensor_width,
        FovAxis::Horizontal => sensor_width * aspect,
        FovAxis::Vertical if aspect >= 1.0 => sensor_width / aspect,
        FovAxis::Vertical => sensor_width,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_lens() {
        // 50mm on a 36mm sensor is the classic ~39.6 degree normal lens
        let fov = focal_length_to_fov(50.0, 36.0);
        assert!((fov - 39.5978).abs() < 1e-3, "got {fov}");
    }

    #[test]
    fn test_mutual_inverse_over_domain() {
        let focals = [0.001, 0.5, 1.0, 12.0, 35.0, 50.0, 85.0, 300.0, 999.0, 1000.0];
        let sensors = [0.01, 1.0, 23.6, 36.0, 99.9, 100.0];
        for &focal in &focals {
            for &sensor in &sensors {
                let back = fov_to_focal_length(focal_length_to_fov(focal, sensor), sensor);
                let tolerance = 1e-6 * focal.max(1.0);
                assert!(
                    (back - focal).abs() <= tolerance,
                    "focal {focal} sensor {sensor} came back as {back}"
                );
            }
        }
    }

    #[test]
    fn test_sensor_extent_fits_larger_dimension() {
        assert_eq!(sensor_extent(36.0, 2.0, FovAxis::Horizontal), 36.0);
        assert_eq!(sensor_extent(36.0, 2.0, FovAxis::Vertical), 18.0);
        assert_eq!(sensor_extent(36.0, 0.5, FovAxis::Horizontal), 18.0);
        assert_eq!(sensor_extent(36.0, 0.5, FovAxis::Vertical), 36.0);
    }
}
