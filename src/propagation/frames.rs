//! Coordinate frame transforms
//!
//! Rotation between the Earth-centered inertial frame and the Earth-fixed
//! rotating frame, and Cartesian to spherical conversion.
//!
//! The Earth-fixed frame is obtained by a single rotation about the polar axis
//! through the Greenwich mean sidereal angle. Precession, nutation and polar
//! motion are neglected, which keeps the transform free of external Earth
//! orientation data and is well inside the accuracy of a 4×4 geopotential.

use super::constants::{DAYS_PER_JULIAN_CENTURY, J2000_JD};
use nalgebra::{UnitQuaternion, Vector3};
use satkit::Instant;

/// Spherical coordinates of a Cartesian vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    /// Distance from the origin
    pub radius: f64,
    /// Longitude (azimuth from +x toward +y) in radians, in (-π, π]
    pub longitude: f64,
    /// Geocentric latitude (elevation above the x-y plane) in radians
    pub latitude: f64,
}

/// Convert a Cartesian vector to (radius, longitude, latitude)
///
/// The zero vector maps to all zeros.
pub fn spherical_from_cartesian(v: &Vector3<f64>) -> Spherical {
    let radius = v.norm();
    if radius == 0.0 {
        return Spherical {
            radius: 0.0,
            longitude: 0.0,
            latitude: 0.0,
        };
    }

    Spherical {
        radius,
        longitude: v.y.atan2(v.x),
        latitude: (v.z / radius).clamp(-1.0, 1.0).asin(),
    }
}

/// Greenwich mean sidereal angle in radians, in [0, 2π)
///
/// UTC is used in place of UT1; the sub-second difference is irrelevant here.
pub fn gmst(epoch: &Instant) -> f64 {
    let days = epoch.as_jd() - J2000_JD;
    let t = days / DAYS_PER_JULIAN_CENTURY;
    let degrees = 280.46061837 + 360.98564736629 * days + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    degrees.rem_euclid(360.0).to_radians()
}

/// Rotation taking inertial vectors into the Earth-fixed frame
fn q_inertial_to_fixed(epoch: &Instant) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), -gmst(epoch))
}

/// Rotate an inertial vector into the Earth-fixed frame at `epoch`
pub fn fixed_from_inertial(epoch: &Instant, v: &Vector3<f64>) -> Vector3<f64> {
    q_inertial_to_fixed(epoch) * v
}

/// Rotate an Earth-fixed vector into the inertial frame at `epoch`
pub fn inertial_from_fixed(epoch: &Instant, v: &Vector3<f64>) -> Vector3<f64> {
    q_inertial_to_fixed(epoch).inverse() * v
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_spherical_axes() {
        let s = spherical_from_cartesian(&Vector3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(s.radius, 2.0);
        assert_relative_eq!(s.longitude, FRAC_PI_2);
        assert_relative_eq!(s.latitude, 0.0);

        let s = spherical_from_cartesian(&Vector3::new(1.0, 0.0, 1.0));
        assert_relative_eq!(s.latitude, FRAC_PI_4, epsilon = 1e-12);

        let s = spherical_from_cartesian(&Vector3::new(0.0, 0.0, -3.0));
        assert_relative_eq!(s.latitude, -FRAC_PI_2);
    }

    #[test]
    fn test_gmst_at_j2000() {
        // 2000-01-01 12:00 UTC: GMST ≈ 280.46°
        let epoch = Instant::from_datetime(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert!((gmst(&epoch).to_degrees() - 280.46061837).abs() < 1e-3);
    }

    #[test]
    fn test_gmst_advances_at_earth_rotation_rate() {
        use crate::propagation::constants::EARTH_ROTATION_RATE;

        let start = Instant::from_datetime(2022, 12, 20, 3, 0, 0.0).unwrap();
        let later = Instant::from_datetime(2022, 12, 20, 3, 10, 0.0).unwrap();
        let advance = (gmst(&later) - gmst(&start)).rem_euclid(std::f64::consts::TAU);
        assert_relative_eq!(advance, EARTH_ROTATION_RATE * 600.0, max_relative = 1e-5);
    }

    #[test]
    fn test_round_trip_preserves_vector() {
        let epoch = Instant::from_datetime(2022, 12, 20, 7, 30, 0.0).unwrap();
        let v = Vector3::new(7000.0, -1200.0, 350.0);

        let fixed = fixed_from_inertial(&epoch, &v);
        assert_relative_eq!(fixed.norm(), v.norm(), epsilon = 1e-9);
        assert_relative_eq!(fixed.z, v.z, epsilon = 1e-9);

        let back = inertial_from_fixed(&epoch, &fixed);
        assert_relative_eq!((back - v).norm(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_frame_rotates_with_earth() {
        // Greenwich meridian in the fixed frame points along GMST in inertial space
        let epoch = Instant::from_datetime(2022, 12, 20, 0, 0, 0.0).unwrap();
        let theta = gmst(&epoch);
        let inertial = inertial_from_fixed(&epoch, &Vector3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(inertial.x, theta.cos(), epsilon = 1e-12);
        assert_relative_eq!(inertial.y, theta.sin(), epsilon = 1e-12);
    }
}
