//! Low-precision analytic Sun and Moon positions
//!
//! Truncated trigonometric series in Julian centuries (TT) since J2000.
//! Accuracy is a fraction of a degree in direction, which is what third-body
//! perturbations need; not suitable for pointing or eclipse work.
//!
//! Both functions return geocentric positions in km in the equatorial inertial
//! frame used by the propagator.

use super::constants::{
    DAYS_PER_JULIAN_CENTURY, J2000_JD, OBLIQUITY_OF_ECLIPTIC, SUN_OMEGA_PLUS_OMEGA,
};
use nalgebra::{Rotation3, Vector3};
use satkit::{Instant, TimeScale};

/// Julian centuries of Terrestrial Time elapsed since J2000.0
pub fn julian_centuries_past_j2000(epoch: &Instant) -> f64 {
    (epoch.as_jd_with_scale(TimeScale::TT) - J2000_JD) / DAYS_PER_JULIAN_CENTURY
}

/// Geocentric Sun position in km
pub fn sun_position(epoch: &Instant) -> Vector3<f64> {
    // Equation-of-center amplitudes (6892" and 72")
    const A1: f64 = 0.0334133589;
    const A2: f64 = 0.0003490659;

    let t = julian_centuries_past_j2000(epoch);
    let mean_anomaly = (357.5256 + 35999.049 * t).to_radians();
    let (sin_m, cos_m) = mean_anomaly.sin_cos();

    let longitude = SUN_OMEGA_PLUS_OMEGA + mean_anomaly + A1 * sin_m + A2 * 2.0 * sin_m * cos_m;
    let r = (149.619 - 2.499 * cos_m - 0.021 * (2.0 * mean_anomaly).cos()) * 1e6;

    let (sin_lam, cos_lam) = longitude.sin_cos();
    let (sin_eps, cos_eps) = OBLIQUITY_OF_ECLIPTIC.sin_cos();

    Vector3::new(r * cos_lam, r * sin_lam * cos_eps, r * sin_lam * sin_eps)
}

/// Geocentric Moon position in km
pub fn moon_position(epoch: &Instant) -> Vector3<f64> {
    let t = julian_centuries_past_j2000(epoch);

    // Fundamental arguments
    let l0 = (218.31617 + 481267.88088 * t - 1.3972 * t).to_radians();
    let l = (134.96292 + 477198.86753 * t).to_radians();
    let lp = (357.52543 + 35999.04944 * t).to_radians();
    let f = (93.27283 + 483202.01873 * t).to_radians();
    let d = (297.85027 + 445267.11135 * t).to_radians();

    // Ecliptic longitude
    let lambda = l0 + 0.109839480287776 * l.sin() + 0.0037322220424506 * (2.0 * l).sin()
        - 0.0221806468707036 * (l - 2.0 * d).sin()
        + 0.0114797042944426 * (2.0 * d).sin()
        - 0.0032417852998172 * lp.sin()
        - 0.0019977929354784 * (2.0 * f).sin()
        - 0.0010265025328168 * (2.0 * l - 2.0 * d).sin()
        - 0.0009997601892124 * (l + lp - 2.0 * d).sin()
        + 0.0009312755020032 * (l + 2.0 * d).sin()
        - 0.0008002981275842 * (lp - 2.0 * d).sin()
        + 0.0007170000723212 * (l - lp).sin()
        - 0.000606017101918 * d.sin()
        - 0.0005332974922114 * (l + lp).sin()
        - 0.0002666487461057 * (2.0 * f - 2.0 * d).sin();

    // Ecliptic latitude
    let beta = 0.0898933928087776
        * (f + lambda - l0
            + 0.0019977929354784 * (2.0 * f + 0.0026218341701444 * lp.sin()).sin())
        .sin()
        - 0.0025555590348276 * (f - 2.0 * d).sin()
        + 0.0002131418144236 * (l + f - 2.0 * d).sin()
        - 0.0001502389689262 * (-l + f - 2.0 * d).sin()
        - 0.000121203693847 * (-2.0 * l + f).sin()
        - 0.000111229249161 * (lp + f - 2.0 * d).sin()
        + 0.000101254804475 * (-l + f).sin()
        + 0.000053137093141 * (-lp + f - 2.0 * d).sin();

    // Distance in km
    let r = 385_000.0 - 20_905.0 * l.cos() - 3_699.0 * (2.0 * d - l).cos()
        - 2_956.0 * (2.0 * d).cos()
        - 570.0 * (2.0 * l).cos()
        + 246.0 * (2.0 * l - 2.0 * d).cos()
        - 205.0 * (lp - 2.0 * d).cos()
        - 171.0 * (l + 2.0 * d).cos()
        - 152.0 * (l + lp - 2.0 * d).cos();

    let ecliptic = Vector3::new(r * lambda.cos(), r * lambda.sin(), r * beta.sin());

    Rotation3::from_axis_angle(&Vector3::x_axis(), OBLIQUITY_OF_ECLIPTIC) * ecliptic
}

#[cfg(test)]
mod tests {
    use super::*;

    fn angle_between(a: &Vector3<f64>, b: &Vector3<f64>) -> f64 {
        (a.dot(b) / (a.norm() * b.norm())).clamp(-1.0, 1.0).acos()
    }

    #[test]
    fn test_julian_centuries_at_j2000() {
        // J2000.0 is 2000-01-01 12:00 TT, which is 11:58:55.816 UTC
        let epoch = Instant::from_datetime(2000, 1, 1, 11, 58, 55.816).unwrap();
        assert!(julian_centuries_past_j2000(&epoch).abs() < 1e-10);
    }

    #[test]
    fn test_sun_distance_near_one_au() {
        let epoch = Instant::from_datetime(2022, 7, 4, 0, 0, 0.0).unwrap();
        let r = sun_position(&epoch).norm();
        // Aphelion in early July, ~1.0167 AU
        assert!((r - 1.521e8).abs() < 5e5, "sun distance = {}", r);
    }

    #[test]
    fn test_sun_stays_near_ecliptic() {
        // Sun declination never exceeds the obliquity
        for month in 1..=12 {
            let epoch = Instant::from_datetime(2022, month, 1, 0, 0, 0.0).unwrap();
            let sun = sun_position(&epoch);
            let declination = (sun.z / sun.norm()).asin();
            assert!(declination.abs() <= OBLIQUITY_OF_ECLIPTIC + 1e-9);
        }
    }

    #[test]
    fn test_moon_distance_bounds() {
        for day in [1, 8, 15, 22] {
            let epoch = Instant::from_datetime(2022, 2, day, 0, 0, 0.0).unwrap();
            let r = moon_position(&epoch).norm();
            assert!(r > 356_000.0 && r < 410_000.0, "moon distance = {}", r);
        }
    }

    #[test]
    fn test_sun_moon_golden_direction() {
        let epoch = Instant::from_datetime(2022, 2, 25, 0, 0, 0.0).unwrap();

        let sun = sun_position(&epoch);
        let sun_ref = Vector3::new(1.353158384e8, -5.514968448e7, -2.390803633e7);
        assert!(angle_between(&sun, &sun_ref) < 0.01);

        let moon = moon_position(&epoch);
        let moon_ref = Vector3::new(-6.454159844e4, -3.280761449e5, -1.566863312e5);
        assert!(angle_between(&moon, &moon_ref) < 0.001);
    }
}
