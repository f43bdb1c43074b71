//! Physical constants
//!
//! All values use kilometers, seconds and radians.

/// Earth's gravitational parameter (GM) in km³/s²
pub const EARTH_MU: f64 = 3.986004418e5;

/// Sun's gravitational parameter (GM) in km³/s²
pub const SUN_MU: f64 = 1.327124400419e11;

/// Moon's gravitational parameter (GM) in km³/s²
pub const MOON_MU: f64 = 4902.800066;

/// Earth's equatorial radius (WGS84) in km
pub const EARTH_RADIUS: f64 = 6378.137;

/// Reference radius of the geopotential coefficients in km
pub const GEOPOTENTIAL_RADIUS: f64 = 6378.1363;

/// Earth's flattening (WGS84)
pub const EARTH_FLATTENING: f64 = 1.0 / 298.257223563;

/// Earth's rotation rate in rad/s
pub const EARTH_ROTATION_RATE: f64 = 7.292115e-5;

/// Solar radiation pressure at 1 AU in N/m²
pub const SUN_P: f64 = 4.56e-6;

/// Obliquity of the ecliptic at J2000 (23.43929111°) in radians
pub const OBLIQUITY_OF_ECLIPTIC: f64 = 23.43929111 * std::f64::consts::PI / 180.0;

/// Sum of the Sun's longitude of ascending node and argument of perigee
/// (282.9400°) in radians, for the low-precision solar theory
pub const SUN_OMEGA_PLUS_OMEGA: f64 = 282.9400 * std::f64::consts::PI / 180.0;

/// Julian date of the J2000.0 epoch
pub const J2000_JD: f64 = 2_451_545.0;

/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: f64 = 36_525.0;
