//! Central body gravity
//!
//! Provides the point mass term and the non-spherical (zonal, tesseral and
//! sectoral) correction of an oblate central body:
//! - Point mass (μ/r²)
//! - Spherical harmonics through degree and order 4, evaluated in the
//!   Earth-fixed frame and rotated back to inertial

use super::harmonics::{legendre_table, HarmonicCoefficients};
use crate::propagation::constants::{EARTH_MU, GEOPOTENTIAL_RADIUS};
use crate::propagation::error::{PropagationError, PropagationResult};
use crate::propagation::frames::{
    fixed_from_inertial, inertial_from_fixed, spherical_from_cartesian,
};
use nalgebra::Vector3;
use satkit::Instant;

/// Oblate central body gravity model
#[derive(Debug, Clone, PartialEq)]
pub struct GravityModel {
    /// Gravitational parameter in km³/s²
    pub mu: f64,

    /// Reference radius of the coefficients in km
    pub radius: f64,

    /// Unnormalized harmonic coefficients
    pub coefficients: HarmonicCoefficients,
}

impl Default for GravityModel {
    fn default() -> Self {
        Self::earth()
    }
}

impl GravityModel {
    /// Create a gravity model from explicit parameters
    pub fn new(mu: f64, radius: f64, coefficients: HarmonicCoefficients) -> Self {
        Self {
            mu,
            radius,
            coefficients,
        }
    }

    /// Earth with the 4×4 EGM field
    pub fn earth() -> Self {
        Self::new(EARTH_MU, GEOPOTENTIAL_RADIUS, HarmonicCoefficients::earth_egm())
    }

    /// Earth as a point mass (no harmonic correction)
    pub fn earth_point_mass() -> Self {
        Self::new(EARTH_MU, GEOPOTENTIAL_RADIUS, HarmonicCoefficients::point_mass())
    }

    /// Check μ and reference radius
    pub fn validate(&self) -> PropagationResult<()> {
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "central body μ must be positive and finite, got {}",
                self.mu
            )));
        }
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "central body radius must be positive and finite, got {}",
                self.radius
            )));
        }
        Ok(())
    }

    /// Point mass acceleration: a = -μ/r³ × r
    pub fn point_mass_acceleration(
        &self,
        position: &Vector3<f64>,
    ) -> PropagationResult<Vector3<f64>> {
        let r = position.norm();
        if r == 0.0 {
            return Err(PropagationError::degenerate(
                "point mass",
                "position has zero magnitude",
            ));
        }
        Ok(-self.mu / (r * r * r) * position)
    }

    /// Inertial acceleration from the non-spherical part of the field
    ///
    /// Partials of the geopotential with respect to radius, geocentric latitude
    /// and longitude are accumulated in the Earth-fixed frame, converted to a
    /// Cartesian gradient there, and rotated back to inertial at `epoch`.
    pub fn potential_acceleration(
        &self,
        epoch: &Instant,
        position: &Vector3<f64>,
    ) -> PropagationResult<Vector3<f64>> {
        let degree = self.coefficients.degree();
        if degree < 2 {
            return Ok(Vector3::zeros());
        }

        let r = position.norm();
        if r == 0.0 {
            return Err(PropagationError::degenerate(
                "harmonics",
                "position has zero magnitude",
            ));
        }

        let fixed = fixed_from_inertial(epoch, position);
        let rho = (fixed.x * fixed.x + fixed.y * fixed.y).sqrt();
        if rho <= f64::EPSILON * r {
            return Err(PropagationError::degenerate(
                "harmonics",
                format!("position {:?} lies on the rotation axis", fixed),
            ));
        }

        let spherical = spherical_from_cartesian(&fixed);
        let longitude = spherical.longitude;
        let latitude = spherical.latitude;
        let p = legendre_table(latitude);
        let tan_phi = latitude.tan();

        let recip_r = 1.0 / r;
        let mu_over_r = self.mu * recip_r;
        let r_ratio = self.radius * recip_r;

        let mut partial_r = 0.0;
        let mut partial_phi = 0.0;
        let mut partial_lambda = 0.0;

        for n in 2..=degree {
            let r_exponent = r_ratio.powi(n as i32);
            for m in 0..=n {
                let (c, s) = self.coefficients.cs(n, m);
                let (sin_ml, cos_ml) = (m as f64 * longitude).sin_cos();
                let cs_term = c * cos_ml + s * sin_ml;

                partial_r += r_exponent * (n + 1) as f64 * p[n][m] * cs_term;
                partial_phi +=
                    r_exponent * (p[n][m + 1] - m as f64 * tan_phi * p[n][m]) * cs_term;
                partial_lambda += r_exponent * m as f64 * p[n][m] * (s * cos_ml - c * sin_ml);
            }
        }

        partial_r *= -recip_r * mu_over_r;
        partial_phi *= mu_over_r;
        partial_lambda *= mu_over_r;

        // Gradient in the fixed frame
        let recip_rho = 1.0 / rho;
        let rz_over_rho = fixed.z * recip_r * recip_r * recip_rho;
        let radial = recip_r * partial_r - rz_over_rho * partial_phi;
        let lon_factor = recip_rho * recip_rho * partial_lambda;

        let accel_fixed = Vector3::new(
            radial * fixed.x - lon_factor * fixed.y,
            radial * fixed.y + lon_factor * fixed.x,
            recip_r * partial_r * fixed.z + rho * recip_r * recip_r * partial_phi,
        );

        Ok(inertial_from_fixed(epoch, &accel_fixed))
    }
}
