//! Force models for orbital mechanics
//!
//! # Architecture
//!
//! Each force model implements the `ForceModel` trait, which computes the
//! inertial acceleration on a spacecraft at a given epoch and position.
//!
//! `ForceModelConfig` is the standard implementation. It sums:
//!
//! - **Point mass**: central body μ/r²
//! - **Third bodies**: Sun, Moon or caller-supplied perturbers
//! - **Harmonics**: 4×4 geopotential correction of the central body
//!
//! Solar radiation pressure and drag parameters are carried on the config
//! but contribute no acceleration.

mod gravity;
pub mod harmonics;
mod third_body;

pub use gravity::GravityModel;
pub use harmonics::{HarmonicCoefficients, MAX_DEGREE};
pub use third_body::{third_body_acceleration, BodyEphemeris, CelestialBody, EphemerisSource};

use crate::propagation::error::PropagationResult;
use nalgebra::Vector3;
use satkit::Instant;

/// Trait for acceleration models driving the propagator
///
/// Implementations are evaluated concurrently by independent propagations and
/// must not carry mutable state.
pub trait ForceModel: Send + Sync {
    /// Compute the total inertial acceleration
    ///
    /// # Arguments
    ///
    /// * `epoch` - Evaluation time
    /// * `position` - Inertial position in km
    ///
    /// # Returns
    ///
    /// Acceleration in km/s², or an error for degenerate geometry
    fn acceleration(&self, epoch: &Instant, position: &Vector3<f64>)
        -> PropagationResult<Vector3<f64>>;

    /// Force model name for debugging and logging
    fn name(&self) -> &str;

    /// Check parameters before a propagator accepts the model
    fn validate(&self) -> PropagationResult<()> {
        Ok(())
    }
}

/// Complete force model: central body, third bodies and spacecraft parameters
#[derive(Debug, Clone)]
pub struct ForceModelConfig {
    /// Central body gravity (point mass + harmonics)
    pub central_body: GravityModel,

    /// Perturbing bodies; contributions are summed, order is irrelevant
    pub third_bodies: Vec<CelestialBody>,

    /// Solar radiation pressure area (m²)
    pub srp_area: f64,

    /// Solar radiation pressure coefficient
    pub srp_cr: f64,

    /// Drag reference area (m²)
    pub drag_area: f64,

    /// Drag coefficient
    pub drag_cd: f64,
}

impl Default for ForceModelConfig {
    fn default() -> Self {
        Self {
            central_body: GravityModel::earth(),
            third_bodies: vec![CelestialBody::moon(), CelestialBody::sun()],
            srp_area: 17.0,
            srp_cr: 1.8,
            drag_area: 17.0,
            drag_cd: 2.2,
        }
    }
}

impl ForceModelConfig {
    /// Earth point mass only
    pub fn two_body() -> Self {
        Self {
            central_body: GravityModel::earth_point_mass(),
            third_bodies: Vec::new(),
            ..Self::default()
        }
    }

    /// Earth point mass and 4×4 harmonics, no third bodies
    pub fn harmonics_only() -> Self {
        Self {
            third_bodies: Vec::new(),
            ..Self::default()
        }
    }

    /// Add a perturbing body
    pub fn with_third_body(mut self, body: CelestialBody) -> Self {
        log::debug!("Adding third body: {} ({})", body.name, body.ephemeris.name());
        self.third_bodies.push(body);
        self
    }

    /// Replace the central body
    pub fn with_central_body(mut self, central_body: GravityModel) -> Self {
        self.central_body = central_body;
        self
    }

    /// Check central body and every third body
    pub fn validate(&self) -> PropagationResult<()> {
        self.central_body.validate()?;
        for body in &self.third_bodies {
            body.validate()?;
        }
        log::debug!(
            "Force model validated: degree {} harmonics, {} third bodies",
            self.central_body.coefficients.degree(),
            self.third_bodies.len()
        );
        Ok(())
    }

    /// Compute acceleration with individual contributions for debugging
    pub fn acceleration_breakdown(
        &self,
        epoch: &Instant,
        position: &Vector3<f64>,
    ) -> PropagationResult<Vec<(String, Vector3<f64>)>> {
        let mut parts = Vec::with_capacity(self.third_bodies.len() + 2);
        parts.push((
            "Point mass".to_string(),
            self.central_body.point_mass_acceleration(position)?,
        ));
        for body in &self.third_bodies {
            parts.push((body.name.clone(), body.acceleration(epoch, position)?));
        }
        parts.push((
            "Harmonics".to_string(),
            self.central_body.potential_acceleration(epoch, position)?,
        ));

        for (name, accel) in &parts {
            log::trace!("{}: |a| = {:e} km/s²", name, accel.norm());
        }
        Ok(parts)
    }
}

impl ForceModel for ForceModelConfig {
    fn acceleration(
        &self,
        epoch: &Instant,
        position: &Vector3<f64>,
    ) -> PropagationResult<Vector3<f64>> {
        acceleration(epoch, position, self)
    }

    fn name(&self) -> &str {
        match (self.central_body.coefficients.degree() >= 2, self.third_bodies.is_empty()) {
            (true, false) => "Full (harmonics + third bodies)",
            (true, true) => "Harmonics",
            (false, false) => "Point mass + third bodies",
            (false, true) => "Two-body",
        }
    }

    fn validate(&self) -> PropagationResult<()> {
        ForceModelConfig::validate(self)
    }
}

/// Total inertial acceleration at `position` and `epoch` under `config`
pub fn acceleration(
    epoch: &Instant,
    position: &Vector3<f64>,
    config: &ForceModelConfig,
) -> PropagationResult<Vector3<f64>> {
    let mut accel = config.central_body.point_mass_acceleration(position)?;
    for body in &config.third_bodies {
        accel += body.acceleration(epoch, position)?;
    }
    accel += config.central_body.potential_acceleration(epoch, position)?;
    Ok(accel)
}
