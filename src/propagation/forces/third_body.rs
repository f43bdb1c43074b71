//! Third-body gravitational perturbations
//!
//! Point-mass attraction of the Sun, Moon or any other body, expressed as the
//! difference between its pull on the spacecraft and its pull on the Earth.
//!
//! # Ephemeris Options
//!
//! - **Sun / Moon**: built-in analytic series (see `ephemeris`)
//! - **External**: any caller-supplied [`EphemerisSource`]

use crate::propagation::constants::{MOON_MU, SUN_MU};
use crate::propagation::ephemeris::{moon_position, sun_position};
use crate::propagation::error::{PropagationError, PropagationResult};
use nalgebra::Vector3;
use satkit::Instant;
use std::fmt;
use std::sync::Arc;

/// Source of geocentric inertial positions (km) for a perturbing body
pub trait EphemerisSource: Send + Sync + fmt::Debug {
    /// Position of the body at `epoch`
    fn position(&self, epoch: &Instant) -> Vector3<f64>;

    /// Short name for logging
    fn name(&self) -> &str;
}

/// Where a third body's position comes from
#[derive(Debug, Clone)]
pub enum BodyEphemeris {
    /// Built-in analytic Sun
    Sun,
    /// Built-in analytic Moon
    Moon,
    /// Caller-supplied ephemeris
    External(Arc<dyn EphemerisSource>),
}

impl BodyEphemeris {
    pub fn name(&self) -> &str {
        match self {
            Self::Sun => "analytic Sun",
            Self::Moon => "analytic Moon",
            Self::External(source) => source.name(),
        }
    }

    /// Geocentric inertial position in km
    pub fn position(&self, epoch: &Instant) -> Vector3<f64> {
        match self {
            Self::Sun => sun_position(epoch),
            Self::Moon => moon_position(epoch),
            Self::External(source) => source.position(epoch),
        }
    }
}

/// A perturbing body: gravitational parameter plus ephemeris
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub name: String,

    /// Gravitational parameter in km³/s²
    pub mu: f64,

    pub ephemeris: BodyEphemeris,
}

impl CelestialBody {
    pub fn new(name: impl Into<String>, mu: f64, ephemeris: BodyEphemeris) -> Self {
        Self {
            name: name.into(),
            mu,
            ephemeris,
        }
    }

    pub fn sun() -> Self {
        Self::new("Sun", SUN_MU, BodyEphemeris::Sun)
    }

    pub fn moon() -> Self {
        Self::new("Moon", MOON_MU, BodyEphemeris::Moon)
    }

    /// Body position at `epoch`
    pub fn position(&self, epoch: &Instant) -> Vector3<f64> {
        self.ephemeris.position(epoch)
    }

    /// Perturbing acceleration on a spacecraft at `position`
    pub fn acceleration(
        &self,
        epoch: &Instant,
        position: &Vector3<f64>,
    ) -> PropagationResult<Vector3<f64>> {
        third_body_acceleration(position, self.mu, &self.position(epoch))
    }

    pub fn validate(&self) -> PropagationResult<()> {
        if self.name.trim().is_empty() {
            return Err(PropagationError::invalid_config(
                "third body has an empty name",
            ));
        }
        if !(self.mu.is_finite() && self.mu > 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "third body '{}' has invalid μ {}",
                self.name, self.mu
            )));
        }
        Ok(())
    }
}

/// Third-body acceleration
///
/// Uses the standard formula:
/// a = μ_body × ((s - r)/|s - r|³ - s/|s|³)
///
/// where `s` is the body position and `r` the spacecraft position, both
/// geocentric.
pub fn third_body_acceleration(
    position: &Vector3<f64>,
    mu: f64,
    body_position: &Vector3<f64>,
) -> PropagationResult<Vector3<f64>> {
    let s_mag = body_position.norm();
    if s_mag == 0.0 {
        return Err(PropagationError::degenerate(
            "third body",
            "body position coincides with the central body",
        ));
    }

    let sat_to_body = body_position - position;
    let d_mag = sat_to_body.norm();
    if d_mag == 0.0 {
        return Err(PropagationError::degenerate(
            "third body",
            "spacecraft position coincides with the body",
        ));
    }

    let direct = sat_to_body / (d_mag * d_mag * d_mag);
    let indirect = body_position / (s_mag * s_mag * s_mag);

    Ok(mu * (direct - indirect))
}
