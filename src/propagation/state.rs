//! Orbit state representation
//!
//! Provides the immutable epoch/position/velocity bundle that the integrator
//! consumes and produces.

use super::constants::EARTH_RADIUS;
use super::error::{PropagationError, PropagationResult};
use nalgebra::Vector3;
use satkit::Instant;
use std::fmt;

/// Orbit state in the Earth-centered inertial frame
///
/// Fields are private and every accessor returns a copy, so a state handed to
/// (or read back from) a propagator never aliases the propagator's own data.
/// Any change produces a new instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    epoch: Instant,
    position: Vector3<f64>,
    velocity: Vector3<f64>,
}

impl OrbitState {
    /// Create a new orbit state
    ///
    /// # Arguments
    ///
    /// * `epoch` - Time of the state
    /// * `position` - Inertial position in km
    /// * `velocity` - Inertial velocity in km/s
    pub fn new(epoch: Instant, position: Vector3<f64>, velocity: Vector3<f64>) -> Self {
        Self {
            epoch,
            position,
            velocity,
        }
    }

    /// Create a state, rejecting non-finite components
    pub fn try_new(
        epoch: Instant,
        position: Vector3<f64>,
        velocity: Vector3<f64>,
    ) -> PropagationResult<Self> {
        if !position.iter().chain(velocity.iter()).all(|c| c.is_finite()) {
            return Err(PropagationError::invalid_config(format!(
                "orbit state has non-finite components: r = {:?}, v = {:?}",
                position, velocity
            )));
        }
        Ok(Self::new(epoch, position, velocity))
    }

    /// Epoch of this state
    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    /// Inertial position in km
    pub fn position(&self) -> Vector3<f64> {
        self.position
    }

    /// Inertial velocity in km/s
    pub fn velocity(&self) -> Vector3<f64> {
        self.velocity
    }

    /// Distance from the central body's center in km
    pub fn radius(&self) -> f64 {
        self.position.norm()
    }

    /// Height above Earth's equatorial radius in km
    pub fn altitude(&self) -> f64 {
        self.radius() - EARTH_RADIUS
    }

    /// Orbital speed in km/s
    pub fn speed(&self) -> f64 {
        self.velocity.norm()
    }

    /// Specific orbital energy (vis-viva) in km²/s² for central body `mu`
    pub fn specific_energy(&self, mu: f64) -> f64 {
        0.5 * self.velocity.norm_squared() - mu / self.position.norm()
    }

    /// Specific angular momentum vector r × v in km²/s
    pub fn angular_momentum(&self) -> Vector3<f64> {
        self.position.cross(&self.velocity)
    }

    /// Semi-major axis in km (negative for hyperbolic orbits)
    pub fn semi_major_axis(&self, mu: f64) -> f64 {
        -mu / (2.0 * self.specific_energy(mu))
    }

    /// Orbital period in seconds (only valid for elliptical orbits)
    pub fn period(&self, mu: f64) -> Option<f64> {
        let a = self.semi_major_axis(mu);
        if a > 0.0 {
            Some(2.0 * std::f64::consts::PI * (a.powi(3) / mu).sqrt())
        } else {
            None // Hyperbolic or parabolic
        }
    }

    /// Compare epoch, position and velocity independently against tolerances
    pub fn is_close_to(
        &self,
        other: &OrbitState,
        position_tol_km: f64,
        velocity_tol_km_s: f64,
        time_tol_s: f64,
    ) -> bool {
        let dt = (other.epoch - self.epoch).as_seconds().abs();
        let position_close =
            (0..3).all(|i| (self.position[i] - other.position[i]).abs() <= position_tol_km);
        let velocity_close =
            (0..3).all(|i| (self.velocity[i] - other.velocity[i]).abs() <= velocity_tol_km_s);

        dt <= time_tol_s && position_close && velocity_close
    }
}

impl fmt::Display for OrbitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (year, month, day, hour, min, sec) = self.epoch.as_datetime();
        write!(
            f,
            "OrbitState({:04}-{:02}-{:02}T{:02}:{:02}:{:09.6}Z, [{:.6}, {:.6}, {:.6}], [{:.9}, {:.9}, {:.9}])",
            year,
            month,
            day,
            hour,
            min,
            sec,
            self.position.x,
            self.position.y,
            self.position.z,
            self.velocity.x,
            self.velocity.y,
            self.velocity.z
        )
    }
}
