//! Orbital propagation module
//!
//! Medium-fidelity numerical propagation of Earth-orbiting spacecraft:
//! fixed-step Runge-Kutta 4 integration driven by a force model made of
//! point-mass Earth gravity, a 4×4 spherical-harmonic geopotential, and
//! analytic Sun/Moon third-body perturbations.
//!
//! Units are km, s and rad throughout; positions and velocities are in an
//! Earth-centered inertial frame.
//!
//! # Example
//!
//! ```ignore
//! use mefi_propagator::propagation::*;
//!
//! let propagator = Rk4Propagator::with_defaults()?;
//! let state = propagator.initial_state(OrbitState::new(epoch, position, velocity));
//!
//! let summary = propagator.step_to_epoch(state, target_epoch)?;
//! println!("{}", summary.state.orbit);
//! ```

pub mod constants;
pub mod ephemeris;
mod error;
pub mod forces;
pub mod frames;
pub mod integrator;
mod propagator;
pub mod settings;
mod state;

pub use error::{PropagationError, PropagationResult};
pub use forces::{
    acceleration, BodyEphemeris, CelestialBody, EphemerisSource, ForceModel, ForceModelConfig,
    GravityModel, HarmonicCoefficients,
};
pub use integrator::{Integrator, RungeKutta4};
pub use propagator::{PropagationSummary, PropagatorConfig, PropagatorState, Rk4Propagator};
pub use settings::{ForceModelChoice, PropagationSettings};
pub use state::OrbitState;
