//! Numerical integrators for orbit propagation
//!
//! A trait-based abstraction over a single fixed step of the coupled system
//! `dr/dt = v`, `dv/dt = a(t, r)`, so the propagator can be driven by any
//! explicit scheme.
//!
//! # Available Integrators
//!
//! - **RungeKutta4**: classical fourth-order Runge-Kutta

use super::error::PropagationResult;
use super::state::OrbitState;
use nalgebra::Vector3;
use satkit::Duration;

/// Derivative function: state → (dr/dt, dv/dt)
pub type Derivatives<'a> =
    &'a dyn Fn(&OrbitState) -> PropagationResult<(Vector3<f64>, Vector3<f64>)>;

/// Trait for fixed-step numerical integrators
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` so a propagator can be shared
/// between threads.
pub trait Integrator: Send + Sync {
    /// Advance `state` by `dt` seconds (negative for backward)
    fn step(
        &self,
        state: &OrbitState,
        dt: f64,
        derivatives: Derivatives<'_>,
    ) -> PropagationResult<OrbitState>;

    /// Integrator name
    fn name(&self) -> &'static str;

    /// Integrator order
    fn order(&self) -> u8;

    /// Number of derivative evaluations per step
    fn stages(&self) -> usize;
}

/// Classical Runge-Kutta 4
#[derive(Debug, Clone, Copy, Default)]
pub struct RungeKutta4;

impl RungeKutta4 {
    pub fn new() -> Self {
        Self
    }
}

impl Integrator for RungeKutta4 {
    fn step(
        &self,
        state: &OrbitState,
        dt: f64,
        derivatives: Derivatives<'_>,
    ) -> PropagationResult<OrbitState> {
        let epoch = state.epoch();
        let r0 = state.position();
        let v0 = state.velocity();
        let half = dt / 2.0;
        // Epochs are rounded to the `Instant` tick while positions use the exact
        // `dt`; `step_to_epoch` absorbs the residual in a later pass.
        let mid_epoch = epoch + Duration::from_seconds(half);
        let end_epoch = epoch + Duration::from_seconds(dt);

        let (v1, a1) = derivatives(state)?;

        let s2 = OrbitState::new(mid_epoch, r0 + v1 * half, v0 + a1 * half);
        let (v2, a2) = derivatives(&s2)?;

        let s3 = OrbitState::new(mid_epoch, r0 + v2 * half, v0 + a2 * half);
        let (v3, a3) = derivatives(&s3)?;

        let s4 = OrbitState::new(end_epoch, r0 + v3 * dt, v0 + a3 * dt);
        let (v4, a4) = derivatives(&s4)?;

        let new_pos = r0 + (v1 + 2.0 * v2 + 2.0 * v3 + v4) * (dt / 6.0);
        let new_vel = v0 + (a1 + 2.0 * a2 + 2.0 * a3 + a4) * (dt / 6.0);

        Ok(OrbitState::new(end_epoch, new_pos, new_vel))
    }

    fn name(&self) -> &'static str {
        "Runge-Kutta 4"
    }

    fn order(&self) -> u8 {
        4
    }

    fn stages(&self) -> usize {
        4
    }
}
