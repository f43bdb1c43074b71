//! Fixed-step RK4 orbit propagator
//!
//! Drives a [`ForceModel`] through the Runge-Kutta 4 integrator. The
//! propagator itself holds only immutable configuration; the evolving
//! trajectory lives in a [`PropagatorState`] value that is passed in and
//! returned by every stepping call.

use super::error::{PropagationError, PropagationResult};
use super::forces::{ForceModel, ForceModelConfig};
use super::integrator::{Integrator, RungeKutta4};
use super::state::OrbitState;
use nalgebra::Vector3;
use satkit::{Duration, Instant};

/// Propagator configuration
#[derive(Clone, Debug, PartialEq)]
pub struct PropagatorConfig {
    /// Step size given to new propagator states (seconds)
    pub default_step_seconds: f64,

    /// Largest step `step_to_epoch` may take (seconds)
    pub max_step_seconds: f64,

    /// `step_to_epoch` stops once within this many seconds of the target
    pub epoch_tolerance_seconds: f64,

    /// Maximum number of correction passes in `step_to_epoch`
    pub max_refinement_rounds: usize,
}

impl Default for PropagatorConfig {
    fn default() -> Self {
        Self {
            default_step_seconds: 300.0, // 5 minutes
            max_step_seconds: 300.0,
            epoch_tolerance_seconds: 1e-6,
            max_refinement_rounds: 8,
        }
    }
}

impl PropagatorConfig {
    /// Quick propagation settings (lower accuracy, faster)
    pub fn fast() -> Self {
        Self {
            default_step_seconds: 600.0,
            max_step_seconds: 600.0,
            ..Default::default()
        }
    }

    /// High-precision settings
    pub fn high_precision() -> Self {
        Self {
            default_step_seconds: 60.0,
            max_step_seconds: 60.0,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> PropagationResult<()> {
        if !(self.max_step_seconds.is_finite() && self.max_step_seconds > 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "max step must be positive and finite, got {}",
                self.max_step_seconds
            )));
        }
        if !(self.default_step_seconds.is_finite() && self.default_step_seconds != 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "default step must be non-zero and finite, got {}",
                self.default_step_seconds
            )));
        }
        if !(self.epoch_tolerance_seconds.is_finite() && self.epoch_tolerance_seconds >= 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "epoch tolerance must be non-negative and finite, got {}",
                self.epoch_tolerance_seconds
            )));
        }
        if self.max_refinement_rounds == 0 {
            return Err(PropagationError::invalid_config(
                "at least one refinement round is required",
            ));
        }
        Ok(())
    }
}

/// Orbit state plus the signed step size used by [`Rk4Propagator::step`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagatorState {
    pub orbit: OrbitState,

    /// Step size in seconds; negative steps propagate backward
    pub step_size: f64,
}

impl PropagatorState {
    pub fn new(orbit: OrbitState, step_size: f64) -> Self {
        Self { orbit, step_size }
    }

    /// Current epoch
    pub fn epoch(&self) -> Instant {
        self.orbit.epoch()
    }
}

/// Result of [`Rk4Propagator::step_to_epoch`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropagationSummary {
    /// Final state, carrying the caller's original step size
    pub state: PropagatorState,

    /// Total number of integration steps taken
    pub steps_taken: usize,

    /// Number of passes that took at least one step
    pub refinement_rounds: usize,
}

/// Fixed-step RK4 propagator
///
/// Shareable between threads when the force model is; independent
/// trajectories only need their own [`PropagatorState`].
#[derive(Debug, Clone)]
pub struct Rk4Propagator<F: ForceModel = ForceModelConfig> {
    force_model: F,
    config: PropagatorConfig,
    integrator: RungeKutta4,
}

impl Rk4Propagator<ForceModelConfig> {
    /// Full force model with default configuration
    pub fn with_defaults() -> PropagationResult<Self> {
        Self::new(ForceModelConfig::default(), PropagatorConfig::default())
    }
}

impl<F: ForceModel> Rk4Propagator<F> {
    /// Create a propagator, validating the force model and configuration
    pub fn new(force_model: F, config: PropagatorConfig) -> PropagationResult<Self> {
        config.validate()?;
        force_model.validate()?;
        let integrator = RungeKutta4::new();
        log::debug!(
            "{} propagator ready (order {}, {} stages): forces = {}, max step = {} s",
            integrator.name(),
            integrator.order(),
            integrator.stages(),
            force_model.name(),
            config.max_step_seconds
        );
        Ok(Self {
            force_model,
            config,
            integrator,
        })
    }

    pub fn config(&self) -> &PropagatorConfig {
        &self.config
    }

    pub fn force_model(&self) -> &F {
        &self.force_model
    }

    /// Wrap an orbit state with the configured default step size
    pub fn initial_state(&self, orbit: OrbitState) -> PropagatorState {
        PropagatorState::new(orbit, self.config.default_step_seconds)
    }

    /// Take one RK4 step of `state.step_size` seconds
    pub fn step(&self, state: PropagatorState) -> PropagationResult<PropagatorState> {
        let h = state.step_size;
        if !(h.is_finite() && h != 0.0) {
            return Err(PropagationError::invalid_config(format!(
                "step size must be non-zero and finite, got {}",
                h
            )));
        }

        let forces = &self.force_model;
        let derivatives =
            |s: &OrbitState| -> PropagationResult<(Vector3<f64>, Vector3<f64>)> {
                let accel = forces.acceleration(&s.epoch(), &s.position())?;
                Ok((s.velocity(), accel))
            };

        let orbit = self.integrator.step(&state.orbit, h, &derivatives)?;
        log::trace!("RK4 step of {} s -> {}", h, orbit);

        Ok(PropagatorState::new(orbit, h))
    }

    /// Take `count` consecutive steps
    pub fn step_n(
        &self,
        state: PropagatorState,
        count: usize,
    ) -> PropagationResult<PropagatorState> {
        let mut current = state;
        for _ in 0..count {
            current = self.step(current)?;
        }
        Ok(current)
    }

    /// Propagate to `target`, forward or backward
    ///
    /// Each pass splits the remaining interval into `ceil(|Δt| / max_step)`
    /// equal steps. Passes repeat until the epoch is within tolerance of the
    /// target, up to `max_refinement_rounds`.
    pub fn step_to_epoch(
        &self,
        state: PropagatorState,
        target: Instant,
    ) -> PropagationResult<PropagationSummary> {
        let original_step = state.step_size;
        let mut orbit = state.orbit;
        let mut steps_taken = 0;
        let mut rounds = 0;

        loop {
            let remaining = (target - orbit.epoch()).as_seconds();
            if remaining.abs() <= self.config.epoch_tolerance_seconds {
                return Ok(PropagationSummary {
                    state: PropagatorState::new(orbit, original_step),
                    steps_taken,
                    refinement_rounds: rounds,
                });
            }

            if rounds == self.config.max_refinement_rounds {
                log::warn!(
                    "step_to_epoch gave up after {} rounds, {} s from target",
                    rounds,
                    remaining
                );
                return Err(PropagationError::NonConvergentStepping {
                    rounds,
                    remaining_seconds: remaining,
                });
            }

            let n = (remaining.abs() / self.config.max_step_seconds).ceil().max(1.0) as usize;
            let h = remaining / n as f64;
            rounds += 1;
            log::debug!(
                "Round {}: {} s remaining, {} steps of {} s",
                rounds,
                remaining,
                n,
                h
            );

            orbit = self.step_n(PropagatorState::new(orbit, h), n)?.orbit;
            steps_taken += n;
        }
    }

    /// Propagate for a signed duration
    pub fn propagate_by(
        &self,
        state: PropagatorState,
        duration: Duration,
    ) -> PropagationResult<PropagationSummary> {
        let target = state.epoch() + duration;
        self.step_to_epoch(state, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::constants::EARTH_MU;

    /// No forces: straight-line motion
    struct FreeSpace;

    impl ForceModel for FreeSpace {
        fn acceleration(
            &self,
            _epoch: &Instant,
            _position: &Vector3<f64>,
        ) -> PropagationResult<Vector3<f64>> {
            Ok(Vector3::zeros())
        }

        fn name(&self) -> &str {
            "Free space"
        }
    }

    fn epoch() -> Instant {
        Instant::from_datetime(2022, 12, 20, 0, 0, 0.0).unwrap()
    }

    fn leo() -> OrbitState {
        OrbitState::new(
            epoch(),
            Vector3::new(6778.0, 0.0, 0.0),
            Vector3::new(0.0, 5.4, 5.4),
        )
    }

    fn two_body(config: PropagatorConfig) -> Rk4Propagator {
        Rk4Propagator::new(ForceModelConfig::two_body(), config).unwrap()
    }

    #[test]
    fn test_two_body_conserves_energy_and_momentum() {
        let propagator = two_body(PropagatorConfig::high_precision());
        let orbit = OrbitState::new(
            epoch(),
            Vector3::new(7000.0, 0.0, 0.0),
            Vector3::new(0.0, 7.5, 1.0),
        );
        let period = orbit.period(EARTH_MU).unwrap();

        let summary = propagator
            .propagate_by(propagator.initial_state(orbit), Duration::from_seconds(period))
            .unwrap();
        let end = summary.state.orbit;

        let e0 = orbit.specific_energy(EARTH_MU);
        let e1 = end.specific_energy(EARTH_MU);
        assert!(((e1 - e0) / e0).abs() < 1e-6, "energy drift {}", (e1 - e0) / e0);

        let h0 = orbit.angular_momentum();
        let h1 = end.angular_momentum();
        assert!((h1 - h0).norm() / h0.norm() < 1e-6);

        // Back where it started after one period
        assert!((end.position() - orbit.position()).norm() < 0.1);
        assert!(summary.steps_taken >= 98);
    }

    #[test]
    fn test_forward_backward_symmetry() {
        let propagator = Rk4Propagator::with_defaults().unwrap();
        let start = PropagatorState::new(leo(), 30.0);

        let forward = propagator.step_n(start, 60).unwrap();
        assert!(((forward.epoch() - start.epoch()).as_seconds() - 1800.0).abs() < 1e-6);

        let back = propagator
            .step_n(PropagatorState::new(forward.orbit, -30.0), 60)
            .unwrap();
        assert!(back.orbit.is_close_to(&start.orbit, 1e-3, 1e-6, 1e-6));
    }

    #[test]
    fn test_step_to_epoch_is_idempotent() {
        let propagator = Rk4Propagator::with_defaults().unwrap();
        let target = epoch() + Duration::from_seconds(3600.0);

        let first = propagator
            .step_to_epoch(propagator.initial_state(leo()), target)
            .unwrap();
        assert_eq!(first.steps_taken, 12);
        assert!(first.refinement_rounds >= 1);

        let second = propagator.step_to_epoch(first.state, target).unwrap();
        assert_eq!(second.steps_taken, 0);
        assert_eq!(second.refinement_rounds, 0);
        assert_eq!(second.state, first.state);
    }

    #[test]
    fn test_step_size_is_restored() {
        let propagator = Rk4Propagator::with_defaults().unwrap();
        let state = PropagatorState::new(leo(), 123.0);

        let summary = propagator
            .propagate_by(state, Duration::from_seconds(1000.0))
            .unwrap();
        assert_eq!(summary.state.step_size, 123.0);
        assert!(((summary.state.epoch() - state.epoch()).as_seconds() - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_backward_to_epoch() {
        // RK4 round-trip error scales with h⁵; 30 s keeps a 2400 s round trip under 1 m
        let config = PropagatorConfig {
            default_step_seconds: 30.0,
            max_step_seconds: 30.0,
            ..Default::default()
        };
        let propagator = Rk4Propagator::new(ForceModelConfig::default(), config).unwrap();
        let start = propagator.initial_state(leo());

        let ahead = propagator
            .propagate_by(start, Duration::from_seconds(2400.0))
            .unwrap();
        let back = propagator.step_to_epoch(ahead.state, epoch()).unwrap();

        assert_eq!(ahead.steps_taken, 80);
        assert!(back.state.orbit.is_close_to(&start.orbit, 1e-3, 1e-6, 1e-6));
    }

    #[test]
    fn test_custom_force_model() {
        let propagator = Rk4Propagator::new(FreeSpace, PropagatorConfig::default()).unwrap();
        let state = propagator.initial_state(leo());

        let summary = propagator
            .propagate_by(state, Duration::from_seconds(900.0))
            .unwrap();
        let expected = leo().position() + leo().velocity() * 900.0;
        assert!((summary.state.orbit.position() - expected).norm() < 1e-9);
        assert_eq!(summary.state.orbit.velocity(), leo().velocity());
    }

    #[test]
    fn test_non_convergent_stepping() {
        // 1000 s in thirds cannot land exactly on the target with zero tolerance
        let config = PropagatorConfig {
            max_step_seconds: 400.0,
            epoch_tolerance_seconds: 0.0,
            max_refinement_rounds: 1,
            ..Default::default()
        };
        let propagator = Rk4Propagator::new(FreeSpace, config).unwrap();
        let target = epoch() + Duration::from_seconds(1000.0);

        let result = propagator.step_to_epoch(propagator.initial_state(leo()), target);
        match result {
            Err(PropagationError::NonConvergentStepping {
                rounds,
                remaining_seconds,
            }) => {
                assert_eq!(rounds, 1);
                assert!(remaining_seconds != 0.0 && remaining_seconds.abs() < 1e-3);
            }
            other => panic!("expected non-convergence, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_configuration() {
        let bad = [
            PropagatorConfig {
                max_step_seconds: 0.0,
                ..Default::default()
            },
            PropagatorConfig {
                epoch_tolerance_seconds: -1.0,
                ..Default::default()
            },
            PropagatorConfig {
                max_refinement_rounds: 0,
                ..Default::default()
            },
            PropagatorConfig {
                default_step_seconds: f64::NAN,
                ..Default::default()
            },
        ];
        for config in bad {
            assert!(matches!(
                Rk4Propagator::new(FreeSpace, config),
                Err(PropagationError::InvalidConfiguration { .. })
            ));
        }

        let propagator = Rk4Propagator::new(FreeSpace, PropagatorConfig::default()).unwrap();
        let result = propagator.step(PropagatorState::new(leo(), 0.0));
        assert!(matches!(
            result,
            Err(PropagationError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_shared_between_threads() {
        let propagator = Rk4Propagator::with_defaults().unwrap();
        let target = epoch() + Duration::from_seconds(1200.0);

        let results: Vec<OrbitState> = std::thread::scope(|scope| {
            let handles: Vec<_> = (0..2)
                .map(|_| {
                    let propagator = &propagator;
                    scope.spawn(move || {
                        propagator
                            .step_to_epoch(propagator.initial_state(leo()), target)
                            .unwrap()
                            .state
                            .orbit
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results[0], results[1]);
    }
}
