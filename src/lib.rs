//! Medium-fidelity inertial orbit propagator
//!
//! See [`propagation`] for the force model and the RK4 propagator.

pub mod propagation;

pub use propagation::{
    OrbitState, PropagationError, PropagationResult, PropagationSummary, PropagatorConfig,
    PropagatorState, Rk4Propagator,
};
