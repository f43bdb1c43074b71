//! Propagation error types
//!
//! Every failure in the kernel is caused by its inputs (geometry, tables,
//! configuration), never by transient conditions, so none of these are retried
//! and no partial results are returned alongside them.

use thiserror::Error;

/// Errors raised by the force model, the integrator, or the propagator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropagationError {
    /// Position has zero magnitude, or lies on the rotation axis where the
    /// geopotential longitude terms are undefined.
    #[error("Degenerate geometry in {context}: {message}")]
    DegenerateGeometry { context: String, message: String },

    /// `step_to_epoch` ran out of refinement rounds before reaching its target.
    #[error(
        "Stepping did not converge after {rounds} refinement rounds ({remaining_seconds:e} s remaining)"
    )]
    NonConvergentStepping { rounds: usize, remaining_seconds: f64 },

    /// Malformed coefficient tables, third-body entries, or propagator settings.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

/// Convenience alias for `Result<T, PropagationError>`
pub type PropagationResult<T> = Result<T, PropagationError>;

impl PropagationError {
    /// Creates a [`DegenerateGeometry`](Self::DegenerateGeometry) error.
    pub fn degenerate(context: &str, message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            context: context.to_string(),
            message: message.into(),
        }
    }

    /// Creates an [`InvalidConfiguration`](Self::InvalidConfiguration) error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            message: message.into(),
        }
    }
}
