//! Configuration helpers for propagation

use super::error::{PropagationError, PropagationResult};
use super::forces::ForceModelConfig;
use super::propagator::{PropagatorConfig, Rk4Propagator};
use std::fmt;
use std::str::FromStr;

/// Runtime-selectable force model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ForceModelChoice {
    /// Point mass, 4×4 harmonics, Sun and Moon
    #[default]
    Full,
    /// Point mass and 4×4 harmonics
    Harmonics,
    /// Point mass only
    TwoBody,
}

impl ForceModelChoice {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Harmonics => "harmonics",
            Self::TwoBody => "two-body",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Full => "Point mass, 4x4 geopotential, Sun and Moon third bodies",
            Self::Harmonics => "Point mass and 4x4 geopotential",
            Self::TwoBody => "Point mass only",
        }
    }

    pub fn all() -> &'static [ForceModelChoice] {
        &[
            ForceModelChoice::Full,
            ForceModelChoice::Harmonics,
            ForceModelChoice::TwoBody,
        ]
    }

    pub fn build(&self) -> ForceModelConfig {
        match self {
            Self::Full => ForceModelConfig::default(),
            Self::Harmonics => ForceModelConfig::harmonics_only(),
            Self::TwoBody => ForceModelConfig::two_body(),
        }
    }
}

impl fmt::Display for ForceModelChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ForceModelChoice {
    type Err = PropagationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|choice| choice.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                let names: Vec<&str> = Self::all().iter().map(|c| c.name()).collect();
                PropagationError::invalid_config(format!(
                    "unknown force model '{}', expected one of: {}",
                    s,
                    names.join(", ")
                ))
            })
    }
}

/// Force model selection plus propagator configuration
#[derive(Debug, Clone, Default)]
pub struct PropagationSettings {
    pub forces: ForceModelChoice,
    pub config: PropagatorConfig,
}

impl PropagationSettings {
    /// Override the maximum (and default) step size
    pub fn with_max_step(mut self, seconds: f64) -> Self {
        self.config.max_step_seconds = seconds;
        self.config.default_step_seconds = seconds;
        self
    }

    pub fn build_propagator(&self) -> PropagationResult<Rk4Propagator> {
        Rk4Propagator::new(self.forces.build(), self.config.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::propagation::forces::ForceModel;

    #[test]
    fn test_parse_names() {
        for choice in ForceModelChoice::all() {
            assert_eq!(choice.name().parse::<ForceModelChoice>().unwrap(), *choice);
        }
        assert_eq!("Two-Body".parse::<ForceModelChoice>().unwrap(), ForceModelChoice::TwoBody);
        assert!("drag".parse::<ForceModelChoice>().is_err());
    }

    #[test]
    fn test_build_matches_choice() {
        assert_eq!(ForceModelChoice::TwoBody.build().third_bodies.len(), 0);
        assert_eq!(ForceModelChoice::Harmonics.build().central_body.coefficients.degree(), 4);
        assert_eq!(ForceModelChoice::Full.build().name(), "Full (harmonics + third bodies)");
    }

    #[test]
    fn test_settings_build_propagator() {
        let settings = PropagationSettings::default().with_max_step(120.0);
        let propagator = settings.build_propagator().unwrap();
        assert_eq!(propagator.config().max_step_seconds, 120.0);

        let invalid = PropagationSettings::default().with_max_step(-5.0);
        assert!(invalid.build_propagator().is_err());
    }
}
