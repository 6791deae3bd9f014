use std::fmt;

use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Settings for value iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Sweeps stop once the sup-norm change between tables drops below this.
    pub eps: f64,
    /// Upper bound on the number of sweeps.
    pub max_iters: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            eps: 0.01,
            max_iters: 10_000,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Check that `eps` is finite and positive and `max_iters` is nonzero.
    pub fn validate(&self) -> Result<(), SolverConfigError> {
        if !self.eps.is_finite() || self.eps <= 0.0 {
            return Err(SolverConfigError::Invalid(
                "eps must be finite and > 0".to_string(),
            ));
        }
        if self.max_iters == 0 {
            return Err(SolverConfigError::Invalid(
                "max_iters must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {}
