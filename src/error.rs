//! # Error Types
//!
//! Every validation failure is raised at the offending input, before any
//! computation starts. `NoFeasibleSolution` is an expected outcome of the
//! two-material search and is kept distinct from a zero-thickness design.

use thiserror::Error;

/// Errors produced by the shielding core
#[derive(Error, Debug)]
pub enum ShieldError {
    /// Transmission target outside (0, 1] or not finite
    #[error("invalid transmission target {value}: must lie in (0, 1]")]
    InvalidTarget { value: f64 },

    /// Material without a usable coefficient, or with a negative/non-finite property
    #[error("invalid material '{name}': {reason}")]
    InvalidMaterial { name: String, reason: String },

    /// Monte Carlo run requested with no particles
    #[error("invalid sample count {value}: at least one particle is required")]
    InvalidSampleCount { value: usize },

    /// Linear coefficient that must be strictly positive is not
    #[error("invalid linear attenuation coefficient {value}: must be finite and > 0")]
    InvalidCoefficient { value: f64 },

    /// Negative or non-finite slab thickness
    #[error("invalid thickness {value}: must be finite and >= 0")]
    InvalidThickness { value: f64 },

    /// Degenerate search grid
    #[error("invalid search grid: {reason}")]
    InvalidGrid { reason: String },

    /// Grid search found no combination meeting the target
    #[error(
        "no thickness combination within {max_thickness1} x {max_thickness2} \
         reaches transmission <= {target}"
    )]
    NoFeasibleSolution {
        target: f64,
        max_thickness1: f64,
        max_thickness2: f64,
    },

    /// Study configuration could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),
}

impl ShieldError {
    /// True when the error is the search's "not found" outcome rather than bad input
    pub fn is_no_feasible_solution(&self) -> bool {
        matches!(self, ShieldError::NoFeasibleSolution { .. })
    }

    pub(crate) fn material(name: &str, reason: impl Into<String>) -> Self {
        ShieldError::InvalidMaterial {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for ShieldError {
    fn from(err: std::io::Error) -> Self {
        ShieldError::Config(err.to_string())
    }
}

impl From<toml::de::Error> for ShieldError {
    fn from(err: toml::de::Error) -> Self {
        ShieldError::Config(err.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, ShieldError>;
