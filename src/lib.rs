//! # SHIELDSIM-RS
//!
//! Radiation shield sizing, two-material mass optimization and Monte Carlo
//! validation.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                          SHIELDSIM-RS                                       │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │  materials      Material values, μ = μ_m·ρ cached at construction           │
//! │  attenuation    exp(-μx), x = -ln(T)/μ, E₂ for isotropic incidence          │
//! │  solver         closed-form single-material design                          │
//! │  optimizer      (t₁, t₂) grid search, min ρ₁t₁ + ρ₂t₂ s.t. T ≤ target       │
//! │  transport      straight-line Monte Carlo transmission estimator            │
//! │  validation     analytic vs Monte Carlo agreement                           │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Data flow:
//!
//! ```text
//! Material ──► attenuation ──► solver / optimizer ──► ShieldDesign
//!                                                          │
//!                               transport ◄── validation ◄─┘
//! ```
//!
//! Every entry point is a pure function of its inputs. The Monte Carlo
//! estimator takes its random source explicitly: a seed for reproducible
//! runs, or OS entropy when none is given.
//!
//! ## Units
//!
//! Lengths in cm, densities in g/cm³, mass coefficients in cm²/g, linear
//! coefficients in 1/cm, areal densities in g/cm².

pub mod constants;
pub mod error;
pub mod types;
pub mod materials;
pub mod attenuation;
pub mod stochastic;
pub mod transport;
pub mod solver;
pub mod optimizer;
pub mod validation;
pub mod config;

// Re-exports
pub use error::{Result, ShieldError};
pub use types::*;
pub use materials::{linear_coefficient_of, AttenuationSpec, Material};
pub use stochastic::{EntropySource, RandomGenerator, UniformSource};
pub use transport::{
    estimate_layered_transmission, estimate_transmission, estimate_transmission_with, Slab,
    StochasticTransportEstimator,
};
pub use solver::solve_single_material;
pub use optimizer::{
    optimize_two_materials, OptimizerConfig, SearchStats, SearchStrategy, TwoMaterialOptimizer,
};
pub use validation::{cross_validate, ValidationReport};
pub use config::ShieldingCase;

/// SHIELDSIM version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Information about the library
pub fn info() -> String {
    format!(
        "SHIELDSIM-RS v{}\n\
         Radiation shielding optimizer with Monte Carlo validation\n\
         Narrow-beam exponential attenuation, no scattering",
        VERSION
    )
}
