//! # Numerical Constants
//!
//! Defaults and tolerances shared by the solvers. Lengths are in cm,
//! densities in g/cm³, mass coefficients in cm²/g.

// ============================================================================
// STATISTICS
// ============================================================================

/// Two-sided 95% normal quantile
pub const Z_95: f64 = 1.959_963_984_540_054;

/// Default agreement band for Monte Carlo cross-checks (standard errors)
pub const DEFAULT_N_SIGMA: f64 = 4.0;

/// Default number of particle histories
pub const DEFAULT_SAMPLES: usize = 200_000;

// ============================================================================
// SEARCH GRID DEFAULTS
// ============================================================================

/// Default maximum thickness searched per material (cm)
pub const DEFAULT_MAX_THICKNESS: f64 = 50.0;

/// Default number of grid points per material
pub const DEFAULT_STEPS: usize = 201;

// ============================================================================
// SPECIAL FUNCTIONS
// ============================================================================

/// Euler–Mascheroni constant γ
pub const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Convergence tolerance for series / continued fractions
pub const SERIES_EPS: f64 = 1e-15;

/// Iteration cap for series / continued fractions
pub const SERIES_MAX_ITER: usize = 200;

/// Smallest representable magnitude used to seed Lentz's method
pub const TINY: f64 = 1e-300;

/// Density assumed for a study material given only a linear coefficient (g/cm³)
pub const DEFAULT_DENSITY: f64 = 1.0;

// ============================================================================
// ILLUSTRATIVE MATERIAL DATA (~1 MeV photons)
// ============================================================================

/// Lead density (g/cm³)
pub const LEAD_DENSITY: f64 = 11.34;

/// Lead mass attenuation coefficient (cm²/g)
pub const LEAD_MU_MASS: f64 = 0.044;

/// Ordinary concrete density (g/cm³)
pub const CONCRETE_DENSITY: f64 = 2.3;

/// Ordinary concrete mass attenuation coefficient (cm²/g)
pub const CONCRETE_MU_MASS: f64 = 0.035;

/// Water density (g/cm³)
pub const WATER_DENSITY: f64 = 1.0;

/// Water mass attenuation coefficient (cm²/g)
pub const WATER_MU_MASS: f64 = 0.034;
