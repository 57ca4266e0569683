//! # Cross-Validation
//!
//! Checks an analytic design against an independent Monte Carlo run of
//! the same slab stack.
//!
//! ```text
//! beam:       T = exp(-Σ μᵢxᵢ)
//! isotropic:  T = E₂(Σ μᵢxᵢ)
//! z = (p̂ - T) / σ̂
//! ```
//!
//! When no history (or every history) is transmitted σ̂ vanishes; the
//! estimate then agrees if the analytic value lies within the resolution
//! 1/N of the estimate.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::attenuation;
use crate::error::Result;
use crate::stochastic::source_for;
use crate::transport::{slabs_of, StochasticTransportEstimator};
use crate::types::{IncidenceMode, MonteCarloEstimate, ShieldDesign};

/// Outcome of comparing a design with its Monte Carlo estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValidationReport {
    /// Analytic transmission for the chosen incidence
    pub analytic: f64,
    pub estimate: MonteCarloEstimate,
    /// (p̂ - analytic) / σ̂
    pub z_score: f64,
    /// Agreement band in standard errors
    pub n_sigma: f64,
    pub agrees: bool,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "analytic {:.3e} vs MC {} -> z = {:.2} ({})",
            self.analytic,
            self.estimate,
            self.z_score,
            if self.agrees { "agrees" } else { "DISAGREES" }
        )
    }
}

/// Analytic transmission of a design under the given incidence
pub fn analytic_transmission(design: &ShieldDesign, mode: IncidenceMode) -> f64 {
    let tau = design.optical_thickness();
    match mode {
        IncidenceMode::Beam => (-tau).exp(),
        IncidenceMode::Isotropic => attenuation::exponential_integral_e2(tau),
    }
}

/// Simulate `design` with `samples` histories and compare to the analytic value
pub fn cross_validate(
    design: &ShieldDesign,
    samples: usize,
    mode: IncidenceMode,
    seed: Option<u64>,
    n_sigma: f64,
) -> Result<ValidationReport> {
    let estimator = StochasticTransportEstimator::new(samples, mode)?;
    let mut source = source_for(seed);
    let estimate = estimator.estimate_layered(source.as_mut(), &slabs_of(design))?;

    let report = compare(design, estimate, n_sigma);
    debug!(
        analytic = report.analytic,
        estimate = report.estimate.transmission,
        z = report.z_score,
        agrees = report.agrees,
        "design cross-validated"
    );
    Ok(report)
}

/// Compare an existing estimate with the design's analytic transmission
pub fn compare(
    design: &ShieldDesign,
    estimate: MonteCarloEstimate,
    n_sigma: f64,
) -> ValidationReport {
    let analytic = analytic_transmission(design, estimate.mode);
    let z_score = estimate.z_score(analytic);
    let agrees = if estimate.standard_error > 0.0 {
        z_score.abs() <= n_sigma
    } else {
        (estimate.transmission - analytic).abs() <= 1.0 / estimate.samples as f64
    };

    ValidationReport {
        analytic,
        estimate,
        z_score,
        n_sigma,
        agrees,
    }
}
