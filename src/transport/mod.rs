//! # Stochastic Transport Module
//!
//! Monte Carlo estimate of uncollided transmission through a slab.
//!
//! ## Theory
//!
//! Free path lengths in a non-scattering medium are exponentially
//! distributed with rate μ. Inverse-CDF sampling gives
//!
//! ```text
//! s = -ln(U) / μ,   U ~ Uniform(0, 1)
//! ```
//!
//! A particle entering with direction cosine μ_d penetrates to depth
//! `s · μ_d`; it is transmitted when that depth exceeds the slab thickness.
//! Beam incidence fixes μ_d = 1, isotropic incidence draws μ_d ~ U(0, 1).
//!
//! The transmitted fraction p̂ = k/N is unbiased with binomial standard
//! error √(p̂(1-p̂)/N), so accuracy improves as O(1/√N).
//!
//! For a stack of slabs the memoryless property lets each layer resample a
//! fresh free path at its entrance; the direction cosine is fixed per
//! history since nothing scatters.

use tracing::debug;

use crate::error::{Result, ShieldError};
use crate::stochastic::{source_for, UniformSource};
use crate::types::{IncidenceMode, MonteCarloEstimate, ShieldDesign};

// ============================================================================
// SLAB GEOMETRY
// ============================================================================

/// Homogeneous slab seen by the estimator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slab {
    /// Linear attenuation coefficient [1/cm]
    pub linear_coefficient: f64,
    /// Thickness [cm]
    pub thickness: f64,
}

impl Slab {
    pub fn new(linear_coefficient: f64, thickness: f64) -> Self {
        Self {
            linear_coefficient,
            thickness,
        }
    }

    fn validate(&self) -> Result<()> {
        if !(self.linear_coefficient.is_finite() && self.linear_coefficient >= 0.0) {
            return Err(ShieldError::InvalidCoefficient {
                value: self.linear_coefficient,
            });
        }
        validate_thickness(self.thickness)
    }
}

/// The slabs of a solved design, source side first
pub fn slabs_of(design: &ShieldDesign) -> Vec<Slab> {
    design
        .layers
        .iter()
        .map(|l| Slab::new(l.linear_coefficient, l.thickness))
        .collect()
}

fn validate_thickness(thickness: f64) -> Result<()> {
    if thickness.is_finite() && thickness >= 0.0 {
        Ok(())
    } else {
        Err(ShieldError::InvalidThickness { value: thickness })
    }
}

// ============================================================================
// ESTIMATOR
// ============================================================================

/// Straight-line Monte Carlo transmission estimator
#[derive(Debug, Clone, Copy)]
pub struct StochasticTransportEstimator {
    samples: usize,
    mode: IncidenceMode,
}

impl StochasticTransportEstimator {
    pub fn new(samples: usize, mode: IncidenceMode) -> Result<Self> {
        if samples == 0 {
            return Err(ShieldError::InvalidSampleCount { value: samples });
        }
        Ok(Self { samples, mode })
    }

    pub fn samples(&self) -> usize {
        self.samples
    }

    pub fn mode(&self) -> IncidenceMode {
        self.mode
    }

    /// Transmission through a single slab
    pub fn estimate<S>(
        &self,
        source: &mut S,
        linear_coefficient: f64,
        thickness: f64,
    ) -> Result<MonteCarloEstimate>
    where
        S: UniformSource + ?Sized,
    {
        if !(linear_coefficient.is_finite() && linear_coefficient > 0.0) {
            return Err(ShieldError::InvalidCoefficient {
                value: linear_coefficient,
            });
        }
        validate_thickness(thickness)?;

        let mut transmitted = 0usize;
        for _ in 0..self.samples {
            let path = sample_free_path(source, linear_coefficient);
            let depth = match self.mode {
                IncidenceMode::Beam => path,
                IncidenceMode::Isotropic => path * source.next_uniform(),
            };
            if depth > thickness {
                transmitted += 1;
            }
        }

        debug!(
            samples = self.samples,
            transmitted,
            mode = %self.mode,
            linear_coefficient,
            thickness,
            "slab transmission estimated"
        );

        Ok(MonteCarloEstimate::from_counts(
            self.samples,
            transmitted,
            self.mode,
        ))
    }

    /// Transmission through a stack of slabs traversed in order
    pub fn estimate_layered<S>(&self, source: &mut S, slabs: &[Slab]) -> Result<MonteCarloEstimate>
    where
        S: UniformSource + ?Sized,
    {
        for slab in slabs {
            slab.validate()?;
        }

        let mut transmitted = 0usize;
        for _ in 0..self.samples {
            let cosine = match self.mode {
                IncidenceMode::Beam => 1.0,
                IncidenceMode::Isotropic => source.next_uniform(),
            };
            let crossed = slabs.iter().all(|slab| {
                slab.thickness == 0.0
                    || sample_free_path(source, slab.linear_coefficient) * cosine > slab.thickness
            });
            if crossed {
                transmitted += 1;
            }
        }

        debug!(
            samples = self.samples,
            transmitted,
            layers = slabs.len(),
            mode = %self.mode,
            "layered transmission estimated"
        );

        Ok(MonteCarloEstimate::from_counts(
            self.samples,
            transmitted,
            self.mode,
        ))
    }
}

/// Exponential free path `-ln(U)/μ`; infinite in a void (μ = 0)
#[inline]
pub fn sample_free_path<S>(source: &mut S, linear_coefficient: f64) -> f64
where
    S: UniformSource + ?Sized,
{
    -source.next_uniform().ln() / linear_coefficient
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Estimate slab transmission; `seed = None` draws from OS entropy
pub fn estimate_transmission(
    linear_coefficient: f64,
    thickness: f64,
    samples: usize,
    mode: IncidenceMode,
    seed: Option<u64>,
) -> Result<MonteCarloEstimate> {
    let estimator = StochasticTransportEstimator::new(samples, mode)?;
    let mut source = source_for(seed);
    estimator.estimate(source.as_mut(), linear_coefficient, thickness)
}

/// Estimate slab transmission drawing from a caller-supplied source
pub fn estimate_transmission_with<S>(
    source: &mut S,
    linear_coefficient: f64,
    thickness: f64,
    samples: usize,
    mode: IncidenceMode,
) -> Result<MonteCarloEstimate>
where
    S: UniformSource + ?Sized,
{
    StochasticTransportEstimator::new(samples, mode)?
        .estimate(source, linear_coefficient, thickness)
}

/// Estimate transmission through a stack of slabs
pub fn estimate_layered_transmission(
    slabs: &[Slab],
    samples: usize,
    mode: IncidenceMode,
    seed: Option<u64>,
) -> Result<MonteCarloEstimate> {
    let estimator = StochasticTransportEstimator::new(samples, mode)?;
    let mut source = source_for(seed);
    estimator.estimate_layered(source.as_mut(), slabs)
}
