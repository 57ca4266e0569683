//! # Core Types
//!
//! Value records exchanged between the solvers and their callers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::attenuation;
use crate::constants::Z_95;
use crate::error::Result;

// ============================================================================
// TRANSMISSION TARGET
// ============================================================================

/// Allowed intensity ratio I/I₀, guaranteed to lie in (0, 1]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct TransmissionTarget(f64);

impl TransmissionTarget {
    pub fn new(fraction: f64) -> Result<Self> {
        attenuation::validate_target(fraction).map(Self)
    }

    /// Target expressed as an attenuation factor I₀/I (e.g. 1e6)
    pub fn from_attenuation_factor(factor: f64) -> Result<Self> {
        Self::new(factor.recip())
    }

    pub fn fraction(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for TransmissionTarget {
    type Error = crate::error::ShieldError;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl fmt::Display for TransmissionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I/I₀ = {:.3e}", self.0)
    }
}

// ============================================================================
// INCIDENCE
// ============================================================================

/// Angular distribution of particles striking the slab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidenceMode {
    /// Normal incidence, μ = 1 for every particle
    #[default]
    Beam,
    /// Direction cosine uniform in (0, 1)
    Isotropic,
}

impl fmt::Display for IncidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncidenceMode::Beam => write!(f, "beam"),
            IncidenceMode::Isotropic => write!(f, "isotropic"),
        }
    }
}

// ============================================================================
// SHIELD DESIGN
// ============================================================================

/// One slab of a solved design
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShieldLayer {
    pub material: String,
    /// Density [g/cm³]
    pub density: f64,
    /// Linear attenuation coefficient [1/cm]
    pub linear_coefficient: f64,
    /// Thickness [cm]
    pub thickness: f64,
}

impl ShieldLayer {
    /// Mass per unit area of this slab [g/cm²]
    pub fn areal_density(&self) -> f64 {
        self.density * self.thickness
    }

    /// Optical thickness μx
    pub fn optical_thickness(&self) -> f64 {
        self.linear_coefficient * self.thickness
    }
}

/// Result of a solve; layers are ordered from the source outwards
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShieldDesign {
    pub layers: Vec<ShieldLayer>,
    /// Total mass per unit area [g/cm²]
    pub areal_density: f64,
    /// Achieved transmission I/I₀
    pub transmission: f64,
    /// Target the design was solved for
    pub target: f64,
}

impl ShieldDesign {
    /// Thickness of layer `index` [cm]
    pub fn thickness(&self, index: usize) -> Option<f64> {
        self.layers.get(index).map(|l| l.thickness)
    }

    /// Total thickness of the stack [cm]
    pub fn total_thickness(&self) -> f64 {
        self.layers.iter().map(|l| l.thickness).sum()
    }

    /// Σ μᵢxᵢ over the stack
    pub fn optical_thickness(&self) -> f64 {
        attenuation::optical_thickness(
            self.layers.iter().map(|l| (l.linear_coefficient, l.thickness)),
        )
    }

    /// Achieved transmission does not exceed the target (relative tolerance)
    pub fn meets_target(&self, rel_tol: f64) -> bool {
        self.transmission <= self.target * (1.0 + rel_tol)
    }
}

impl fmt::Display for ShieldDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stack: Vec<String> = self
            .layers
            .iter()
            .map(|l| format!("{} {:.2} cm", l.material, l.thickness))
            .collect();
        write!(
            f,
            "{} -> {:.2} g/cm², I/I₀ = {:.2e}",
            stack.join(" + "),
            self.areal_density,
            self.transmission
        )
    }
}

// ============================================================================
// MONTE CARLO ESTIMATE
// ============================================================================

/// Transmitted fraction estimated from particle histories
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonteCarloEstimate {
    /// Histories simulated
    pub samples: usize,
    /// Histories that penetrated the slab
    pub transmitted: usize,
    /// Estimated transmission p̂
    pub transmission: f64,
    /// Binomial standard error √(p̂(1-p̂)/N)
    pub standard_error: f64,
    pub mode: IncidenceMode,
}

impl MonteCarloEstimate {
    pub(crate) fn from_counts(samples: usize, transmitted: usize, mode: IncidenceMode) -> Self {
        let n = samples as f64;
        let p = transmitted as f64 / n;
        Self {
            samples,
            transmitted,
            transmission: p,
            standard_error: (p * (1.0 - p) / n).sqrt(),
            mode,
        }
    }

    /// p̂ ± z·σ, clamped to [0, 1]
    pub fn confidence_interval(&self, z: f64) -> (f64, f64) {
        let half = z * self.standard_error;
        (
            (self.transmission - half).max(0.0),
            (self.transmission + half).min(1.0),
        )
    }

    /// 95% confidence interval
    pub fn ci95(&self) -> (f64, f64) {
        self.confidence_interval(Z_95)
    }

    /// σ / p̂ (infinite when nothing was transmitted)
    pub fn relative_error(&self) -> f64 {
        if self.transmission > 0.0 {
            self.standard_error / self.transmission
        } else {
            f64::INFINITY
        }
    }

    /// Signed distance to `expected` in standard errors
    pub fn z_score(&self, expected: f64) -> f64 {
        let diff = self.transmission - expected;
        if self.standard_error > 0.0 {
            diff / self.standard_error
        } else if diff == 0.0 {
            0.0
        } else {
            diff.signum() * f64::INFINITY
        }
    }
}

impl fmt::Display for MonteCarloEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.3e} ± {:.3e} (95% CI, N = {}, {})",
            self.transmission,
            Z_95 * self.standard_error,
            self.samples,
            self.mode
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_validation() {
        assert!(TransmissionTarget::new(1e-6).is_ok());
        assert!(TransmissionTarget::new(1.0).is_ok());
        assert!(TransmissionTarget::new(0.0).is_err());
        assert!(TransmissionTarget::new(1.01).is_err());
        assert!(TransmissionTarget::new(f64::NAN).is_err());

        let t = TransmissionTarget::from_attenuation_factor(1e6).unwrap();
        assert!((t.fraction() - 1e-6).abs() < 1e-18);
        assert!(TransmissionTarget::try_from(-0.1).is_err());
    }

    #[test]
    fn test_estimate_statistics() {
        let est = MonteCarloEstimate::from_counts(10_000, 2_500, IncidenceMode::Beam);
        assert_eq!(est.transmission, 0.25);
        assert!((est.standard_error - (0.25f64 * 0.75 / 10_000.0).sqrt()).abs() < 1e-15);

        let (lo, hi) = est.ci95();
        assert!(lo < 0.25 && hi > 0.25);
        assert!((est.z_score(0.25)).abs() < 1e-12);
        assert!((est.relative_error() - est.standard_error / 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_estimate_degenerate() {
        let none = MonteCarloEstimate::from_counts(100, 0, IncidenceMode::Beam);
        assert_eq!(none.standard_error, 0.0);
        assert_eq!(none.ci95(), (0.0, 0.0));
        assert!(none.relative_error().is_infinite());
        assert_eq!(none.z_score(0.0), 0.0);
        assert!(none.z_score(0.1) < 0.0);

        let all = MonteCarloEstimate::from_counts(100, 100, IncidenceMode::Isotropic);
        assert_eq!(all.transmission, 1.0);
        assert_eq!(all.ci95(), (1.0, 1.0));
    }

    fn concrete_lead_design() -> ShieldDesign {
        ShieldDesign {
            layers: vec![
                ShieldLayer {
                    material: "Concrete".into(),
                    density: 2.3,
                    linear_coefficient: 0.0805,
                    thickness: 10.0,
                },
                ShieldLayer {
                    material: "Lead".into(),
                    density: 11.34,
                    linear_coefficient: 0.49896,
                    thickness: 2.0,
                },
            ],
            areal_density: 2.3 * 10.0 + 11.34 * 2.0,
            transmission: (-(0.805f64 + 0.99792)).exp(),
            target: 0.2,
        }
    }

    #[test]
    fn test_design_accessors() {
        let design = concrete_lead_design();
        assert_eq!(design.thickness(1), Some(2.0));
        assert_eq!(design.thickness(2), None);
        assert!((design.total_thickness() - 12.0).abs() < 1e-12);
        assert!((design.optical_thickness() - 1.80292).abs() < 1e-9);
        assert!(design.meets_target(0.0));
        assert!(design.to_string().contains("Concrete 10.00 cm + Lead 2.00 cm"));
    }

    #[test]
    fn test_design_serializes_to_toml() {
        let design = concrete_lead_design();
        let text = toml::to_string(&design).unwrap();
        let doc: toml::Table = toml::from_str(&text).unwrap();

        assert_eq!(doc["areal_density"].as_float(), Some(design.areal_density));
        assert_eq!(doc["target"].as_float(), Some(0.2));
        let layers = doc["layers"].as_array().unwrap();
        assert_eq!(layers.len(), 2);
        assert_eq!(layers[1]["material"].as_str(), Some("Lead"));
        assert_eq!(layers[1]["thickness"].as_float(), Some(2.0));
    }

    #[test]
    fn test_estimate_serializes_mode_lowercase() {
        let est = MonteCarloEstimate::from_counts(1_000, 10, IncidenceMode::Isotropic);
        let doc: toml::Table = toml::from_str(&toml::to_string(&est).unwrap()).unwrap();
        assert_eq!(doc["mode"].as_str(), Some("isotropic"));
        assert_eq!(doc["samples"].as_integer(), Some(1_000));
        assert_eq!(doc["transmission"].as_float(), Some(0.01));
    }
}
