//! # Shielding Materials
//!
//! A material carries its density and exactly one authoritative
//! attenuation coefficient: either a linear coefficient or a mass
//! coefficient combined with density. The linear coefficient is derived
//! once at construction and cached for the lifetime of the value.
//!
//! Materials are plain values: callers build them and pass them to the
//! solvers explicitly.

use std::fmt;

use crate::attenuation;
use crate::constants::*;
use crate::error::{Result, ShieldError};

/// Which coefficient the material was specified with
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttenuationSpec {
    /// Linear attenuation coefficient μ [1/cm]
    Linear(f64),
    /// Mass attenuation coefficient μ/ρ [cm²/g]
    Mass(f64),
}

impl fmt::Display for AttenuationSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttenuationSpec::Linear(mu) => write!(f, "μ = {} cm⁻¹", mu),
            AttenuationSpec::Mass(mu_m) => write!(f, "μ/ρ = {} cm²/g", mu_m),
        }
    }
}

/// Homogeneous shielding material
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    name: String,
    /// Density [g/cm³]
    density: f64,
    spec: AttenuationSpec,
    /// Cached linear coefficient [1/cm]
    linear: f64,
}

impl Material {
    /// Material specified by its linear coefficient
    pub fn with_linear(name: &str, density: f64, linear_coefficient: f64) -> Result<Self> {
        Self::new(name, density, AttenuationSpec::Linear(linear_coefficient))
    }

    /// Material specified by its mass coefficient; μ = μ_m · ρ
    pub fn with_mass(name: &str, density: f64, mass_coefficient: f64) -> Result<Self> {
        Self::new(name, density, AttenuationSpec::Mass(mass_coefficient))
    }

    /// Validate and cache the linear coefficient
    pub fn new(name: &str, density: f64, spec: AttenuationSpec) -> Result<Self> {
        if !(density.is_finite() && density > 0.0) {
            return Err(ShieldError::material(
                name,
                format!("density {} must be finite and > 0", density),
            ));
        }

        let linear = match spec {
            AttenuationSpec::Linear(mu) => {
                check_coefficient(name, "linear coefficient", mu)?;
                mu
            }
            AttenuationSpec::Mass(mu_m) => {
                check_coefficient(name, "mass coefficient", mu_m)?;
                attenuation::linear_coefficient(mu_m, density)
            }
        };

        Ok(Self {
            name: name.to_string(),
            density,
            spec,
            linear,
        })
    }

    /// Lead, ~1 MeV photons
    pub fn lead() -> Self {
        Self::preset("Lead", LEAD_DENSITY, LEAD_MU_MASS)
    }

    /// Ordinary concrete, ~1 MeV photons
    pub fn concrete() -> Self {
        Self::preset("Concrete", CONCRETE_DENSITY, CONCRETE_MU_MASS)
    }

    /// Water, ~1 MeV photons
    pub fn water() -> Self {
        Self::preset("Water", WATER_DENSITY, WATER_MU_MASS)
    }

    fn preset(name: &str, density: f64, mu_mass: f64) -> Self {
        Self {
            name: name.to_string(),
            density,
            spec: AttenuationSpec::Mass(mu_mass),
            linear: attenuation::linear_coefficient(mu_mass, density),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Density [g/cm³]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// The coefficient as originally specified
    pub fn spec(&self) -> AttenuationSpec {
        self.spec
    }

    /// Linear attenuation coefficient μ [1/cm]
    pub fn linear_coefficient(&self) -> f64 {
        self.linear
    }

    /// Mass attenuation coefficient μ/ρ [cm²/g]
    pub fn mass_coefficient(&self) -> f64 {
        match self.spec {
            AttenuationSpec::Mass(mu_m) => mu_m,
            AttenuationSpec::Linear(mu) => mu / self.density,
        }
    }

    /// Mean free path [cm]
    pub fn mean_free_path(&self) -> Result<f64> {
        attenuation::mean_free_path(self.linear)
    }

    /// Half-value layer [cm]
    pub fn half_value_layer(&self) -> Result<f64> {
        attenuation::half_value_layer(self.linear)
    }

    /// Tenth-value layer [cm]
    pub fn tenth_value_layer(&self) -> Result<f64> {
        attenuation::tenth_value_layer(self.linear)
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (ρ = {} g/cm³, {}, μ = {:.4} cm⁻¹)",
            self.name, self.density, self.spec, self.linear
        )
    }
}

fn check_coefficient(name: &str, what: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ShieldError::material(
            name,
            format!("{} {} must be finite and >= 0", what, value),
        ))
    }
}

/// Normalized linear coefficient of a material
pub fn linear_coefficient_of(material: &Material) -> f64 {
    material.linear_coefficient()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mass_spec_derives_linear() {
        let lead = Material::with_mass("Lead", 11.34, 0.044).unwrap();
        assert!((lead.linear_coefficient() - 0.044 * 11.34).abs() < 1e-12);
        assert_eq!(lead.spec(), AttenuationSpec::Mass(0.044));
        assert_eq!(lead, Material::lead());
    }

    #[test]
    fn test_linear_spec_is_authoritative() {
        let steel = Material::with_linear("Steel", 7.8, 0.42).unwrap();
        assert_eq!(linear_coefficient_of(&steel), 0.42);
        assert!((steel.mass_coefficient() - 0.42 / 7.8).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_bad_density() {
        for density in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = Material::with_mass("X", density, 0.04).unwrap_err();
            assert!(matches!(err, ShieldError::InvalidMaterial { .. }));
        }
    }

    #[test]
    fn test_rejects_negative_coefficient() {
        assert!(Material::with_linear("X", 1.0, -0.1).is_err());
        assert!(Material::with_mass("X", 1.0, -0.1).is_err());
        assert!(Material::with_mass("X", 1.0, f64::NAN).is_err());
    }

    #[test]
    fn test_zero_coefficient_allowed_but_unsolvable() {
        let void = Material::with_linear("Void", 0.001, 0.0).unwrap();
        assert!(void.half_value_layer().is_err());
    }

    #[test]
    fn test_presets() {
        let concrete = Material::concrete();
        let water = Material::water();
        assert!((concrete.linear_coefficient() - 0.0805).abs() < 1e-12);
        assert!((water.linear_coefficient() - 0.034).abs() < 1e-12);
        let lead_tvl = Material::lead().tenth_value_layer().unwrap();
        assert!(lead_tvl < concrete.tenth_value_layer().unwrap());
    }

    #[test]
    fn test_display() {
        let s = Material::lead().to_string();
        assert!(s.contains("Lead"));
        assert!(s.contains("11.34"));
    }
}
