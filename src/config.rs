//! # Study Configuration
//!
//! A shielding study read from TOML:
//!
//! ```toml
//! target = 1e-6
//!
//! [materials.lead]
//! name = "Lead"
//! density = 11.34
//! mu_mass = 0.044
//!
//! [optimizer]
//! pair = ["concrete", "lead"]
//! max_thickness = [100.0, 20.0]
//! steps = [401, 401]
//!
//! [monte_carlo]
//! material = "lead"
//! thickness = 10.0
//! samples = 200000
//! seed = 42
//! ```
//!
//! Materials are keyed by a short id and built into validated
//! [`Material`] values on demand; nothing is registered globally.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::constants::*;
use crate::error::{Result, ShieldError};
use crate::materials::{AttenuationSpec, Material};
use crate::optimizer::{OptimizerConfig, SearchStrategy};
use crate::types::IncidenceMode;

/// Material entry as written in the study file
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MaterialSpec {
    pub name: String,
    /// g/cm³; required with `mu_mass`, unit density otherwise
    #[serde(default)]
    pub density: Option<f64>,
    /// 1/cm; authoritative when present
    #[serde(default)]
    pub mu_lin: Option<f64>,
    /// cm²/g
    #[serde(default)]
    pub mu_mass: Option<f64>,
}

impl MaterialSpec {
    pub fn build(&self) -> Result<Material> {
        let (density, spec) = match (self.mu_lin, self.mu_mass, self.density) {
            (Some(mu), _, density) => {
                (density.unwrap_or(DEFAULT_DENSITY), AttenuationSpec::Linear(mu))
            }
            (None, Some(mu_m), Some(density)) => (density, AttenuationSpec::Mass(mu_m)),
            (None, Some(_), None) => {
                return Err(ShieldError::material(&self.name, "mu_mass needs a density"))
            }
            (None, None, _) => {
                return Err(ShieldError::material(&self.name, "needs mu_lin or mu_mass"))
            }
        };
        Material::new(&self.name, density, spec)
    }
}

/// Two-material search section
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OptimizerSection {
    /// Material ids, source side first
    pub pair: [String; 2],
    #[serde(default = "default_max_thickness")]
    pub max_thickness: [f64; 2],
    #[serde(default = "default_steps")]
    pub steps: [usize; 2],
    #[serde(default)]
    pub exhaustive: bool,
    #[serde(default)]
    pub parallel: bool,
}

impl OptimizerSection {
    pub fn config(&self) -> OptimizerConfig {
        let strategy = if self.exhaustive {
            SearchStrategy::Exhaustive
        } else {
            SearchStrategy::Pruned
        };
        OptimizerConfig::new(
            self.max_thickness[0],
            self.max_thickness[1],
            self.steps[0],
            self.steps[1],
        )
        .with_strategy(strategy)
        .with_parallel(self.parallel)
    }
}

/// Monte Carlo check section
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MonteCarloSection {
    pub material: String,
    /// cm
    pub thickness: f64,
    #[serde(default = "default_samples")]
    pub samples: usize,
    #[serde(default)]
    pub incidence: IncidenceMode,
    /// Omit for an entropy-seeded run
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Complete study description
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ShieldingCase {
    /// Allowed I/I₀
    pub target: f64,
    pub materials: BTreeMap<String, MaterialSpec>,
    #[serde(default)]
    pub optimizer: Option<OptimizerSection>,
    #[serde(default)]
    pub monte_carlo: Option<MonteCarloSection>,
}

impl ShieldingCase {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Build the material stored under `id`
    pub fn material(&self, id: &str) -> Result<Material> {
        self.materials
            .get(id)
            .ok_or_else(|| ShieldError::Config(format!("unknown material id '{}'", id)))?
            .build()
    }

    /// All materials in id order
    pub fn build_materials(&self) -> Result<Vec<(String, Material)>> {
        self.materials
            .iter()
            .map(|(id, spec)| Ok((id.clone(), spec.build()?)))
            .collect()
    }
}

impl Default for ShieldingCase {
    /// Lead / concrete / water at 1e-6 with a 100 cm concrete × 20 cm lead search
    fn default() -> Self {
        let spec = |name: &str, density: f64, mu_mass: f64| MaterialSpec {
            name: name.to_string(),
            density: Some(density),
            mu_lin: None,
            mu_mass: Some(mu_mass),
        };

        let mut materials = BTreeMap::new();
        materials.insert("lead".to_string(), spec("Lead", LEAD_DENSITY, LEAD_MU_MASS));
        materials.insert(
            "concrete".to_string(),
            spec("Concrete", CONCRETE_DENSITY, CONCRETE_MU_MASS),
        );
        materials.insert("water".to_string(), spec("Water", WATER_DENSITY, WATER_MU_MASS));

        Self {
            target: 1e-6,
            materials,
            optimizer: Some(OptimizerSection {
                pair: ["concrete".to_string(), "lead".to_string()],
                max_thickness: [100.0, 20.0],
                steps: [401, 401],
                exhaustive: false,
                parallel: false,
            }),
            monte_carlo: Some(MonteCarloSection {
                material: "lead".to_string(),
                thickness: 10.0,
                samples: DEFAULT_SAMPLES,
                incidence: IncidenceMode::Beam,
                seed: Some(42),
            }),
        }
    }
}

fn default_max_thickness() -> [f64; 2] {
    [DEFAULT_MAX_THICKNESS, DEFAULT_MAX_THICKNESS]
}

fn default_steps() -> [usize; 2] {
    [DEFAULT_STEPS, DEFAULT_STEPS]
}

fn default_samples() -> usize {
    DEFAULT_SAMPLES
}

#[cfg(test)]
mod tests {
    use super::*;

    const STUDY: &str = r#"
        target = 1e-4

        [materials.steel]
        name = "Steel"
        density = 7.8
        mu_lin = 0.42

        [materials.poly]
        name = "Polyethylene"
        density = 0.94
        mu_mass = 0.07

        [optimizer]
        pair = ["poly", "steel"]
        max_thickness = [30.0, 10.0]
        steps = [61, 41]
        parallel = true

        [monte_carlo]
        material = "steel"
        thickness = 5.0
        samples = 50000
        incidence = "isotropic"
    "#;

    #[test]
    fn test_parse_study() {
        let case = ShieldingCase::from_toml_str(STUDY).unwrap();
        assert_eq!(case.target, 1e-4);

        let steel = case.material("steel").unwrap();
        assert_eq!(steel.linear_coefficient(), 0.42);
        let poly = case.material("poly").unwrap();
        assert!((poly.linear_coefficient() - 0.07 * 0.94).abs() < 1e-12);

        let opt = case.optimizer.as_ref().unwrap();
        let config = opt.config();
        assert_eq!(config.steps1, 61);
        assert_eq!(config.max_thickness2, 10.0);
        assert!(config.parallel);
        assert_eq!(config.strategy, SearchStrategy::Pruned);

        let mc = case.monte_carlo.as_ref().unwrap();
        assert_eq!(mc.incidence, IncidenceMode::Isotropic);
        assert_eq!(mc.seed, None);
    }

    #[test]
    fn test_defaults_fill_sections() {
        let case = ShieldingCase::from_toml_str(
            r#"
            target = 0.01
            [materials.w]
            name = "Water"
            density = 1.0
            mu_mass = 0.034
            [optimizer]
            pair = ["w", "w"]
            "#,
        )
        .unwrap();
        let opt = case.optimizer.unwrap();
        assert_eq!(opt.steps, [DEFAULT_STEPS, DEFAULT_STEPS]);
        assert_eq!(opt.max_thickness, [DEFAULT_MAX_THICKNESS, DEFAULT_MAX_THICKNESS]);
        assert!(case.monte_carlo.is_none());
    }

    #[test]
    fn test_material_without_coefficient() {
        let spec = MaterialSpec {
            name: "Mystery".into(),
            density: Some(1.0),
            mu_lin: None,
            mu_mass: None,
        };
        assert!(matches!(spec.build(), Err(ShieldError::InvalidMaterial { .. })));
    }

    #[test]
    fn test_linear_wins_when_both_given() {
        let spec = MaterialSpec {
            name: "Both".into(),
            density: Some(2.0),
            mu_lin: Some(0.3),
            mu_mass: Some(10.0),
        };
        assert_eq!(spec.build().unwrap().linear_coefficient(), 0.3);
    }

    #[test]
    fn test_density_optional_for_linear_only() {
        let case = ShieldingCase::from_toml_str(
            r#"
            target = 0.01
            [materials.slab]
            name = "Slab"
            mu_lin = 0.2
            [materials.dust]
            name = "Dust"
            mu_mass = 0.05
            "#,
        )
        .unwrap();
        assert_eq!(case.materials["slab"].density, None);

        let slab = case.material("slab").unwrap();
        assert_eq!(slab.density(), DEFAULT_DENSITY);
        assert_eq!(slab.linear_coefficient(), 0.2);

        match case.material("dust") {
            Err(ShieldError::InvalidMaterial { name, reason }) => {
                assert_eq!(name, "Dust");
                assert!(reason.contains("density"), "{}", reason);
            }
            other => panic!("expected InvalidMaterial, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_material_and_bad_toml() {
        let case = ShieldingCase::default();
        assert!(matches!(case.material("unobtainium"), Err(ShieldError::Config(_))));
        assert!(matches!(
            ShieldingCase::from_toml_str("target = "),
            Err(ShieldError::Config(_))
        ));
        assert!(matches!(
            ShieldingCase::load("/nonexistent/study.toml"),
            Err(ShieldError::Config(_))
        ));
    }

    #[test]
    fn test_default_study() {
        let case = ShieldingCase::default();
        let materials = case.build_materials().unwrap();
        assert_eq!(materials.len(), 3);
        assert_eq!(case.material("lead").unwrap(), Material::lead());
        assert_eq!(case.material("concrete").unwrap(), Material::concrete());
    }
}
