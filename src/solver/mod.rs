//! # Single-Material Solver
//!
//! Closed-form thickness for one material: x = -ln(T)/μ, areal density
//! ρ·x, and the transmission recomputed from the solved thickness.

use tracing::debug;

use crate::attenuation;
use crate::error::Result;
use crate::materials::Material;
use crate::types::{ShieldDesign, ShieldLayer, TransmissionTarget};

/// Solve for the thickness of `material` that reaches `target_fraction`
pub fn solve_single_material(material: &Material, target_fraction: f64) -> Result<ShieldDesign> {
    let target = TransmissionTarget::new(target_fraction)?;
    solve_for_target(material, target)
}

/// As [`solve_single_material`] with an already validated target
pub fn solve_for_target(material: &Material, target: TransmissionTarget) -> Result<ShieldDesign> {
    let mu = material.linear_coefficient();
    let thickness = attenuation::required_thickness(mu, target.fraction())?;

    let layer = ShieldLayer {
        material: material.name().to_string(),
        density: material.density(),
        linear_coefficient: mu,
        thickness,
    };
    let design = ShieldDesign {
        areal_density: layer.areal_density(),
        transmission: attenuation::transmission(mu, thickness),
        target: target.fraction(),
        layers: vec![layer],
    };

    debug!(
        material = material.name(),
        thickness,
        areal_density = design.areal_density,
        "single-material design solved"
    );

    Ok(design)
}

/// Solve every material for the same target, preserving input order
pub fn solve_each<'a, I>(materials: I, target_fraction: f64) -> Result<Vec<ShieldDesign>>
where
    I: IntoIterator<Item = &'a Material>,
{
    let target = TransmissionTarget::new(target_fraction)?;
    materials
        .into_iter()
        .map(|m| solve_for_target(m, target))
        .collect()
}

/// The lightest single-material design among `materials`
pub fn lightest_single_material<'a, I>(
    materials: I,
    target_fraction: f64,
) -> Result<Option<ShieldDesign>>
where
    I: IntoIterator<Item = &'a Material>,
{
    let designs = solve_each(materials, target_fraction)?;
    Ok(designs
        .into_iter()
        .min_by(|a, b| a.areal_density.total_cmp(&b.areal_density)))
}
