//! # Shield Optimization
//!
//! Discretized search for the lightest two-layer shield that meets a
//! transmission target.
//!
//! ## Search
//!
//! ```text
//! t₁ ∈ {0, Δ₁, …, max₁}   (rows, outer loop)
//! t₂ ∈ {0, Δ₂, …, max₂}   (columns, inner pass)
//!
//! feasible:  exp(-μ₁t₁ - μ₂t₂) ≤ target
//! objective: ρ₁t₁ + ρ₂t₂
//! ```
//!
//! Rows are independent and read only immutable material data, so they
//! can run on the rayon pool with a deterministic final reduction.

pub mod grid;
pub mod two_material;

pub use grid::SearchGrid;
pub use two_material::{
    optimize_two_materials, OptimizerConfig, SearchStats, SearchStrategy, TwoMaterialOptimizer,
};
