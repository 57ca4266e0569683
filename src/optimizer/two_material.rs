//! # Two-Material Optimizer
//!
//! Minimum areal density over a discretized (t₁, t₂) grid subject to
//!
//! ```text
//! T(t₁, t₂) = exp(-μ₁t₁) · exp(-μ₂t₂) ≤ target
//! m(t₁, t₂) = ρ₁t₁ + ρ₂t₂              → min
//! ```
//!
//! Rows are values of t₁ in ascending order. Within a row the feasible
//! t₂ form a suffix of the grid and areal density grows with t₂, so the
//! row optimum is the first feasible t₂. Ties go to the smallest t₂, then
//! to the first row.
//!
//! The result is optimal over the grid only; a coarse grid can miss the
//! continuous optimum by up to one grid spacing per axis.

use rayon::prelude::*;
use tracing::{debug, trace};

use crate::attenuation;
use crate::constants::{DEFAULT_MAX_THICKNESS, DEFAULT_STEPS};
use crate::error::{Result, ShieldError};
use crate::materials::Material;
use crate::optimizer::grid::SearchGrid;
use crate::types::{ShieldDesign, ShieldLayer, TransmissionTarget};

/// How each row of the grid is searched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// Score every (t₁, t₂) combination
    Exhaustive,
    /// Binary-search each row's first feasible t₂ and stop once ρ₁t₁
    /// alone reaches the incumbent
    #[default]
    Pruned,
}

/// Search bounds and resolution
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    /// Largest thickness of material 1 [cm]
    pub max_thickness1: f64,
    /// Largest thickness of material 2 [cm]
    pub max_thickness2: f64,
    /// Grid points for material 1
    pub steps1: usize,
    /// Grid points for material 2
    pub steps2: usize,
    pub strategy: SearchStrategy,
    /// Evaluate rows on the rayon pool
    pub parallel: bool,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_thickness1: DEFAULT_MAX_THICKNESS,
            max_thickness2: DEFAULT_MAX_THICKNESS,
            steps1: DEFAULT_STEPS,
            steps2: DEFAULT_STEPS,
            strategy: SearchStrategy::default(),
            parallel: false,
        }
    }
}

impl OptimizerConfig {
    pub fn new(max_thickness1: f64, max_thickness2: f64, steps1: usize, steps2: usize) -> Self {
        Self {
            max_thickness1,
            max_thickness2,
            steps1,
            steps2,
            ..Default::default()
        }
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

/// Work done by one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Rows (t₁ values) scored
    pub rows_evaluated: usize,
    /// Rows skipped because ρ₁t₁ could not beat the incumbent
    pub rows_pruned: usize,
    /// Rows with at least one feasible t₂
    pub feasible_rows: usize,
    /// Combined transmissions formed
    pub combinations_evaluated: usize,
}

impl SearchStats {
    fn merge(self, other: Self) -> Self {
        Self {
            rows_evaluated: self.rows_evaluated + other.rows_evaluated,
            rows_pruned: self.rows_pruned + other.rows_pruned,
            feasible_rows: self.feasible_rows + other.feasible_rows,
            combinations_evaluated: self.combinations_evaluated + other.combinations_evaluated,
        }
    }
}

/// Best (t₁, t₂) of a single row
#[derive(Debug, Clone, Copy)]
struct Candidate {
    row: usize,
    col: usize,
    areal_density: f64,
    transmission: f64,
}

impl Candidate {
    /// Lower areal density wins; equal mass goes to the earlier row
    fn beats(&self, other: &Candidate) -> bool {
        self.areal_density < other.areal_density
            || (self.areal_density == other.areal_density && self.row < other.row)
    }
}

/// Immutable inputs shared by all rows
struct SearchSpace<'g> {
    grid1: &'g SearchGrid,
    grid2: &'g SearchGrid,
    /// exp(-μ₂t₂) for every column
    column_transmission: Vec<f64>,
    mu1: f64,
    rho1: f64,
    rho2: f64,
    target: f64,
}

impl SearchSpace<'_> {
    fn row_mass_floor(&self, row: usize) -> f64 {
        self.rho1 * self.grid1.values()[row]
    }

    fn evaluate_row(
        &self,
        row: usize,
        strategy: SearchStrategy,
    ) -> (Option<Candidate>, SearchStats) {
        let t1 = self.grid1.values()[row];
        let trans1 = attenuation::transmission(self.mu1, t1);
        let base = self.rho1 * t1;
        let t2s = self.grid2.values();

        let mut stats = SearchStats {
            rows_evaluated: 1,
            ..Default::default()
        };

        let best = match strategy {
            SearchStrategy::Exhaustive => {
                let mut best: Option<Candidate> = None;
                for (col, (&t2, &trans2)) in t2s.iter().zip(&self.column_transmission).enumerate() {
                    let total = trans1 * trans2;
                    if total > self.target {
                        continue;
                    }
                    let areal_density = base + self.rho2 * t2;
                    if best.map_or(true, |b| areal_density < b.areal_density) {
                        best = Some(Candidate {
                            row,
                            col,
                            areal_density,
                            transmission: total,
                        });
                    }
                }
                stats.combinations_evaluated = t2s.len();
                best
            }
            SearchStrategy::Pruned => {
                let mut comparisons = 0usize;
                let col = self.column_transmission.partition_point(|&trans2| {
                    comparisons += 1;
                    trans1 * trans2 > self.target
                });
                stats.combinations_evaluated = comparisons;
                (col < t2s.len()).then(|| Candidate {
                    row,
                    col,
                    areal_density: base + self.rho2 * t2s[col],
                    transmission: trans1 * self.column_transmission[col],
                })
            }
        };

        if best.is_some() {
            stats.feasible_rows = 1;
        }
        trace!(row, t1, feasible = best.is_some(), "row evaluated");
        (best, stats)
    }
}

/// Grid search for the lightest two-layer shield meeting a target
#[derive(Debug, Clone)]
pub struct TwoMaterialOptimizer<'a> {
    material1: &'a Material,
    material2: &'a Material,
    config: OptimizerConfig,
}

impl<'a> TwoMaterialOptimizer<'a> {
    pub fn new(material1: &'a Material, material2: &'a Material, config: OptimizerConfig) -> Self {
        Self {
            material1,
            material2,
            config,
        }
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run the search; `NoFeasibleSolution` when no grid point meets the target
    pub fn run(&self, target_fraction: f64) -> Result<(ShieldDesign, SearchStats)> {
        let target = TransmissionTarget::new(target_fraction)?;
        let grid1 = SearchGrid::linspace(self.config.max_thickness1, self.config.steps1)?;
        let grid2 = SearchGrid::linspace(self.config.max_thickness2, self.config.steps2)?;

        let mu2 = self.material2.linear_coefficient();
        let space = SearchSpace {
            grid1: &grid1,
            grid2: &grid2,
            column_transmission: grid2
                .values()
                .iter()
                .map(|&t2| attenuation::transmission(mu2, t2))
                .collect(),
            mu1: self.material1.linear_coefficient(),
            rho1: self.material1.density(),
            rho2: self.material2.density(),
            target: target.fraction(),
        };

        debug!(
            material1 = self.material1.name(),
            material2 = self.material2.name(),
            steps1 = grid1.len(),
            steps2 = grid2.len(),
            strategy = ?self.config.strategy,
            parallel = self.config.parallel,
            target = target.fraction(),
            "two-material search started"
        );

        let (best, stats) = if self.config.parallel {
            self.search_parallel(&space)
        } else {
            self.search_serial(&space)
        };

        debug!(
            rows_evaluated = stats.rows_evaluated,
            rows_pruned = stats.rows_pruned,
            feasible_rows = stats.feasible_rows,
            combinations = stats.combinations_evaluated,
            found = best.is_some(),
            "two-material search finished"
        );

        let best = best.ok_or(ShieldError::NoFeasibleSolution {
            target: target.fraction(),
            max_thickness1: self.config.max_thickness1,
            max_thickness2: self.config.max_thickness2,
        })?;

        Ok((self.design_from(&best, &grid1, &grid2, target), stats))
    }

    fn search_serial(&self, space: &SearchSpace<'_>) -> (Option<Candidate>, SearchStats) {
        let rows = space.grid1.len();
        let mut best: Option<Candidate> = None;
        let mut stats = SearchStats::default();

        for row in 0..rows {
            if self.config.strategy == SearchStrategy::Pruned {
                if let Some(b) = &best {
                    // ρ₁t₁ is non-decreasing in the row index
                    if space.row_mass_floor(row) >= b.areal_density {
                        stats.rows_pruned = rows - row;
                        break;
                    }
                }
            }

            let (candidate, row_stats) = space.evaluate_row(row, self.config.strategy);
            stats = stats.merge(row_stats);
            if let Some(c) = candidate {
                if best.map_or(true, |b| c.areal_density < b.areal_density) {
                    best = Some(c);
                }
            }
        }

        (best, stats)
    }

    fn search_parallel(&self, space: &SearchSpace<'_>) -> (Option<Candidate>, SearchStats) {
        let strategy = self.config.strategy;
        (0..space.grid1.len())
            .into_par_iter()
            .map(|row| space.evaluate_row(row, strategy))
            .reduce(
                || (None, SearchStats::default()),
                |(a, sa), (b, sb)| {
                    let best = match (a, b) {
                        (Some(a), Some(b)) => Some(if b.beats(&a) { b } else { a }),
                        (a, None) => a,
                        (None, b) => b,
                    };
                    (best, sa.merge(sb))
                },
            )
    }

    fn design_from(
        &self,
        best: &Candidate,
        grid1: &SearchGrid,
        grid2: &SearchGrid,
        target: TransmissionTarget,
    ) -> ShieldDesign {
        let layer = |m: &Material, thickness: f64| ShieldLayer {
            material: m.name().to_string(),
            density: m.density(),
            linear_coefficient: m.linear_coefficient(),
            thickness,
        };

        ShieldDesign {
            layers: vec![
                layer(self.material1, grid1.values()[best.row]),
                layer(self.material2, grid2.values()[best.col]),
            ],
            areal_density: best.areal_density,
            transmission: best.transmission,
            target: target.fraction(),
        }
    }
}

/// Lightest (t₁, t₂) pair on a `steps1 × steps2` grid meeting `target_fraction`
#[allow(clippy::too_many_arguments)]
pub fn optimize_two_materials(
    material1: &Material,
    material2: &Material,
    target_fraction: f64,
    max_thickness1: f64,
    max_thickness2: f64,
    steps1: usize,
    steps2: usize,
) -> Result<ShieldDesign> {
    let config = OptimizerConfig::new(max_thickness1, max_thickness2, steps1, steps2);
    TwoMaterialOptimizer::new(material1, material2, config)
        .run(target_fraction)
        .map(|(design, _)| design)
}
