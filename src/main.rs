//! # SHIELDSIM-RS
//!
//! Runs a shielding study: single-material thicknesses, the lightest
//! two-material combination, and a Monte Carlo check.
//!
//! Usage:
//!   shieldsim [--case study.toml] [--samples N] [--seed S] [--parallel]

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use shieldsim_rs::solver::solve_each;
use shieldsim_rs::{
    attenuation, estimate_transmission, IncidenceMode, Result, ShieldingCase, TwoMaterialOptimizer,
};

#[derive(Parser)]
#[command(name = "shieldsim")]
#[command(version, about = "Radiation shield sizing and two-material optimization")]
struct Cli {
    /// Study file (TOML); the built-in lead/concrete/water study otherwise
    #[arg(short, long)]
    case: Option<String>,

    /// Override the Monte Carlo history count
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Override the Monte Carlo seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Evaluate optimizer rows in parallel
    #[arg(long)]
    parallel: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut case = match &cli.case {
        Some(path) => {
            info!(path = %path, "loading study");
            ShieldingCase::load(path)?
        }
        None => ShieldingCase::default(),
    };
    if let Some(mc) = case.monte_carlo.as_mut() {
        if let Some(n) = cli.samples {
            mc.samples = n;
        }
        if cli.seed.is_some() {
            mc.seed = cli.seed;
        }
    }

    println!("{}", shieldsim_rs::info());
    println!();
    println!("TARGET transmission (I/I₀) = {:.1e}", case.target);

    println!();
    println!("Single-material results:");
    let materials = case.build_materials()?;
    let designs = solve_each(materials.iter().map(|(_, m)| m), case.target)?;
    for ((_, material), design) in materials.iter().zip(&designs) {
        println!(
            "  {:<12}: thickness = {:>7.2} cm, areal density = {:>7.2} g/cm², HVL = {:.2} cm",
            material.name(),
            design.total_thickness(),
            design.areal_density,
            material.half_value_layer()?,
        );
    }

    if let Some(section) = &case.optimizer {
        let m1 = case.material(&section.pair[0])?;
        let m2 = case.material(&section.pair[1])?;
        let config = section.config().with_parallel(section.parallel || cli.parallel);

        println!();
        println!("Two-material optimization (minimize areal density to meet target):");
        match TwoMaterialOptimizer::new(&m1, &m2, config).run(case.target) {
            Ok((design, stats)) => {
                println!("  Best combo: {}", design);
                println!(
                    "  Rows evaluated: {} (pruned {}), combinations: {}",
                    stats.rows_evaluated, stats.rows_pruned, stats.combinations_evaluated
                );
            }
            Err(e) if e.is_no_feasible_solution() => {
                println!("  No combination in the search range met the target.");
                println!("  Increase the maximum thicknesses or choose denser materials.");
            }
            Err(e) => return Err(e),
        }
    }

    if let Some(mc) = &case.monte_carlo {
        let material = case.material(&mc.material)?;
        let mu = material.linear_coefficient();
        let analytic = match mc.incidence {
            IncidenceMode::Beam => attenuation::transmission(mu, mc.thickness),
            IncidenceMode::Isotropic => attenuation::isotropic_transmission(mu, mc.thickness),
        };
        let estimate = estimate_transmission(mu, mc.thickness, mc.samples, mc.incidence, mc.seed)?;

        println!();
        println!(
            "Monte Carlo check (straight-line, no scattering) for {} {:.1} cm:",
            material.name(),
            mc.thickness
        );
        println!("  Analytic transmission = {:.3e}", analytic);
        println!("  MC transmission       = {}", estimate);
        println!("  z-score               = {:.2}", estimate.z_score(analytic));
    }

    Ok(())
}
