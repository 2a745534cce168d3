//! Generate star systems from seeds
//!
//! Usage: cargo run -p star-system --example generate_systems -- [--json] [SEED]...
//!
//! Without seeds, ten numbered systems are generated. Set RUST_LOG=star_system=debug
//! to follow each generation step.

use star_system::{generate_star_system, GenerationError, GeneratorConfig, StarSystem};
use stellar::{RuleTables, StellarTables};
use tracing_subscriber::EnvFilter;

fn print_summary(system: &StarSystem) {
    println!(
        "{} ({}, seed {:?})",
        system.metadata.display_name(),
        system.metadata.multiplicity,
        system.metadata.seed
    );
    for entry in system.stars() {
        let star = &entry.star;
        match &entry.orbit {
            Some(orbit) => println!(
                "  {:<3} {:<8} {:>7.3} Msol  orbit {:>5.2} around {} ({} AU, e {:.3}, {:.3} yr)",
                entry.designation.to_string(),
                star.code(),
                star.mass.to_solar_masses(),
                orbit.orbit_number,
                orbit.parent,
                orbit.semi_major_axis.to_au(),
                orbit.eccentricity,
                orbit.period.to_years(),
            ),
            None => println!(
                "  {:<3} {:<8} {:>7.3} Msol  {:.2} Gyr  MAO {:.3}",
                entry.designation.to_string(),
                star.code(),
                star.mass.to_solar_masses(),
                star.age.to_gyr(),
                entry.minimum_orbit,
            ),
        }
    }
    if let Some(counts) = &system.world_counts {
        println!(
            "  worlds: {} gas giants, {} belts, {} terrestrial",
            counts.gas_giants, counts.planetoid_belts, counts.terrestrial_planets
        );
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut json = false;
    let mut seeds = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--json" {
            json = true;
        } else {
            seeds.push(arg);
        }
    }
    if seeds.is_empty() {
        seeds = (1..=10).map(|n| format!("system-{n}")).collect();
    }

    let tables = StellarTables::standard();
    let rules = RuleTables::standard()?;
    let config = GeneratorConfig::default();

    for seed in seeds {
        // Conflicting layouts are rejected, so step the seed until one validates
        let mut attempt = 0;
        let system = loop {
            let candidate = if attempt == 0 {
                seed.clone()
            } else {
                format!("{seed}/{attempt}")
            };
            match generate_star_system(&candidate, &config, &tables, &rules) {
                Ok(system) => break system,
                Err(error @ GenerationError::OrbitConflict { .. }) => {
                    eprintln!("{candidate}: {error}, retrying");
                    attempt += 1;
                }
                Err(error) => return Err(error.into()),
            }
        };

        if json {
            println!("{}", serde_json::to_string_pretty(&system)?);
        } else {
            print_summary(&system);
        }
    }
    Ok(())
}
