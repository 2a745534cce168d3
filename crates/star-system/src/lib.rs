//! Multi-star system generation
//!
//! Builds on the single-star pipeline in [`stellar`]: a primary is rolled,
//! secondaries and companions are placed in Close, Near and Far zones, and
//! each gets an orbit, an eccentricity, a classification derived from the
//! star it orbits, a mass and a period. The finished [`StarSystem`] is
//! validated before it is returned.
//!
//! ```
//! use star_system::{generate_star_system, GeneratorConfig};
//! use stellar::{RuleTables, StellarTables};
//!
//! let tables = StellarTables::standard();
//! let rules = RuleTables::standard().unwrap();
//! let config = GeneratorConfig::single_star();
//!
//! let system = generate_star_system("regina", &config, &tables, &rules).unwrap();
//! assert_eq!(system.len(), 1);
//! assert!(system.primary().is_some());
//! ```

pub mod builder;
pub mod config;
pub mod designation;
pub mod error;
pub mod metadata;
pub mod orbit;
pub mod secondary;
pub mod system;
pub mod worlds;
pub mod zones;

// Re-export main types at crate root
pub use builder::{generate_star_system, presence_mods, BuildState, StarSystemBuilder};
pub use config::GeneratorConfig;
pub use designation::{Designation, Slot, Zone};
pub use error::GenerationError;
pub use metadata::{Multiplicity, SystemMetadata};
pub use orbit::{au_to_orbit_number, orbit_number_to_au, period, EccentricityBand, Orbit};
pub use secondary::Relation;
pub use system::{StarSystem, SystemStar};
pub use worlds::WorldCounts;
pub use zones::Interval;

#[cfg(test)]
mod builder_test;
#[cfg(test)]
mod designation_test;
#[cfg(test)]
mod testing;
#[cfg(test)]
mod worlds_test;
#[cfg(test)]
mod zones_test;
