//! Stars: classification, tabulated physical data and generation.
//!
//! Generation is driven by two injected registries. [`StellarTables`] holds
//! the interpolation maps for mass, diameter, temperature and minimum
//! allowed orbit; [`RuleTables`] holds the dice tables that pick type, class
//! and subtype. Build both once and pass them by reference.

pub mod classification;
pub mod error;
pub mod generation;
pub mod interpolation;
pub mod rules;
pub mod spectral;
pub mod star;
mod stellar_data;

#[cfg(test)]
mod generation_test;
#[cfg(test)]
mod rules_test;

pub use classification::Classification;
pub use error::StellarError;
pub use interpolation::{CoolingCurve, InterpolationMap, StellarTables};
pub use rules::{names, RuleTables};
pub use spectral::{LuminosityClass, SpectralType};
pub use star::{luminosity, Star, AGE_OF_UNIVERSE, SOLAR_TEMPERATURE};

pub use generation::{
    complete_star, generate_star, main_sequence_lifespan, minimum_allowed_orbit, roll_age,
    roll_mass, roll_subtype, roll_type_and_class,
};
