//! Physical quantities with their base unit fixed in the type.
//!
//! Each quantity wraps an `f64` in the unit stellar work reads most
//! naturally: solar masses, astronomical units, Kelvin and years. Values
//! serialize as the bare number in that base unit.

pub mod length;
pub mod mass;
pub mod temperature;
pub mod time;

#[cfg(test)]
mod length_test;

pub use length::{Length, AU_TO_KM, SOLAR_RADIUS_AU};
pub use mass::{Mass, EARTH_MASS_G, SOLAR_MASS_G};
pub use temperature::Temperature;
pub use time::{Time, YEARS_PER_GYR};
