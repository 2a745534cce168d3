//! Orbit numbers, distances, periods and eccentricity.
//!
//! Orbit numbers are the game's logarithmic distance scale: 0 is the
//! stellar surface, 3 is one AU and 20 is about 78,700 AU. Fractional orbit
//! numbers interpolate linearly between the calibration points.

use std::fmt;
use std::str::FromStr;

use gametable::DiceRoller;
use serde::{Deserialize, Serialize};
use stellar::{names, RuleTables};
use tracing::trace;
use units::{Length, Mass, Time};

use crate::designation::{Designation, Zone};
use crate::error::GenerationError;

/// AU at each whole orbit number, 0 through 20
pub const ORBIT_AU: [f64; 21] = [
    0.0, 0.4, 0.7, 1.0, 1.6, 2.8, 5.2, 10.0, 20.0, 40.0, 77.0, 154.0, 308.0, 615.0, 1230.0,
    2500.0, 4900.0, 9800.0, 19500.0, 39500.0, 78700.0,
];

/// Largest orbit number on the scale
pub const MAX_ORBIT: f64 = 20.0;

/// Smallest orbit number a star may be rolled into
pub const MIN_ROLLED_ORBIT: f64 = 0.005;

/// Close secondaries never sit inside this orbit number
pub const MIN_CLOSE_ORBIT: f64 = 0.5;

/// Eccentricity DM every star receives before its position modifier
pub const STAR_ECCENTRICITY_DM: i32 = 1;

/// Round to three decimals below 1, two below 10, one below 100, else whole
pub fn round_distance(au: f64) -> f64 {
    let decimals = match au {
        au if au < 1.0 => 3,
        au if au < 10.0 => 2,
        au if au < 100.0 => 1,
        _ => 0,
    };
    let scale = 10f64.powi(decimals);
    (au * scale).round() / scale
}

/// Distance in AU for an orbit number, clamped to the 0..=20 scale
pub fn orbit_number_to_au(orbit_number: f64) -> f64 {
    if orbit_number.is_nan() || orbit_number <= 0.0 {
        return 0.0;
    }
    if orbit_number >= MAX_ORBIT {
        return ORBIT_AU[20];
    }

    let lower = orbit_number.floor() as usize;
    let fraction = orbit_number - lower as f64;
    let au = ORBIT_AU[lower] + (ORBIT_AU[lower + 1] - ORBIT_AU[lower]) * fraction;
    round_distance(au)
}

/// Orbit number for a distance in AU; the inverse of [`orbit_number_to_au`]
/// before rounding
pub fn au_to_orbit_number(au: f64) -> f64 {
    if au.is_nan() || au <= 0.0 {
        return 0.0;
    }
    for (lower, window) in ORBIT_AU.windows(2).enumerate() {
        if au <= window[1] {
            return lower as f64 + (au - window[0]) / (window[1] - window[0]);
        }
    }
    MAX_ORBIT
}

/// Orbital period from Kepler's third law in solar units: P² = a³ / M
///
/// Returns zero when there is no mass to orbit.
pub fn period(mass1: Mass, mass2: Mass, distance: Length) -> Time {
    let total = mass1 + mass2;
    if total <= Mass::zero() {
        return Time::zero();
    }
    Time::from_years((distance.powi(3) / total.to_solar_masses()).sqrt())
}

/// Roll the orbit number for a non-primary star
///
/// Companions sit close to their lead star; secondaries fall within the
/// band of their zone.
pub fn roll_orbit_number<R: DiceRoller + ?Sized>(
    roller: &mut R,
    designation: Designation,
) -> Result<f64, GenerationError> {
    let orbit_number = if designation.companion {
        let tenths = roller.roll("1d6")? as f64 / 10.0;
        let hundredths = (roller.roll("2d6")? - 7) as f64 / 100.0;
        (tenths + hundredths).max(MIN_ROLLED_ORBIT)
    } else {
        let fraction = (roller.roll("1d10")? - 1) as f64 / 10.0;
        match designation.zone() {
            Some(Zone::Close) => ((roller.roll("1d6")? - 1) as f64 + fraction).max(MIN_CLOSE_ORBIT),
            Some(Zone::Near) => (roller.roll("1d6")? + 5) as f64 + fraction,
            Some(Zone::Far) => (roller.roll("1d6")? + 11) as f64 + fraction,
            None => 0.0,
        }
    };
    trace!(%designation, orbit_number, "orbit number rolled");
    Ok(orbit_number)
}

/// Eccentricity bands from the eccentricity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EccentricityBand {
    Circular,
    Slight,
    Low,
    Moderate,
    High,
    Extreme,
}

impl EccentricityBand {
    /// Roll a value inside this band
    pub fn roll<R: DiceRoller + ?Sized>(&self, roller: &mut R) -> Result<f64, GenerationError> {
        let eccentricity = match self {
            EccentricityBand::Circular => (roller.roll("1d6")? - 1) as f64 / 1000.0,
            EccentricityBand::Slight => roller.roll("1d6")? as f64 / 200.0,
            EccentricityBand::Low => 0.03 + roller.roll("1d6")? as f64 / 100.0,
            EccentricityBand::Moderate => 0.05 + roller.roll("1d6")? as f64 / 20.0,
            EccentricityBand::High => 0.05 + roller.roll("2d6")? as f64 / 20.0,
            EccentricityBand::Extreme => 0.3 + roller.roll("2d6")? as f64 / 20.0,
        };
        Ok(eccentricity)
    }
}

impl fmt::Display for EccentricityBand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            EccentricityBand::Circular => "Circular",
            EccentricityBand::Slight => "Slight",
            EccentricityBand::Low => "Low",
            EccentricityBand::Moderate => "Moderate",
            EccentricityBand::High => "High",
            EccentricityBand::Extreme => "Extreme",
        };
        write!(f, "{}", str)
    }
}

impl FromStr for EccentricityBand {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let band = match s.trim() {
            "Circular" => EccentricityBand::Circular,
            "Slight" => EccentricityBand::Slight,
            "Low" => EccentricityBand::Low,
            "Moderate" => EccentricityBand::Moderate,
            "High" => EccentricityBand::High,
            "Extreme" => EccentricityBand::Extreme,
            _ => {
                return Err(GenerationError::UnexpectedResult {
                    table: names::ECCENTRICITY.to_string(),
                    result: s.to_string(),
                })
            }
        };
        Ok(band)
    }
}

/// Roll the eccentricity of a non-primary star's orbit
pub fn roll_eccentricity<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    designation: Designation,
) -> Result<f64, GenerationError> {
    let dm = STAR_ECCENTRICITY_DM + designation.position_ordinal();
    let band: EccentricityBand = rules
        .cascade(roller, names::ECCENTRICITY, &[], dm)?
        .result
        .parse()?;
    let eccentricity = band.roll(roller)?;
    trace!(%designation, %band, eccentricity, "eccentricity rolled");
    Ok(eccentricity)
}

/// Orbit of one star around its orbital parent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orbit {
    pub parent: Designation,
    pub orbit_number: f64,
    pub semi_major_axis: Length,
    pub eccentricity: f64,
    pub period: Time,
}

impl Orbit {
    pub fn new(parent: Designation, orbit_number: f64, eccentricity: f64) -> Self {
        Self {
            parent,
            orbit_number,
            semi_major_axis: Length::from_au(orbit_number_to_au(orbit_number)),
            eccentricity,
            period: Time::zero(),
        }
    }

    /// Closest approach to the parent
    pub fn periapsis(&self) -> Length {
        self.semi_major_axis * (1.0 - self.eccentricity)
    }

    /// Farthest distance from the parent
    pub fn apoapsis(&self) -> Length {
        self.semi_major_axis * (1.0 + self.eccentricity)
    }
}
