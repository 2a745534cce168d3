//! Sparse lookup maps keyed by star index, with linear interpolation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;
use units::{Length, Mass, Temperature, Time};

use crate::classification::Classification;
use crate::error::StellarError;
use crate::spectral::LuminosityClass;
use crate::stellar_data::{self, DataRow};

/// Values tabulated at a few star indices
///
/// Lookups between two tabulated indices of the same luminosity class are
/// interpolated linearly. Anything outside the tabulated range of a class
/// yields 0, which callers treat as "not defined for this star".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterpolationMap {
    points: BTreeMap<u32, f64>,
}

impl InterpolationMap {
    pub fn new(points: impl IntoIterator<Item = (u32, f64)>) -> Self {
        Self {
            points: points.into_iter().collect(),
        }
    }

    fn from_rows(rows: &[DataRow]) -> Self {
        let mut points = BTreeMap::new();
        for (spectral_type, subtype, values) in rows {
            for (class, value) in LuminosityClass::ALL.iter().zip(values) {
                if value.is_nan() {
                    continue;
                }
                let key = Classification::new(*spectral_type, *subtype, *class).index();
                if let Some(key) = key {
                    points.insert(key, *value);
                }
            }
        }
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn by_index(&self, index: u32) -> f64 {
        if let Some(value) = self.points.get(&index) {
            return *value;
        }
        let lower = self.points.range(..index).next_back();
        let upper = self.points.range(index + 1..).next();
        match (lower, upper) {
            (Some((&lo, &lo_value)), Some((&hi, &hi_value)))
                if lo / 100 == index / 100 && hi / 100 == index / 100 =>
            {
                let fraction = (index - lo) as f64 / (hi - lo) as f64;
                lo_value + (hi_value - lo_value) * fraction
            }
            _ => 0.0,
        }
    }
}

/// Temperature of a white dwarf as it cools, interpolated in log space
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoolingCurve {
    points: Vec<(f64, f64)>,
}

impl CoolingCurve {
    /// `points` are (age in gigayears, Kelvin) pairs; they are sorted by age
    pub fn new(points: impl IntoIterator<Item = (f64, f64)>) -> Self {
        let mut points: Vec<(f64, f64)> = points.into_iter().collect();
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { points }
    }

    /// Temperature at `age`, clamped to the ends of the curve
    pub fn temperature(&self, age: Time) -> Temperature {
        Temperature::from_kelvin(self.kelvin_at(age.to_gyr()))
    }

    fn kelvin_at(&self, gyr: f64) -> f64 {
        let (Some(first), Some(last)) = (self.points.first(), self.points.last()) else {
            return 0.0;
        };
        if gyr <= first.0 {
            return first.1;
        }
        if gyr >= last.0 {
            return last.1;
        }
        let upper = self.points.partition_point(|(a, _)| *a <= gyr);
        let (a0, t0) = self.points[upper - 1];
        let (a1, t1) = self.points[upper];
        let fraction = (gyr - a0) / (a1 - a0);
        (t0.ln() + (t1.ln() - t0.ln()) * fraction).exp()
    }
}

/// The tabulated physical data generation reads from
///
/// Build once with [`StellarTables::standard`] and share by reference; the
/// maps are plain data and can be swapped or deserialized. They hold mass in
/// solar masses, diameter in solar diameters and temperature in Kelvin; the
/// lookups below return typed quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StellarTables {
    pub mass: InterpolationMap,
    pub diameter: InterpolationMap,
    pub temperature: InterpolationMap,
    pub minimum_orbit: InterpolationMap,
    pub white_dwarf_cooling: CoolingCurve,
}

impl StellarTables {
    pub fn standard() -> Self {
        Self {
            mass: InterpolationMap::from_rows(stellar_data::MASS),
            diameter: InterpolationMap::from_rows(stellar_data::DIAMETER),
            temperature: InterpolationMap::from_rows(stellar_data::TEMPERATURE),
            minimum_orbit: InterpolationMap::from_rows(stellar_data::MINIMUM_ORBIT),
            white_dwarf_cooling: CoolingCurve::new(stellar_data::WHITE_DWARF_COOLING.iter().copied()),
        }
    }

    pub fn mass(&self, classification: &Classification) -> Result<Mass, StellarError> {
        lookup(&self.mass, "mass", classification).map(Mass::from_solar_masses)
    }

    pub fn diameter(&self, classification: &Classification) -> Result<Length, StellarError> {
        lookup(&self.diameter, "diameter", classification).map(Length::from_solar_diameters)
    }

    pub fn temperature(
        &self,
        classification: &Classification,
    ) -> Result<Temperature, StellarError> {
        lookup(&self.temperature, "temperature", classification).map(Temperature::from_kelvin)
    }

    /// Minimum allowed orbit number
    pub fn minimum_orbit(&self, classification: &Classification) -> Result<f64, StellarError> {
        lookup(&self.minimum_orbit, "minimum orbit", classification)
    }
}

impl Default for StellarTables {
    fn default() -> Self {
        Self::standard()
    }
}

fn lookup(
    map: &InterpolationMap,
    quantity: &'static str,
    classification: &Classification,
) -> Result<f64, StellarError> {
    let index = classification
        .index()
        .ok_or_else(|| StellarError::InvalidClassification {
            code: classification.to_string(),
            reason: "only main sequence types are tabulated",
        })?;
    let value = map.by_index(index);
    trace!(quantity, index, value, "interpolated");
    if value == 0.0 {
        return Err(StellarError::InterpolationFailed { quantity, index });
    }
    Ok(value)
}
