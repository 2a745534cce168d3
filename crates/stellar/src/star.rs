//! Generated stars.

use serde::{Deserialize, Serialize};
use units::{Length, Mass, Temperature, Time};

use crate::classification::Classification;
use crate::error::StellarError;
use crate::spectral::{LuminosityClass, SpectralType};

/// Effective temperature of the Sun in Kelvin
pub const SOLAR_TEMPERATURE: f64 = 5772.0;

/// Age of the universe in gigayears; no star is older
pub const AGE_OF_UNIVERSE: f64 = 13.8;

/// A star and its physical properties
///
/// Luminosity is in solar luminosities; the other quantities carry their
/// unit in their type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Star {
    pub spectral_type: SpectralType,
    /// Spectral subtype (0-9), absent for exotic types
    pub subtype: Option<u8>,
    pub luminosity_class: Option<LuminosityClass>,
    pub mass: Mass,
    pub diameter: Length,
    pub temperature: Temperature,
    pub luminosity: f64,
    pub age: Time,
}

impl Star {
    /// A star with a classification and no physical properties yet
    pub fn new(classification: Classification) -> Self {
        Self {
            spectral_type: classification.spectral_type,
            subtype: classification.subtype,
            luminosity_class: classification.class,
            mass: Mass::zero(),
            diameter: Length::zero(),
            temperature: Temperature::zero(),
            luminosity: 0.0,
            age: Time::zero(),
        }
    }

    pub fn from_index(index: u32) -> Result<Self, StellarError> {
        Classification::from_index(index).map(Self::new)
    }

    pub fn classification(&self) -> Classification {
        Classification {
            spectral_type: self.spectral_type,
            subtype: self.subtype,
            class: self.luminosity_class,
        }
    }

    /// Interpolation key, see [`Classification::index`]
    pub fn index(&self) -> Option<u32> {
        self.classification().index()
    }

    /// Text code such as `"G2 V"` or `"BD"`
    pub fn code(&self) -> String {
        self.classification().to_string()
    }

    pub fn is_exotic(&self) -> bool {
        self.spectral_type.is_exotic()
    }

    pub fn validate_tsc(&self) -> Result<(), StellarError> {
        self.classification().validate()
    }

    /// Recompute luminosity from diameter and temperature
    pub fn update_luminosity(&mut self) {
        self.luminosity = luminosity(self.diameter, self.temperature);
    }
}

/// Stefan-Boltzmann in solar units: L = D² × (T / T☉)⁴
pub fn luminosity(diameter: Length, temperature: Temperature) -> f64 {
    let solar = Temperature::from_kelvin(SOLAR_TEMPERATURE);
    diameter.to_solar_diameters().powi(2) * (temperature / solar).powi(4)
}
