use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

const CELSIUS_OFFSET: f64 = 273.15;

/// A temperature, stored in Kelvin.
///
/// # Examples
///
/// ```rust
/// use units::Temperature;
///
/// let photosphere = Temperature::from_kelvin(5772.0);
/// let freezing = Temperature::from_celsius(0.0);
///
/// assert_eq!(freezing.to_kelvin(), 273.15);
/// assert!(photosphere / freezing > 21.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    /// Absolute zero, also used for bodies with no meaningful surface
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Temperature` from a value in Kelvin.
    ///
    /// This is the most direct constructor since Kelvin is the base unit.
    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    pub fn from_celsius(value: f64) -> Self {
        Self(value + CELSIUS_OFFSET)
    }

    pub fn to_kelvin(&self) -> f64 {
        self.0
    }

    pub fn to_celsius(&self) -> f64 {
        self.0 - CELSIUS_OFFSET
    }

    /// Natural logarithm of the Kelvin value
    pub fn ln(&self) -> f64 {
        self.0.ln()
    }
}

impl Add for Temperature {
    type Output = Temperature;

    fn add(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 + rhs.0)
    }
}

impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 - rhs.0)
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature(self.0 * rhs)
    }
}

impl Div<f64> for Temperature {
    type Output = Temperature;

    fn div(self, rhs: f64) -> Temperature {
        Temperature(self.0 / rhs)
    }
}

/// Division of Temperature by Temperature returns a dimensionless ratio
impl Div for Temperature {
    type Output = f64;

    fn div(self, rhs: Temperature) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Temperature (commutative multiplication)
impl Mul<Temperature> for f64 {
    type Output = Temperature;

    fn mul(self, rhs: Temperature) -> Temperature {
        rhs * self
    }
}
