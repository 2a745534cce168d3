use std::ops::{Add, Div, Mul, Sub};

use serde::{Deserialize, Serialize};

pub(crate) const DAYS_PER_YEAR: f64 = 365.25;

/// Years in a gigayear
pub const YEARS_PER_GYR: f64 = 1.0e9;

/// A span of time, stored in years.
///
/// Orbital periods read naturally in years; stellar ages are rolled in
/// gigayears and converted.
///
/// # Examples
///
/// ```rust
/// use units::Time;
///
/// let period = Time::from_years(1.0);
/// let age = Time::from_gyr(4.6);
///
/// assert_eq!(period.to_days(), 365.25);
/// assert_eq!(age.to_years(), 4.6e9);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Time(f64); // Base unit: Years

impl Time {
    /// Creates a zero time value
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Time` from a value in years.
    pub fn from_years(value: f64) -> Self {
        Self(value)
    }

    /// Creates a time from a value in billion years (Gyr)
    pub fn from_gyr(value: f64) -> Self {
        Self(value * YEARS_PER_GYR)
    }

    /// Creates a new `Time` from a value in days.
    pub fn from_days(value: f64) -> Self {
        Self(value / DAYS_PER_YEAR)
    }

    /// Returns the time in years.
    pub fn to_years(&self) -> f64 {
        self.0
    }

    /// Returns the time in billion years
    pub fn to_gyr(&self) -> f64 {
        self.0 / YEARS_PER_GYR
    }

    /// Converts the time to days.
    pub fn to_days(&self) -> f64 {
        self.0 * DAYS_PER_YEAR
    }
}

impl Add for Time {
    type Output = Time;

    fn add(self, rhs: Time) -> Time {
        Time(self.0 + rhs.0)
    }
}

impl Sub for Time {
    type Output = Time;

    fn sub(self, rhs: Time) -> Time {
        Time(self.0 - rhs.0)
    }
}

impl Mul<f64> for Time {
    type Output = Time;

    fn mul(self, rhs: f64) -> Time {
        Time(self.0 * rhs)
    }
}

impl Div<f64> for Time {
    type Output = Time;

    fn div(self, rhs: f64) -> Time {
        Time(self.0 / rhs)
    }
}

/// Division of Time by Time returns a dimensionless ratio
impl Div for Time {
    type Output = f64;

    fn div(self, rhs: Time) -> f64 {
        self.0 / rhs.0
    }
}

/// Allow f64 * Time (commutative multiplication)
impl Mul<Time> for f64 {
    type Output = Time;

    fn mul(self, rhs: Time) -> Time {
        rhs * self
    }
}
