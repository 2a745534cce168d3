//! Row keys: a closed integer interval written as a short string.

use std::fmt;
use std::str::FromStr;

use crate::error::RangeKeyError;

/// Upper end of an open `"N+"` key
pub const UPPER_BOUND: i32 = 10000;
/// Lower end of an open `"N-"` key
pub const LOWER_BOUND: i32 = -10000;

/// Inclusive interval of rolls matched by a table row
///
/// | form      | meaning                  |
/// |-----------|--------------------------|
/// | `"7"`     | exactly 7                |
/// | `"9..10"` | 9 through 10             |
/// | `"12+"`   | 12 up to [`UPPER_BOUND`] |
/// | `"8-"`    | [`LOWER_BOUND`] up to 8  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RangeKey {
    low: i32,
    high: i32,
}

impl RangeKey {
    pub fn new(low: i32, high: i32) -> Result<Self, RangeKeyError> {
        if low > high {
            return Err(RangeKeyError {
                key: format!("{}..{}", low, high),
                reason: "lower end is above upper end",
            });
        }
        Ok(Self { low, high })
    }

    pub fn exact(value: i32) -> Self {
        Self {
            low: value,
            high: value,
        }
    }

    pub fn parse(input: &str) -> Result<Self, RangeKeyError> {
        let key = input.trim();
        let invalid = |reason| RangeKeyError {
            key: input.to_string(),
            reason,
        };
        if key.is_empty() {
            return Err(invalid("empty key"));
        }

        if let Some((low, high)) = key.split_once("..") {
            let low = bound(low).ok_or_else(|| invalid("lower end is not an integer"))?;
            let high = bound(high).ok_or_else(|| invalid("upper end is not an integer"))?;
            if low > high {
                return Err(invalid("lower end is above upper end"));
            }
            return Ok(Self { low, high });
        }

        if let Some(low) = key.strip_suffix('+') {
            let low = bound(low).ok_or_else(|| invalid("expected N+"))?;
            return Self::new(low, UPPER_BOUND.max(low)).map_err(|_| invalid("out of range"));
        }

        if key.len() > 1 {
            if let Some(high) = key.strip_suffix('-') {
                let high = bound(high).ok_or_else(|| invalid("expected N-"))?;
                return Self::new(LOWER_BOUND.min(high), high)
                    .map_err(|_| invalid("out of range"));
            }
        }

        bound(key)
            .map(Self::exact)
            .ok_or_else(|| invalid("expected an integer, N+, N- or lo..hi"))
    }

    pub fn low(&self) -> i32 {
        self.low
    }

    pub fn high(&self) -> i32 {
        self.high
    }

    pub fn contains(&self, roll: i32) -> bool {
        self.low <= roll && roll <= self.high
    }

    pub fn overlaps(&self, other: &RangeKey) -> bool {
        self.low <= other.high && other.low <= self.high
    }
}

fn bound(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

impl fmt::Display for RangeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.low, self.high) {
            (low, high) if low == high => write!(f, "{}", low),
            (low, UPPER_BOUND) => write!(f, "{}+", low),
            (LOWER_BOUND, high) => write!(f, "{}-", high),
            (low, high) => write!(f, "{}..{}", low, high),
        }
    }
}

impl FromStr for RangeKey {
    type Err = RangeKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
