//! Orbit-number ranges where planets may orbit, after removing the zones
//! other stars keep clear.

use serde::{Deserialize, Serialize};

use crate::designation::Zone;
use crate::orbit::{Orbit, MAX_ORBIT};

/// Half-width of the band kept clear around a companion, before eccentricity
pub const COMPANION_EXCLUSION: f64 = 0.5;

/// Half-width of the band kept clear around a secondary, before eccentricity
pub const SECONDARY_EXCLUSION: f64 = 1.0;

/// Closed range of orbit numbers
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
}

impl Interval {
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn width(&self) -> f64 {
        (self.end - self.start).max(0.0)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn contains(&self, orbit_number: f64) -> bool {
        orbit_number >= self.start && orbit_number <= self.end
    }

    pub fn overlaps(&self, other: &Interval) -> bool {
        other.start < self.end && other.end > self.start
    }
}

/// Remove `excluded` from every range, splitting ranges it cuts through and
/// dropping ranges it covers
pub fn subtract(ranges: &[Interval], excluded: Interval) -> Vec<Interval> {
    let mut remaining = Vec::with_capacity(ranges.len() + 1);
    for range in ranges {
        if !range.overlaps(&excluded) {
            remaining.push(*range);
            continue;
        }
        if excluded.start > range.start {
            remaining.push(Interval::new(range.start, excluded.start));
        }
        if excluded.end < range.end {
            remaining.push(Interval::new(excluded.end, range.end));
        }
    }
    remaining
}

/// Band kept clear around a companion star
pub fn companion_exclusion(orbit: &Orbit) -> Interval {
    let half_width = COMPANION_EXCLUSION + orbit.eccentricity;
    Interval::new(orbit.orbit_number - half_width, orbit.orbit_number + half_width)
}

/// Half-width of the band kept clear around a secondary
///
/// Widened by one for eccentricity above 0.2 and by one more above 0.5,
/// except in the Far zone.
pub fn secondary_exclusion_width(eccentricity: f64, zone: Zone) -> f64 {
    let mut width = SECONDARY_EXCLUSION;
    if eccentricity > 0.2 {
        width += 1.0;
    }
    if eccentricity > 0.5 && zone != Zone::Far {
        width += 1.0;
    }
    width
}

/// Band kept clear around a secondary star
pub fn secondary_exclusion(orbit: &Orbit, zone: Zone) -> Interval {
    let half_width = secondary_exclusion_width(orbit.eccentricity, zone);
    Interval::new(orbit.orbit_number - half_width, orbit.orbit_number + half_width)
}

/// Ranges between `minimum` and `limit` that survive every exclusion
///
/// `limit` is capped at orbit 20.
pub fn allowed_orbits(
    minimum: f64,
    limit: f64,
    exclusions: impl IntoIterator<Item = Interval>,
) -> Vec<Interval> {
    let full = Interval::new(minimum, limit.min(MAX_ORBIT));
    if full.is_empty() {
        return Vec::new();
    }
    exclusions
        .into_iter()
        .fold(vec![full], |ranges, excluded| subtract(&ranges, excluded))
}
