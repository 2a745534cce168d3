//! The finished star system.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use stellar::Star;
use units::Mass;

use crate::designation::{Designation, Slot};
use crate::metadata::SystemMetadata;
use crate::orbit::{Orbit, MAX_ORBIT};
use crate::worlds::WorldCounts;
use crate::zones::{allowed_orbits, companion_exclusion, secondary_exclusion, Interval};

/// Orbit numbers inside a secondary's own orbit kept clear for planets
pub const SECONDARY_ORBIT_MARGIN: f64 = 3.0;

/// One star and, for everything but the primary, its orbit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStar {
    pub designation: Designation,
    pub star: Star,
    /// Minimum allowed orbit number for planets around this star
    pub minimum_orbit: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orbit: Option<Orbit>,
}

/// A generated system: stars keyed by designation, plus world counts
///
/// Systems come out of [`generate_star_system`](crate::generate_star_system)
/// or [`StarSystemBuilder`](crate::StarSystemBuilder) and are always
/// validated. There is always a primary at `Aa`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarSystem {
    pub metadata: SystemMetadata,
    stars: BTreeMap<Designation, SystemStar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub world_counts: Option<WorldCounts>,
}

impl StarSystem {
    pub(crate) fn new(
        metadata: SystemMetadata,
        stars: BTreeMap<Designation, SystemStar>,
        world_counts: Option<WorldCounts>,
    ) -> Self {
        Self {
            metadata,
            stars,
            world_counts,
        }
    }

    /// Stars in designation order, primary first
    pub fn stars(&self) -> impl Iterator<Item = &SystemStar> {
        self.stars.values()
    }

    pub fn designations(&self) -> impl Iterator<Item = Designation> + '_ {
        self.stars.keys().copied()
    }

    pub fn primary(&self) -> Option<&SystemStar> {
        self.stars.get(&Designation::PRIMARY)
    }

    pub fn get(&self, designation: Designation) -> Option<&SystemStar> {
        self.stars.get(&designation)
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    pub fn is_multiple(&self) -> bool {
        self.stars.len() > 1
    }

    pub fn total_mass(&self) -> Mass {
        self.stars.values().map(|entry| entry.star.mass).sum()
    }

    /// Mass of a slot's lead star plus its companion, if any
    pub fn slot_mass(&self, slot: Slot) -> Mass {
        [Designation::lead(slot), Designation::companion_of(slot)]
            .iter()
            .filter_map(|designation| self.stars.get(designation))
            .map(|entry| entry.star.mass)
            .sum()
    }

    pub fn total_luminosity(&self) -> f64 {
        self.stars.values().map(|entry| entry.star.luminosity).sum()
    }

    /// Orbit-number ranges around `designation` where planets may orbit
    ///
    /// Around the primary this is its minimum allowed orbit out to orbit 20,
    /// minus the bands kept clear by its companion and every secondary. A
    /// secondary keeps the range from its own minimum orbit to three orbits
    /// inside its own orbit, minus its companion's band. Companions have no
    /// planets of their own.
    pub fn allowed_orbits(&self, designation: Designation) -> Vec<Interval> {
        let Some(entry) = self.stars.get(&designation) else {
            return Vec::new();
        };
        if designation.companion {
            return Vec::new();
        }

        let companion = self
            .stars
            .get(&Designation::companion_of(designation.slot))
            .and_then(|companion| companion.orbit.as_ref())
            .map(companion_exclusion);

        match (designation.zone(), entry.orbit.as_ref()) {
            (None, _) => {
                let secondaries = self.stars.values().filter_map(|other| {
                    let zone = other.designation.zone()?;
                    if other.designation.companion {
                        return None;
                    }
                    other
                        .orbit
                        .as_ref()
                        .map(|orbit| secondary_exclusion(orbit, zone))
                });
                allowed_orbits(
                    entry.minimum_orbit,
                    MAX_ORBIT,
                    companion.into_iter().chain(secondaries),
                )
            }
            (Some(_), Some(orbit)) => allowed_orbits(
                entry.minimum_orbit,
                orbit.orbit_number - SECONDARY_ORBIT_MARGIN,
                companion,
            ),
            (Some(_), None) => Vec::new(),
        }
    }
}
