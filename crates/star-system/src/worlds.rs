//! Counts of gas giants, planetoid belts and terrestrial planets.

use gametable::DiceRoller;
use serde::{Deserialize, Serialize};
use stellar::{names, LuminosityClass, RuleTables, SpectralType, Star};
use tracing::debug;

use crate::error::GenerationError;

/// How many of each world type a system holds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldCounts {
    pub gas_giants: u32,
    pub planetoid_belts: u32,
    pub terrestrial_planets: u32,
}

impl WorldCounts {
    pub fn total(&self) -> u32 {
        self.gas_giants + self.planetoid_belts + self.terrestrial_planets
    }
}

/// Fewest terrestrial planets a system ends up with
const MIN_TERRESTRIAL: i32 = 3;

/// Roll a presence table that answers `Present` or `Absent`
pub(crate) fn is_present<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    table: &str,
    mods: &[&str],
) -> Result<bool, GenerationError> {
    match rules.roll(roller, table, mods)?.as_str() {
        "Present" => Ok(true),
        "Absent" => Ok(false),
        other => Err(GenerationError::UnexpectedResult {
            table: table.to_string(),
            result: other.to_string(),
        }),
    }
}

fn quantity<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    table: &str,
    mods: &[&str],
    dm: i32,
) -> Result<u32, GenerationError> {
    let count = rules.roll_number(roller, table, mods, dm)?;
    Ok(count.max(1) as u32)
}

/// Roll world counts for a system of `stars`, primary first
///
/// Remnants (white dwarfs, neutron stars, pulsars and black holes) strip
/// worlds: each lowers the gas giant quantity and the terrestrial count by
/// one. Marker primaries such as nebulae hold no worlds.
pub fn roll_world_counts<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    stars: &[&Star],
) -> Result<WorldCounts, GenerationError> {
    let Some(primary) = stars.first() else {
        return Ok(WorldCounts::default());
    };
    if primary.spectral_type.is_marker() {
        return Ok(WorldCounts::default());
    }

    let post_stellar = stars
        .iter()
        .filter(|star| star.spectral_type.is_post_stellar())
        .count() as i32;

    let mut counts = WorldCounts::default();

    if is_present(roller, rules, names::GAS_GIANT_PRESENCE, &[])? {
        let mut mods = Vec::new();
        if stars.len() == 1 && primary.luminosity_class == Some(LuminosityClass::V) {
            mods.push("single_dwarf");
        }
        if primary.spectral_type == SpectralType::BD {
            mods.push("brown_dwarf_primary");
        }
        if stars.len() >= 4 {
            mods.push("crowded");
        }
        counts.gas_giants = quantity(
            roller,
            rules,
            names::GAS_GIANT_QUANTITY,
            &mods,
            -post_stellar,
        )?;
    }

    if is_present(roller, rules, names::BELT_PRESENCE, &[])? {
        let mods: &[&str] = if counts.gas_giants > 0 {
            &["gas_giants"]
        } else {
            &[]
        };
        counts.planetoid_belts = quantity(roller, rules, names::BELT_QUANTITY, mods, 0)?;
    }

    let terrestrial = roller.roll("2d6-2")? - post_stellar;
    counts.terrestrial_planets = if terrestrial < MIN_TERRESTRIAL {
        (roller.roll("1d3")? + 2) as u32
    } else {
        terrestrial as u32
    };

    debug!(
        gas_giants = counts.gas_giants,
        belts = counts.planetoid_belts,
        terrestrial = counts.terrestrial_planets,
        "world counts rolled"
    );
    Ok(counts)
}
