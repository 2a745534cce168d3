//! Secondary and companion classifications, derived from the star they orbit.

use std::fmt;

use gametable::DiceRoller;
use serde::{Deserialize, Serialize};
use stellar::{names, roll_subtype, Classification, LuminosityClass, RuleTables, SpectralType};
use tracing::debug;

use crate::designation::Designation;
use crate::error::GenerationError;

/// How a secondary relates to its orbital parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Relation {
    /// Same classification, slightly less mass
    Twin,
    /// Same type, a few subtypes cooler
    Sibling,
    /// Next cooler type with a fresh subtype
    Lesser,
    /// A freshly rolled type, no hotter than the parent
    Random,
    /// A remnant or brown dwarf regardless of the parent
    Other(SpectralType),
}

impl Relation {
    pub fn parse(table: &str, result: &str) -> Result<Self, GenerationError> {
        let relation = match result {
            "Twin" => Relation::Twin,
            "Sibling" => Relation::Sibling,
            "Lesser" => Relation::Lesser,
            "Random" => Relation::Random,
            other => match other.parse::<SpectralType>() {
                Ok(spectral_type) if spectral_type.is_exotic() => Relation::Other(spectral_type),
                _ => {
                    return Err(GenerationError::UnexpectedResult {
                        table: table.to_string(),
                        result: result.to_string(),
                    })
                }
            },
        };
        Ok(relation)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Relation::Twin => write!(f, "Twin"),
            Relation::Sibling => write!(f, "Sibling"),
            Relation::Lesser => write!(f, "Lesser"),
            Relation::Random => write!(f, "Random"),
            Relation::Other(spectral_type) => write!(f, "Other ({})", spectral_type),
        }
    }
}

/// Roll how a star relates to its parent
///
/// Companions use the companion table, secondaries the secondary table.
/// An evolved primary (class III or IV) lowers both rolls.
pub fn roll_relation<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    designation: Designation,
    evolved: bool,
) -> Result<Relation, GenerationError> {
    let table = if designation.companion {
        names::COMPANION_STAR
    } else {
        names::SECONDARY_STAR
    };
    let mods: &[&str] = if evolved { &["evolved"] } else { &[] };
    let result = rules.roll(roller, table, mods)?;
    Relation::parse(table, &result)
}

/// Class for a derived star of `spectral_type`
///
/// Dwarf and subgiant parents pass their class on when the new type can
/// carry it; everything else lands on the main sequence.
pub fn secondary_class(
    parent: Option<LuminosityClass>,
    spectral_type: SpectralType,
) -> LuminosityClass {
    match parent {
        Some(class @ (LuminosityClass::IV | LuminosityClass::V | LuminosityClass::VI))
            if class.allows(spectral_type) =>
        {
            class
        }
        _ => LuminosityClass::V,
    }
}

fn settle(
    spectral_type: SpectralType,
    subtype: u8,
    parent: Option<LuminosityClass>,
) -> Classification {
    let inherited = Classification::new(spectral_type, subtype, secondary_class(parent, spectral_type));
    if inherited.validate().is_ok() {
        inherited
    } else {
        Classification::new(spectral_type, subtype, LuminosityClass::V)
    }
}

fn sibling(parent: &Classification, steps: u8) -> Classification {
    let subtype = parent.subtype.unwrap_or(0) + steps;
    if subtype <= 9 {
        return settle(parent.spectral_type, subtype, parent.class);
    }
    match parent.spectral_type.cooler() {
        Some(cooler) => settle(cooler, subtype - 10, parent.class),
        None => Classification::exotic(SpectralType::BD),
    }
}

fn lesser<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    parent: &Classification,
) -> Result<Classification, GenerationError> {
    let Some(cooler) = parent.spectral_type.cooler() else {
        return Ok(Classification::exotic(SpectralType::BD));
    };
    let mut classification = Classification {
        spectral_type: cooler,
        subtype: None,
        class: Some(secondary_class(parent.class, cooler)),
    };
    roll_subtype(roller, rules, &mut classification)?;
    Ok(classification)
}

fn random<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    parent: &Classification,
) -> Result<Classification, GenerationError> {
    let result = rules.roll(roller, names::STAR_TYPE, &[])?;
    let rolled = match result.parse::<SpectralType>() {
        Ok(spectral_type) if !spectral_type.is_exotic() => spectral_type,
        _ => return lesser(roller, rules, parent),
    };

    let mut classification = Classification {
        spectral_type: rolled,
        subtype: None,
        class: Some(secondary_class(parent.class, rolled)),
    };
    roll_subtype(roller, rules, &mut classification)?;
    if classification.temperature_rank() < parent.temperature_rank() {
        debug!(rolled = %classification, parent = %parent, "random secondary hotter than parent");
        return lesser(roller, rules, parent);
    }
    Ok(classification)
}

/// Classification of a star derived from its parent by `relation`
///
/// Exotic parents only have twins and remnants; anything else they would
/// produce is a brown dwarf.
pub fn derive_classification<R: DiceRoller + ?Sized>(
    roller: &mut R,
    rules: &RuleTables,
    parent: &Classification,
    relation: Relation,
) -> Result<Classification, GenerationError> {
    let classification = match relation {
        Relation::Twin => *parent,
        Relation::Other(spectral_type) => Classification::exotic(spectral_type),
        _ if parent.is_exotic() => Classification::exotic(SpectralType::BD),
        Relation::Sibling => {
            let steps = roller.roll("1d6")?;
            sibling(parent, u8::try_from(steps).unwrap_or(6))
        }
        Relation::Lesser => lesser(roller, rules, parent)?,
        Relation::Random => random(roller, rules, parent)?,
    };
    classification.validate()?;
    Ok(classification)
}
