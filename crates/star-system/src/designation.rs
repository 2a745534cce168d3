//! Star designations within a system: `Aa`, `Ab`, `Ba` ... `Db`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

/// Orbital zone a secondary occupies around the primary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Close,
    Near,
    Far,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Close, Zone::Near, Zone::Far];

    /// Position among Close, Near and Far, starting at 0
    pub fn ordinal(&self) -> i32 {
        match self {
            Zone::Close => 0,
            Zone::Near => 1,
            Zone::Far => 2,
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            Zone::Close => "Close",
            Zone::Near => "Near",
            Zone::Far => "Far",
        };
        write!(f, "{}", str)
    }
}

/// First letter of a designation; A is the primary slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Slot {
    A,
    B,
    C,
    D,
}

impl Slot {
    pub const ALL: [Slot; 4] = [Slot::A, Slot::B, Slot::C, Slot::D];

    /// Zone of the secondary in this slot; the primary slot has none
    pub fn zone(&self) -> Option<Zone> {
        match self {
            Slot::A => None,
            Slot::B => Some(Zone::Close),
            Slot::C => Some(Zone::Near),
            Slot::D => Some(Zone::Far),
        }
    }

    pub fn from_zone(zone: Zone) -> Self {
        match zone {
            Zone::Close => Slot::B,
            Zone::Near => Slot::C,
            Zone::Far => Slot::D,
        }
    }

    fn letter(&self) -> char {
        match self {
            Slot::A => 'A',
            Slot::B => 'B',
            Slot::C => 'C',
            Slot::D => 'D',
        }
    }
}

/// Stable identifier of one star in a system
///
/// Ordering is lexical on the two-letter code, so the primary `Aa` sorts
/// first and every companion sorts directly after the star it orbits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Designation {
    pub slot: Slot,
    pub companion: bool,
}

impl Designation {
    pub const PRIMARY: Designation = Designation {
        slot: Slot::A,
        companion: false,
    };

    pub fn new(slot: Slot, companion: bool) -> Self {
        Self { slot, companion }
    }

    /// The `a` star of a slot
    pub fn lead(slot: Slot) -> Self {
        Self::new(slot, false)
    }

    /// The `b` star of a slot
    pub fn companion_of(slot: Slot) -> Self {
        Self::new(slot, true)
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }

    /// Zone of this star's slot, `None` for the primary pair
    pub fn zone(&self) -> Option<Zone> {
        self.slot.zone()
    }

    /// The star this one orbits
    ///
    /// Companions orbit the lead star of their slot, secondaries orbit the
    /// primary, and the primary orbits nothing.
    pub fn orbital_parent(&self) -> Option<Designation> {
        if self.companion {
            Some(Self::lead(self.slot))
        } else if self.slot == Slot::A {
            None
        } else {
            Some(Self::PRIMARY)
        }
    }

    /// Position modifier used by the eccentricity roll
    pub fn position_ordinal(&self) -> i32 {
        match (self.companion, self.zone()) {
            (false, Some(zone)) => zone.ordinal(),
            _ => 0,
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let suffix = if self.companion { 'b' } else { 'a' };
        write!(f, "{}{}", self.slot.letter(), suffix)
    }
}

impl FromStr for Designation {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GenerationError::InvalidDesignation(s.to_string());
        let mut chars = s.trim().chars();
        let slot = match chars.next() {
            Some('A') => Slot::A,
            Some('B') => Slot::B,
            Some('C') => Slot::C,
            Some('D') => Slot::D,
            _ => return Err(invalid()),
        };
        let companion = match chars.next() {
            Some('a') => false,
            Some('b') => true,
            _ => return Err(invalid()),
        };
        if chars.next().is_some() {
            return Err(invalid());
        }
        Ok(Self { slot, companion })
    }
}

impl TryFrom<String> for Designation {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Designation> for String {
    fn from(value: Designation) -> Self {
        value.to_string()
    }
}
