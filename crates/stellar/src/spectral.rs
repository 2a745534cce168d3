use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StellarError;

/// Spectral type of a star, including the exotic and peculiar results of the
/// type tables
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralType {
    // Main sequence types, hottest first
    O,
    B,
    A,
    F,
    G,
    K,
    M,

    D,   // White dwarf
    BD,  // Brown dwarf
    NS,  // Neutron star
    PSR, // Pulsar
    BH,  // Black hole

    // Peculiar markers, not stars in their own right
    Protostar,
    Nebula,
    Cluster,
    Anomaly,
}

impl SpectralType {
    pub const MAIN_SEQUENCE: [SpectralType; 7] = [
        SpectralType::O,
        SpectralType::B,
        SpectralType::A,
        SpectralType::F,
        SpectralType::G,
        SpectralType::K,
        SpectralType::M,
    ];

    /// Position in the O..M sequence (O = 0); `None` for everything else
    pub fn ordinal(&self) -> Option<u8> {
        Self::MAIN_SEQUENCE
            .iter()
            .position(|t| t == self)
            .map(|i| i as u8)
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::MAIN_SEQUENCE.get(ordinal as usize).copied()
    }

    /// Anything outside O..M: remnants, brown dwarfs and peculiar markers
    pub fn is_exotic(&self) -> bool {
        self.ordinal().is_none()
    }

    pub fn is_marker(&self) -> bool {
        matches!(
            self,
            SpectralType::Protostar
                | SpectralType::Nebula
                | SpectralType::Cluster
                | SpectralType::Anomaly
        )
    }

    /// Stellar remnants: white dwarfs, neutron stars, pulsars, black holes
    pub fn is_post_stellar(&self) -> bool {
        matches!(
            self,
            SpectralType::D | SpectralType::NS | SpectralType::PSR | SpectralType::BH
        )
    }

    /// Next type down the O..M sequence
    pub fn cooler(&self) -> Option<Self> {
        self.ordinal().and_then(|ordinal| Self::from_ordinal(ordinal + 1))
    }
}

impl fmt::Display for SpectralType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            SpectralType::O => "O",
            SpectralType::B => "B",
            SpectralType::A => "A",
            SpectralType::F => "F",
            SpectralType::G => "G",
            SpectralType::K => "K",
            SpectralType::M => "M",
            SpectralType::D => "D",
            SpectralType::BD => "BD",
            SpectralType::NS => "NS",
            SpectralType::PSR => "PSR",
            SpectralType::BH => "BH",
            SpectralType::Protostar => "Protostar",
            SpectralType::Nebula => "Nebula",
            SpectralType::Cluster => "Cluster",
            SpectralType::Anomaly => "Anomaly",
        };
        write!(f, "{}", str)
    }
}

impl FromStr for SpectralType {
    type Err = StellarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spectral_type = match s.trim() {
            "O" => SpectralType::O,
            "B" => SpectralType::B,
            "A" => SpectralType::A,
            "F" => SpectralType::F,
            "G" => SpectralType::G,
            "K" => SpectralType::K,
            "M" => SpectralType::M,
            "D" => SpectralType::D,
            "BD" => SpectralType::BD,
            "NS" => SpectralType::NS,
            "PSR" => SpectralType::PSR,
            "BH" => SpectralType::BH,
            "Protostar" => SpectralType::Protostar,
            "Nebula" => SpectralType::Nebula,
            "Cluster" => SpectralType::Cluster,
            "Anomaly" => SpectralType::Anomaly,
            other => return Err(StellarError::UnknownType(other.to_string())),
        };
        Ok(spectral_type)
    }
}

/// Yerkes luminosity class
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LuminosityClass {
    IA,  // Bright supergiants
    IB,  // Supergiants
    II,  // Bright giants
    III, // Normal giants
    IV,  // Subgiants
    V,   // Main sequence
    VI,  // Subdwarfs
}

impl LuminosityClass {
    pub const ALL: [LuminosityClass; 7] = [
        LuminosityClass::IA,
        LuminosityClass::IB,
        LuminosityClass::II,
        LuminosityClass::III,
        LuminosityClass::IV,
        LuminosityClass::V,
        LuminosityClass::VI,
    ];

    /// Position used by the star index, Ia = 1 through VI = 7
    pub fn ordinal(&self) -> u8 {
        match self {
            LuminosityClass::IA => 1,
            LuminosityClass::IB => 2,
            LuminosityClass::II => 3,
            LuminosityClass::III => 4,
            LuminosityClass::IV => 5,
            LuminosityClass::V => 6,
            LuminosityClass::VI => 7,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.iter().find(|c| c.ordinal() == ordinal).copied()
    }

    /// Classes III and brighter
    pub fn is_giant(&self) -> bool {
        self.ordinal() <= LuminosityClass::III.ordinal()
    }

    /// Whether a star of `spectral_type` can carry this class
    pub fn allows(&self, spectral_type: SpectralType) -> bool {
        use SpectralType::*;
        if spectral_type.is_exotic() {
            return false;
        }
        match self {
            LuminosityClass::IV => matches!(spectral_type, B | A | F | G | K),
            LuminosityClass::VI => !matches!(spectral_type, O | B | A),
            _ => true,
        }
    }
}

impl fmt::Display for LuminosityClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            LuminosityClass::IA => "Ia",
            LuminosityClass::IB => "Ib",
            LuminosityClass::II => "II",
            LuminosityClass::III => "III",
            LuminosityClass::IV => "IV",
            LuminosityClass::V => "V",
            LuminosityClass::VI => "VI",
        };
        write!(f, "{}", str)
    }
}

impl FromStr for LuminosityClass {
    type Err = StellarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let class = match s.trim() {
            "Ia" => LuminosityClass::IA,
            "Ib" => LuminosityClass::IB,
            "II" => LuminosityClass::II,
            "III" => LuminosityClass::III,
            "IV" => LuminosityClass::IV,
            "V" => LuminosityClass::V,
            "VI" => LuminosityClass::VI,
            other => return Err(StellarError::UnknownClass(other.to_string())),
        };
        Ok(class)
    }
}
