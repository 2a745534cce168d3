//! Spectral type, subtype and luminosity class taken together.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StellarError;
use crate::spectral::{LuminosityClass, SpectralType};

/// The (type, subtype, class) triple that every other stellar property is
/// derived from
///
/// Exotic types carry neither subtype nor class. Text form is the usual
/// code: `"G2 V"`, `"M5 VI"`, `"D"`, `"BD"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Classification {
    pub spectral_type: SpectralType,
    pub subtype: Option<u8>,
    pub class: Option<LuminosityClass>,
}

impl Classification {
    pub fn new(spectral_type: SpectralType, subtype: u8, class: LuminosityClass) -> Self {
        Self {
            spectral_type,
            subtype: Some(subtype),
            class: Some(class),
        }
    }

    pub fn exotic(spectral_type: SpectralType) -> Self {
        Self {
            spectral_type,
            subtype: None,
            class: None,
        }
    }

    pub fn is_exotic(&self) -> bool {
        self.spectral_type.is_exotic()
    }

    /// Interpolation key: class × 100 + type × 10 + subtype
    ///
    /// Only defined for main sequence types with a class and subtype.
    pub fn index(&self) -> Option<u32> {
        let type_ordinal = self.spectral_type.ordinal()? as u32;
        let class = self.class?.ordinal() as u32;
        let subtype = self.subtype? as u32;
        Some(class * 100 + type_ordinal * 10 + subtype)
    }

    pub fn from_index(index: u32) -> Result<Self, StellarError> {
        let class = LuminosityClass::from_ordinal((index / 100) as u8);
        let spectral_type = SpectralType::from_ordinal(((index / 10) % 10) as u8);
        match (class, spectral_type, index < 1000) {
            (Some(class), Some(spectral_type), true) => {
                Ok(Self::new(spectral_type, (index % 10) as u8, class))
            }
            _ => Err(StellarError::InvalidIndex(index)),
        }
    }

    /// Hot-to-cool rank among main sequence types; lower is hotter
    pub fn temperature_rank(&self) -> Option<u32> {
        let ordinal = self.spectral_type.ordinal()? as u32;
        Some(ordinal * 10 + self.subtype.unwrap_or(0) as u32)
    }

    /// Check the type, subtype and class fit together
    pub fn validate(&self) -> Result<(), StellarError> {
        let invalid = |reason| {
            Err(StellarError::InvalidClassification {
                code: self.to_string(),
                reason,
            })
        };

        if self.is_exotic() {
            if self.class.is_some() || self.subtype.is_some() {
                return invalid("exotic types carry no class or subtype");
            }
            return Ok(());
        }

        let (Some(class), Some(subtype)) = (self.class, self.subtype) else {
            return invalid("type, subtype and class must all be set");
        };
        if subtype > 9 {
            return invalid("subtype must be 0 to 9");
        }
        if !class.allows(self.spectral_type) {
            return invalid(match class {
                LuminosityClass::IV => "class IV only exists for types B, A, F, G and K",
                _ => "class VI does not exist for types O, B and A",
            });
        }
        if class == LuminosityClass::VI && self.spectral_type == SpectralType::F && subtype < 5 {
            return invalid("class VI type F needs subtype 5 or later");
        }
        if class == LuminosityClass::IV && self.spectral_type == SpectralType::K && subtype > 4 {
            return invalid("class IV type K stops at subtype 4");
        }
        Ok(())
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spectral_type)?;
        if let Some(subtype) = self.subtype {
            write!(f, "{}", subtype)?;
        }
        if let Some(class) = self.class {
            write!(f, " {}", class)?;
        }
        Ok(())
    }
}

impl FromStr for Classification {
    type Err = StellarError;

    /// A missing class on a main sequence code reads as class V
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        let invalid = || StellarError::InvalidCode(s.to_string());

        let mut parts = code.split_whitespace();
        let head = parts.next().ok_or_else(invalid)?;
        let class = parts.next().map(str::parse::<LuminosityClass>).transpose()?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        let digits = head.find(|c: char| c.is_ascii_digit());
        let classification = match digits {
            None => {
                let spectral_type: SpectralType = head.parse()?;
                match (spectral_type.is_exotic(), class) {
                    (true, None) => Self::exotic(spectral_type),
                    _ => return Err(invalid()),
                }
            }
            Some(split) => {
                let spectral_type: SpectralType = head[..split].parse()?;
                let subtype: u8 = head[split..].parse().map_err(|_| invalid())?;
                if spectral_type.is_exotic() {
                    return Err(invalid());
                }
                Self::new(spectral_type, subtype, class.unwrap_or(LuminosityClass::V))
            }
        };
        classification.validate()?;
        Ok(classification)
    }
}

impl TryFrom<String> for Classification {
    type Error = StellarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Classification> for String {
    fn from(value: Classification) -> Self {
        value.to_string()
    }
}
