//! System identification: a UUID derived from the seed, a catalog name and
//! an optional proper name.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How many stars the system holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Multiplicity {
    Solitary,
    Binary,
    Trinary,
    Multiple,
}

impl Multiplicity {
    pub fn from_star_count(count: usize) -> Self {
        match count {
            0 | 1 => Multiplicity::Solitary,
            2 => Multiplicity::Binary,
            3 => Multiplicity::Trinary,
            _ => Multiplicity::Multiple,
        }
    }
}

impl fmt::Display for Multiplicity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let str = match self {
            Multiplicity::Solitary => "solitary",
            Multiplicity::Binary => "binary",
            Multiplicity::Trinary => "trinary",
            Multiplicity::Multiple => "multiple",
        };
        write!(f, "{}", str)
    }
}

/// Metadata about a generated system
///
/// Every system carries:
/// - A unique identifier (UUID), derived from the seed string when there is one
/// - The seed string itself, so the system can be rolled again
/// - Its multiplicity
/// - An optional proper name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetadata {
    pub id: Uuid,

    /// Seed the roller was built from; empty for time-seeded runs
    pub seed: String,

    pub multiplicity: Multiplicity,

    /// Optional proper name (e.g., "Regina", "Terra")
    ///
    /// Most systems use only the generated `catalog_name()` (e.g., "KV-4729").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl SystemMetadata {
    /// Metadata with a deterministic UUID derived from a seed string
    ///
    /// The same seed always produces the same UUID and catalog name. An
    /// empty seed gets a random UUID.
    ///
    /// # Example
    /// ```
    /// use star_system::SystemMetadata;
    ///
    /// let first = SystemMetadata::from_seed("regina");
    /// let second = SystemMetadata::from_seed("regina");
    /// assert_eq!(first.id, second.id);
    /// assert_eq!(first.catalog_name(), second.catalog_name());
    /// ```
    pub fn from_seed(seed: &str) -> Self {
        if seed.is_empty() {
            return Self::new_random();
        }
        Self {
            id: Uuid::new_v5(&Uuid::NAMESPACE_OID, seed.as_bytes()),
            seed: seed.to_string(),
            multiplicity: Multiplicity::Solitary,
            name: None,
        }
    }

    /// Metadata with a random UUID and no seed
    pub fn new_random() -> Self {
        Self {
            id: Uuid::new_v4(),
            seed: String::new(),
            multiplicity: Multiplicity::Solitary,
            name: None,
        }
    }

    /// Short catalog designation derived from the UUID
    ///
    /// Format: two uppercase letters and four digits (e.g., "KV-4729").
    ///
    /// # Example
    /// ```
    /// use star_system::SystemMetadata;
    ///
    /// let name = SystemMetadata::from_seed("spinward").catalog_name();
    /// assert_eq!(name.len(), 7);
    /// assert!(name.contains('-'));
    /// ```
    pub fn catalog_name(&self) -> String {
        let bytes = self.id.as_bytes();
        let letter = |byte: u8| char::from(byte % 26 + b'A');
        let number = u16::from_le_bytes([bytes[2], bytes[3]]) % 10000;
        format!("{}{}-{number:04}", letter(bytes[0]), letter(bytes[1]))
    }

    /// Proper name if set, otherwise the catalog name
    pub fn display_name(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.catalog_name())
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_multiplicity(mut self, multiplicity: Multiplicity) -> Self {
        self.multiplicity = multiplicity;
        self
    }
}
