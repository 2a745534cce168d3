//! Generator configuration.

use serde::{Deserialize, Serialize};
use stellar::Classification;

use crate::error::GenerationError;

/// Options for one system generation run
///
/// Deserializes from TOML or JSON; missing fields take their defaults.
///
/// ```
/// use star_system::GeneratorConfig;
///
/// let config = GeneratorConfig::from_toml(r#"
///     allow_multiple_stars = false
///     known_primary = "K3 V"
/// "#).unwrap();
/// assert!(!config.allow_multiple_stars);
/// assert!(config.world_counts);
/// assert_eq!(config.known_primary.unwrap().to_string(), "K3 V");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Roll for secondaries and companions
    pub allow_multiple_stars: bool,

    /// Roll gas giant, belt and terrestrial counts once the stars are valid
    pub world_counts: bool,

    /// Skip the type, class and subtype rolls for the primary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub known_primary: Option<Classification>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            allow_multiple_stars: true,
            world_counts: true,
            known_primary: None,
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml(text: &str) -> Result<Self, GenerationError> {
        Ok(toml::from_str(text)?)
    }

    /// Single-star systems only
    pub fn single_star() -> Self {
        Self {
            allow_multiple_stars: false,
            ..Self::default()
        }
    }

    pub fn with_known_primary(mut self, classification: Classification) -> Self {
        self.known_primary = Some(classification);
        self
    }
}
