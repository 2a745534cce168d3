//! The dice tables that drive star and system generation.

use dice::Roller;
use gametable::{Cascade, DiceRoller, Table, TableCollection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StellarError;

const STANDARD_RULES: &str = include_str!("../data/rules.toml");

/// Names of the tables a rule set must provide
pub mod names {
    pub const STAR_TYPE: &str = "Star Type";
    pub const HOT: &str = "Hot";
    pub const SPECIAL: &str = "Special";
    pub const UNUSUAL: &str = "Unusual";
    pub const GIANTS: &str = "Giants";
    pub const PECULIAR: &str = "Peculiar";
    pub const NUMERIC_SUBTYPE: &str = "Numeric Subtype";
    pub const M_SUBTYPE: &str = "M Subtype";
    pub const STAR_PRESENCE: &str = "Star Presence";
    pub const SECONDARY_STAR: &str = "Secondary Star";
    pub const COMPANION_STAR: &str = "Companion Star";
    pub const OTHER: &str = "Other";
    pub const ECCENTRICITY: &str = "Eccentricity";
    pub const GAS_GIANT_PRESENCE: &str = "Gas Giant Presence";
    pub const GAS_GIANT_QUANTITY: &str = "Gas Giant Quantity";
    pub const BELT_PRESENCE: &str = "Belt Presence";
    pub const BELT_QUANTITY: &str = "Belt Quantity";

    pub const REQUIRED: [&str; 17] = [
        STAR_TYPE,
        HOT,
        SPECIAL,
        UNUSUAL,
        GIANTS,
        PECULIAR,
        NUMERIC_SUBTYPE,
        M_SUBTYPE,
        STAR_PRESENCE,
        SECONDARY_STAR,
        COMPANION_STAR,
        OTHER,
        ECCENTRICITY,
        GAS_GIANT_PRESENCE,
        GAS_GIANT_QUANTITY,
        BELT_PRESENCE,
        BELT_QUANTITY,
    ];
}

#[derive(Debug, Serialize, Deserialize)]
struct RuleFile {
    tables: Vec<Table>,
}

/// Read-only rule tables, shared by every generation run
///
/// The collection owns no dice; each run rolls it with its own roller.
#[derive(Debug, Clone)]
pub struct RuleTables {
    tables: TableCollection<Roller>,
}

impl RuleTables {
    /// The bundled rule set
    pub fn standard() -> Result<Self, StellarError> {
        Self::load(STANDARD_RULES)
    }

    /// Read a rule set from JSON, TOML or YAML holding a `tables` list
    pub fn load(text: &str) -> Result<Self, StellarError> {
        let (file, format) = gametable::format::load::<RuleFile>(text)?;
        debug!(%format, tables = file.tables.len(), "loaded rule tables");
        Self::from_tables(file.tables)
    }

    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Self, StellarError> {
        let tables = TableCollection::from_tables(tables)?;
        if let Some(missing) = names::REQUIRED.iter().find(|name| !tables.contains(name)) {
            return Err(gametable::TableError::TableNotFound(missing.to_string()).into());
        }
        Ok(Self { tables })
    }

    pub fn tables(&self) -> &TableCollection<Roller> {
        &self.tables
    }

    /// Resolve `name` to its final literal result
    pub fn roll<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        name: &str,
        mods: &[&str],
    ) -> Result<String, StellarError> {
        Ok(self.tables.roll_with(roller, name, mods)?)
    }

    /// Resolve `name` with a raw DM on its first roll, keeping the chain
    pub fn cascade<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        name: &str,
        mods: &[&str],
        dm: i32,
    ) -> Result<Cascade, StellarError> {
        Ok(self.tables.roll_cascade_with_dm(roller, name, mods, dm)?)
    }

    /// Resolve a table whose results are integers
    pub fn roll_number<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        name: &str,
        mods: &[&str],
        dm: i32,
    ) -> Result<i32, StellarError> {
        let result = self.cascade(roller, name, mods, dm)?.result;
        result
            .parse()
            .map_err(|_| StellarError::UnexpectedResult {
                table: name.to_string(),
                result,
            })
    }
}
