//! A single range-keyed table.

use std::collections::BTreeMap;
use std::path::Path;

use dice::RollDirectives;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TableError;
use crate::format::{self, Format};
use crate::range_key::RangeKey;
use crate::roller::DiceRoller;

/// One row of a table: the rolls it matches and what it yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub key: RangeKey,
    pub result: String,
}

/// A named mapping from roll ranges to results
///
/// Rows never overlap and every table has at least one row. Named modifiers
/// are integer DMs a caller can switch on by name when rolling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableSpec", into = "TableSpec")]
pub struct Table {
    name: String,
    version: u32,
    dice_expression: RollDirectives,
    rows: Vec<Row>,
    mods: BTreeMap<String, i32>,
}

/// Serialized shape of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub version: u32,
    pub dice_expression: String,
    pub rows: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub mods: BTreeMap<String, i32>,
}

impl Table {
    pub fn new<K, V>(
        name: impl Into<String>,
        dice_expression: &str,
        rows: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, TableError>
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let name = name.into();
        let dice_expression =
            RollDirectives::parse(dice_expression).map_err(|err| TableError::dice(&name, err))?;
        let rows = parse_rows(&name, rows)?;

        let table = Self {
            name,
            version: 0,
            dice_expression,
            rows,
            mods: BTreeMap::new(),
        };
        table.validate()?;
        Ok(table)
    }

    pub fn with_modifier(mut self, name: impl Into<String>, value: i32) -> Self {
        self.mods.insert(name.into(), value);
        self
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Check the table is non-empty and no two rows share a roll
    pub fn validate(&self) -> Result<(), TableError> {
        validate_rows(&self.name, &self.rows)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn dice_expression(&self) -> &RollDirectives {
        &self.dice_expression
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn mods(&self) -> &BTreeMap<String, i32> {
        &self.mods
    }

    /// Lowest and highest roll any row accepts
    pub fn bounds(&self) -> (i32, i32) {
        let low = self.rows.iter().map(|row| row.key.low()).min().unwrap_or(0);
        let high = self.rows.iter().map(|row| row.key.high()).max().unwrap_or(0);
        (low, high)
    }

    pub(crate) fn row_index(&self, roll: i32) -> Option<usize> {
        self.rows.iter().position(|row| row.key.contains(roll))
    }

    /// Result of the row whose range contains `roll`
    pub fn find_by_roll(&self, roll: i32) -> Result<&str, TableError> {
        self.row_index(roll)
            .map(|index| self.rows[index].result.as_str())
            .ok_or_else(|| TableError::NoMatch {
                table: self.name.clone(),
                roll,
            })
    }

    /// Sum of the named modifiers this table defines; unknown names are skipped
    ///
    /// The sum saturates; a DM too large to roll is rejected when it is folded
    /// into the dice expression.
    pub fn modifier_total(&self, names: &[&str]) -> i32 {
        names
            .iter()
            .filter_map(|name| self.mods.get(*name))
            .fold(0, |total, value| total.saturating_add(*value))
    }

    /// Roll the table with named modifiers switched on
    ///
    /// Every name must be defined by this table.
    pub fn roll<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        mods: &[&str],
    ) -> Result<(i32, &str), TableError> {
        if let Some(unknown) = mods.iter().find(|name| !self.mods.contains_key(**name)) {
            return Err(TableError::UnknownModifier {
                table: self.name.clone(),
                name: unknown.to_string(),
            });
        }
        self.roll_with_dm(roller, self.modifier_total(mods))
    }

    /// Roll the table with a raw DM folded into the dice expression
    pub fn roll_with_dm<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        dm: i32,
    ) -> Result<(i32, &str), TableError> {
        let (roll, index) = self.roll_row(roller, dm)?;
        Ok((roll, self.rows[index].result.as_str()))
    }

    pub(crate) fn roll_row<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        dm: i32,
    ) -> Result<(i32, usize), TableError> {
        let expression = self
            .dice_expression
            .clone()
            .with_additive(dm)
            .map_err(|err| TableError::dice(&self.name, err))?
            .to_string();
        let roll = roller
            .roll(&expression)
            .map_err(|err| TableError::dice(&self.name, err))?;
        trace!(table = %self.name, %expression, roll, "rolled table");

        let index = self.row_index(roll).ok_or_else(|| TableError::NoMatch {
            table: self.name.clone(),
            roll,
        })?;
        Ok((roll, index))
    }

    /// Read a table from JSON, TOML or YAML text
    pub fn load(text: &str) -> Result<Self, TableError> {
        format::load(text).map(|(table, _)| table)
    }

    /// Read a table file; a `.json`, `.toml`, `.yaml` or `.yml` extension
    /// picks the format, anything else is detected from the text
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        format::load_file(path.as_ref()).map(|(table, _)| table)
    }

    pub fn serialize(&self, format: Format) -> Result<String, TableError> {
        format::serialize(self, format)
    }
}

pub(crate) fn parse_rows<K, V>(
    table: &str,
    rows: impl IntoIterator<Item = (K, V)>,
) -> Result<Vec<Row>, TableError>
where
    K: AsRef<str>,
    V: Into<String>,
{
    let mut parsed = rows
        .into_iter()
        .map(|(key, result)| {
            let key = RangeKey::parse(key.as_ref()).map_err(|source| TableError::InvalidKey {
                table: table.to_string(),
                source,
            })?;
            Ok(Row {
                key,
                result: result.into(),
            })
        })
        .collect::<Result<Vec<_>, TableError>>()?;
    parsed.sort_by_key(|row| row.key);
    Ok(parsed)
}

pub(crate) fn validate_rows(table: &str, rows: &[Row]) -> Result<(), TableError> {
    if rows.is_empty() {
        return Err(TableError::Empty(table.to_string()));
    }
    for (i, first) in rows.iter().enumerate() {
        for second in &rows[i + 1..] {
            if first.key.overlaps(&second.key) {
                return Err(TableError::Overlap {
                    table: table.to_string(),
                    first: first.key.to_string(),
                    second: second.key.to_string(),
                });
            }
        }
    }
    Ok(())
}

impl TryFrom<TableSpec> for Table {
    type Error = TableError;

    fn try_from(spec: TableSpec) -> Result<Self, Self::Error> {
        let mut table = Table::new(spec.name, &spec.dice_expression, spec.rows)?;
        table.version = spec.version;
        table.mods = spec.mods;
        Ok(table)
    }
}

impl From<Table> for TableSpec {
    fn from(table: Table) -> Self {
        TableSpec {
            name: table.name,
            version: table.version,
            dice_expression: table.dice_expression.to_string(),
            rows: table
                .rows
                .into_iter()
                .map(|row| (row.key.to_string(), row.result))
                .collect(),
            mods: table.mods,
        }
    }
}
