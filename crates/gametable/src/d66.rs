//! Tables indexed by a digit-concatenation roll (`d66`, `d666`).

use std::collections::BTreeMap;
use std::path::Path;

use dice::ConcatDirectives;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::TableError;
use crate::roller::DiceRoller;
use crate::table::{parse_rows, validate_rows, Row, TableSpec};

/// A table whose key is the concatenated dice read as a number
///
/// Keys use the same range syntax as [`crate::Table`], so `"11..16"` covers
/// every result whose first die is a one. Named modifiers shift the first
/// die, the usual way a DM applies to a d66 roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TableSpec", into = "TableSpec")]
pub struct D66Table {
    name: String,
    version: u32,
    dice_expression: ConcatDirectives,
    rows: Vec<Row>,
    mods: BTreeMap<String, i32>,
}

impl D66Table {
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
            ConcatDirectives::parse(dice_expression).map_err(|err| TableError::dice(&name, err))?;
        let rows = parse_rows(&name, rows)?;
        validate_rows(&name, &rows)?;

        Ok(Self {
            name,
            version: 0,
            dice_expression,
            rows,
            mods: BTreeMap::new(),
        })
    }

    pub fn with_modifier(mut self, name: impl Into<String>, value: i32) -> Self {
        self.mods.insert(name.into(), value);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn dice_expression(&self) -> &ConcatDirectives {
        &self.dice_expression
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn find_by_roll(&self, code: &str) -> Result<&str, TableError> {
        let value: i32 = code.parse().map_err(|_| TableError::InvalidCode {
            table: self.name.clone(),
            code: code.to_string(),
        })?;
        self.rows
            .iter()
            .find(|row| row.key.contains(value))
            .map(|row| row.result.as_str())
            .ok_or_else(|| TableError::NoMatch {
                table: self.name.clone(),
                roll: value,
            })
    }

    /// Roll the table, returning the rolled code and its result
    pub fn roll<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        mods: &[&str],
    ) -> Result<(String, &str), TableError> {
        let mut dm: i32 = 0;
        for name in mods {
            let value = self
                .mods
                .get(*name)
                .ok_or_else(|| TableError::UnknownModifier {
                    table: self.name.clone(),
                    name: name.to_string(),
                })?;
            dm = dm.saturating_add(*value);
        }

        let expression = self
            .dice_expression
            .clone()
            .with_position_modifier(0, dm)
            .to_string();
        let code = roller
            .concat_roll(&expression)
            .map_err(|err| TableError::dice(&self.name, err))?;
        trace!(table = %self.name, %expression, %code, "rolled d66 table");

        let result = self.find_by_roll(&code)?;
        Ok((code, result))
    }

    pub fn load(text: &str) -> Result<Self, TableError> {
        crate::format::load(text).map(|(table, _)| table)
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, TableError> {
        crate::format::load_file(path.as_ref()).map(|(table, _)| table)
    }
}

impl TryFrom<TableSpec> for D66Table {
    type Error = TableError;

    fn try_from(spec: TableSpec) -> Result<Self, Self::Error> {
        let expression = if spec.dice_expression.trim().is_empty() {
            "d66"
        } else {
            spec.dice_expression.as_str()
        };
        let mut table = D66Table::new(spec.name, expression, spec.rows)?;
        table.version = spec.version;
        table.mods = spec.mods;
        Ok(table)
    }
}

impl From<D66Table> for TableSpec {
    fn from(table: D66Table) -> Self {
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
