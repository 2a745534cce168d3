//! Named tables that can hand a roll on to one another.

use std::collections::{HashMap, HashSet};

use dice::Roller;
use tracing::{debug, trace};

use crate::error::TableError;
use crate::roller::DiceRoller;
use crate::table::Table;

/// Longest chain of tables a single resolution may pass through
pub const MAX_CASCADE_DEPTH: usize = 100;

/// Index of a table inside its collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TableId(usize);

impl TableId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// What a row resolves to once the collection is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Literal(String),
    Table(TableId),
}

/// One table visited while resolving a cascade
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CascadeStep {
    pub table: String,
    pub roll: i32,
}

/// Every roll made on the way to a literal result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cascade {
    pub steps: Vec<CascadeStep>,
    pub result: String,
}

impl Cascade {
    /// Names of the tables visited, in order
    pub fn path(&self) -> Vec<&str> {
        self.steps.iter().map(|step| step.table.as_str()).collect()
    }
}

#[derive(Debug, Clone, Default)]
struct Registry {
    tables: Vec<Table>,
    index: HashMap<String, TableId>,
    links: Vec<Vec<Outcome>>,
}

impl Registry {
    fn relink(&mut self) {
        let links = self
            .tables
            .iter()
            .map(|table| {
                table
                    .rows()
                    .iter()
                    .map(|row| match self.index.get(&row.result) {
                        Some(id) => Outcome::Table(*id),
                        None => Outcome::Literal(row.result.clone()),
                    })
                    .collect()
            })
            .collect();
        self.links = links;
    }

    fn id(&self, name: &str) -> Result<TableId, TableError> {
        self.index
            .get(name)
            .copied()
            .ok_or_else(|| TableError::TableNotFound(name.to_string()))
    }

    fn cascade<R: DiceRoller + ?Sized>(
        &self,
        roller: &mut R,
        name: &str,
        mods: &[&str],
        dm: i32,
    ) -> Result<Cascade, TableError> {
        let mut current = self.id(name)?;
        let mut visited = HashSet::new();
        let mut steps: Vec<CascadeStep> = Vec::new();
        let mut dm = dm;

        loop {
            if steps.len() >= MAX_CASCADE_DEPTH {
                return Err(TableError::DepthExceeded(MAX_CASCADE_DEPTH));
            }
            let table = &self.tables[current.0];
            if !visited.insert(current) {
                let mut chain: Vec<String> = steps.iter().map(|step| step.table.clone()).collect();
                chain.push(table.name().to_string());
                return Err(TableError::Cycle { chain });
            }

            let (roll, row) = table.roll_row(roller, dm.saturating_add(table.modifier_total(mods)))?;
            trace!(table = table.name(), roll, "cascade step");
            steps.push(CascadeStep {
                table: table.name().to_string(),
                roll,
            });
            dm = 0;

            match &self.links[current.0][row] {
                Outcome::Table(next) => current = *next,
                Outcome::Literal(result) => {
                    self.check_modifiers(&visited, mods)?;
                    debug!(
                        start = name,
                        depth = steps.len(),
                        result = result.as_str(),
                        "cascade resolved"
                    );
                    return Ok(Cascade {
                        steps,
                        result: result.clone(),
                    });
                }
            }
        }
    }

    fn check_modifiers(&self, visited: &HashSet<TableId>, mods: &[&str]) -> Result<(), TableError> {
        for name in mods {
            let known = visited
                .iter()
                .any(|id| self.tables[id.0].mods().contains_key(*name));
            if !known {
                let mut tables: Vec<&str> = visited
                    .iter()
                    .map(|id| self.tables[id.0].name())
                    .collect();
                tables.sort_unstable();
                return Err(TableError::UnknownModifier {
                    table: tables.join(", "),
                    name: name.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// A set of uniquely named tables with optional owned dice
///
/// Whenever a row's result equals the name of another table in the
/// collection, resolving that row continues into the named table. Links
/// are rebuilt every time a table is added, so tables may be added in any
/// order. Named modifiers passed to a roll apply to every table in the
/// chain that defines them.
#[derive(Debug, Clone)]
pub struct TableCollection<R = Roller> {
    registry: Registry,
    roller: Option<R>,
}

impl<R> Default for TableCollection<R> {
    fn default() -> Self {
        Self {
            registry: Registry::default(),
            roller: None,
        }
    }
}

impl<R> TableCollection<R> {
    /// Collection without dice; use the `*_with` methods to roll
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_roller(roller: R) -> Self {
        Self {
            registry: Registry::default(),
            roller: Some(roller),
        }
    }

    pub fn from_tables(tables: impl IntoIterator<Item = Table>) -> Result<Self, TableError> {
        let mut collection = Self::new();
        for table in tables {
            collection.add(table)?;
        }
        Ok(collection)
    }

    pub fn set_roller(&mut self, roller: R) {
        self.roller = Some(roller);
    }

    pub fn take_roller(&mut self) -> Option<R> {
        self.roller.take()
    }

    pub fn roller_mut(&mut self) -> Option<&mut R> {
        self.roller.as_mut()
    }

    pub fn add(&mut self, table: Table) -> Result<TableId, TableError> {
        if self.registry.index.contains_key(table.name()) {
            return Err(TableError::DuplicateTable(table.name().to_string()));
        }
        let id = TableId(self.registry.tables.len());
        self.registry.index.insert(table.name().to_string(), id);
        self.registry.tables.push(table);
        self.registry.relink();
        Ok(id)
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.registry
            .index
            .get(name)
            .map(|id| &self.registry.tables[id.0])
    }

    pub fn id(&self, name: &str) -> Option<TableId> {
        self.registry.index.get(name).copied()
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.registry.tables.get(id.0)
    }

    /// Resolved outcomes of a table's rows, in row order
    pub fn outcomes(&self, id: TableId) -> Option<&[Outcome]> {
        self.registry.links.get(id.0).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.index.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.tables.iter().map(Table::name)
    }

    pub fn len(&self) -> usize {
        self.registry.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.tables.is_empty()
    }

    /// Resolve `name` with caller-supplied dice
    pub fn roll_with<D: DiceRoller + ?Sized>(
        &self,
        roller: &mut D,
        name: &str,
        mods: &[&str],
    ) -> Result<String, TableError> {
        self.roll_cascade_with(roller, name, mods)
            .map(|cascade| cascade.result)
    }

    pub fn roll_cascade_with<D: DiceRoller + ?Sized>(
        &self,
        roller: &mut D,
        name: &str,
        mods: &[&str],
    ) -> Result<Cascade, TableError> {
        self.registry.cascade(roller, name, mods, 0)
    }

    /// As [`Self::roll_cascade_with`], with an extra DM on the first table only
    pub fn roll_cascade_with_dm<D: DiceRoller + ?Sized>(
        &self,
        roller: &mut D,
        name: &str,
        mods: &[&str],
        dm: i32,
    ) -> Result<Cascade, TableError> {
        self.registry.cascade(roller, name, mods, dm)
    }
}

impl<R: DiceRoller> TableCollection<R> {
    /// Resolve `name` with the collection's own dice
    pub fn roll(&mut self, name: &str, mods: &[&str]) -> Result<String, TableError> {
        self.roll_cascade(name, mods).map(|cascade| cascade.result)
    }

    pub fn roll_cascade(&mut self, name: &str, mods: &[&str]) -> Result<Cascade, TableError> {
        let roller = self
            .roller
            .as_mut()
            .ok_or(TableError::RollerNotConfigured)?;
        self.registry.cascade(roller, name, mods, 0)
    }
}
