//! Rule tables for dice-driven generation.
//!
//! A [`Table`] maps range keys (`"8-"`, `"9..10"`, `"12+"`, `"7"`) to result
//! strings and carries its own dice expression. A [`TableCollection`] links
//! tables together: when a row's result names another table in the same
//! collection, resolving the first table continues into the second.
//!
//! # Example
//! ```
//! use dice::Roller;
//! use gametable::{Table, TableCollection};
//!
//! let mut tables = TableCollection::with_roller(Roller::new("docs"));
//! tables
//!     .add(Table::new("Weather", "1d6", [("1..4", "Clear"), ("5+", "Storm")]).unwrap())
//!     .unwrap();
//! tables
//!     .add(Table::new("Storm", "1d2", [("1", "Rain"), ("2", "Hail")]).unwrap())
//!     .unwrap();
//!
//! let result = tables.roll("Weather", &[]).unwrap();
//! assert!(["Clear", "Rain", "Hail"].contains(&result.as_str()));
//! ```

pub mod collection;
pub mod d66;
pub mod error;
pub mod format;
pub mod range_key;
pub mod roller;
pub mod table;

#[cfg(test)]
mod d66_test;
#[cfg(test)]
pub(crate) mod testing;

pub use collection::{Cascade, CascadeStep, Outcome, TableCollection, TableId, MAX_CASCADE_DEPTH};
pub use d66::D66Table;
pub use error::{RangeKeyError, TableError};
pub use format::Format;
pub use range_key::{RangeKey, LOWER_BOUND, UPPER_BOUND};
pub use roller::DiceRoller;
pub use table::{Row, Table, TableSpec};
