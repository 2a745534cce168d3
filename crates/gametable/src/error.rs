use dice::DiceError;
use thiserror::Error;

use crate::format::Format;

/// A range key string that cannot be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid range key '{key}': {reason}")]
pub struct RangeKeyError {
    pub key: String,
    pub reason: &'static str,
}

/// Errors raised while building, loading or resolving tables
#[derive(Debug, Error)]
pub enum TableError {
    #[error("table '{0}' has no rows")]
    Empty(String),

    #[error("table '{table}': {source}")]
    InvalidKey {
        table: String,
        #[source]
        source: RangeKeyError,
    },

    #[error("table '{table}': rows '{first}' and '{second}' overlap")]
    Overlap {
        table: String,
        first: String,
        second: String,
    },

    #[error("no event found for roll {roll} on table '{table}'")]
    NoMatch { table: String, roll: i32 },

    #[error("'{code}' is not a digit code for table '{table}'")]
    InvalidCode { table: String, code: String },

    #[error("table '{0}' not found")]
    TableNotFound(String),

    #[error("duplicate table name '{0}'")]
    DuplicateTable(String),

    #[error("no roller configured for table collection")]
    RollerNotConfigured,

    #[error("cascade cycle detected: {}", .chain.join(" -> "))]
    Cycle { chain: Vec<String> },

    #[error("cascade exceeded maximum depth of {0}")]
    DepthExceeded(usize),

    #[error("unknown modifier '{name}' for table '{table}'")]
    UnknownModifier { table: String, name: String },

    #[error("table '{table}': {source}")]
    Dice {
        table: String,
        #[source]
        source: DiceError,
    },

    #[error("could not read table as JSON ({json}), TOML ({toml}) or YAML ({yaml})")]
    Unrecognized {
        json: String,
        toml: String,
        yaml: String,
    },

    #[error("failed to read table as {format}: {message}")]
    Parse { format: Format, message: String },

    #[error("failed to write table as {format}: {message}")]
    Serialize { format: Format, message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TableError {
    pub(crate) fn dice(table: &str, source: DiceError) -> Self {
        Self::Dice {
            table: table.to_string(),
            source,
        }
    }
}
