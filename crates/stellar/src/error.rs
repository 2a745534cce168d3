use dice::DiceError;
use gametable::TableError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StellarError {
    #[error("unknown spectral type '{0}'")]
    UnknownType(String),

    #[error("unknown luminosity class '{0}'")]
    UnknownClass(String),

    #[error("cannot read '{0}' as a stellar classification")]
    InvalidCode(String),

    #[error("invalid classification {code}: {reason}")]
    InvalidClassification { code: String, reason: &'static str },

    #[error("index {0} does not encode a star")]
    InvalidIndex(u32),

    #[error("no {quantity} tabulated around index {index}")]
    InterpolationFailed { quantity: &'static str, index: u32 },

    #[error("table '{table}' produced unexpected result '{result}'")]
    UnexpectedResult { table: String, result: String },

    #[error("type and class still unresolved after {0} rolls")]
    TypeUnresolved(u32),

    #[error("no positive age after {0} rolls")]
    AgeUnresolved(u32),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Dice(#[from] DiceError),
}
