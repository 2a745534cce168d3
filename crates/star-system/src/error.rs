use dice::DiceError;
use gametable::TableError;
use stellar::StellarError;
use thiserror::Error;

use crate::designation::Designation;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("'{0}' is not a star designation")]
    InvalidDesignation(String),

    #[error("{designation}: orbit number {orbit_number} is outside 0.02..=20")]
    OrbitOutOfRange {
        designation: Designation,
        orbit_number: f64,
    },

    #[error("{designation}: negative eccentricity {eccentricity}")]
    NegativeEccentricity {
        designation: Designation,
        eccentricity: f64,
    },

    #[error("{0}: star has no mass")]
    ZeroMass(Designation),

    #[error("{0}: orbital period is zero")]
    ZeroPeriod(Designation),

    #[error("{designation}: orbit swings into the zone kept clear by {other}")]
    OrbitConflict {
        designation: Designation,
        other: Designation,
    },

    #[error("{0}: orbital parent is missing")]
    MissingParent(Designation),

    #[error("{0}: star was never completed")]
    Incomplete(Designation),

    #[error("table '{table}' produced unexpected result '{result}'")]
    UnexpectedResult { table: String, result: String },

    #[error("system is not finished, builder is at {0}")]
    NotFinished(String),

    #[error("invalid generator config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Stellar(#[from] StellarError),

    #[error(transparent)]
    Table(#[from] TableError),

    #[error(transparent)]
    Dice(#[from] DiceError),
}
