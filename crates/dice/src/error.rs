use thiserror::Error;

/// Errors raised while parsing or rolling a dice expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    /// The expression string is empty
    #[error("empty dice expression")]
    Empty,

    /// The expression does not start with an `NdM` base
    #[error("invalid dice expression '{expression}': {reason}")]
    InvalidFormat { expression: String, reason: String },

    /// Dice count must be at least 1
    #[error("dice count must be at least 1 in '{0}'")]
    InvalidDiceCount(String),

    /// Faces must be at least 1
    #[error("die faces must be at least 1 in '{0}'")]
    InvalidFaces(String),

    /// More dice than a single expression may roll
    #[error("'{expression}' rolls more than {limit} dice")]
    TooManyDice { expression: String, limit: u32 },

    /// A number or total does not fit a 32-bit integer
    #[error("arithmetic overflow in dice expression '{0}'")]
    Overflow(String),

    /// A directive that may appear only once was repeated
    #[error("duplicate {directive} directive in '{expression}'")]
    Duplicate {
        expression: String,
        directive: &'static str,
    },

    /// Drop-lowest plus drop-highest would discard every die
    #[error("cannot drop {dropped} of {dice} dice in '{expression}'")]
    DropTooLarge {
        expression: String,
        dice: u32,
        dropped: u32,
    },

    /// Integer division by zero
    #[error("division by zero in '{0}'")]
    DivideByZero(String),

    /// Characters left over after every known token was extracted
    #[error("unexpected '{leftover}' in dice expression '{expression}'")]
    Leftover { expression: String, leftover: String },

    /// Concatenation dice count does not match the number of digit positions
    #[error("'{expression}' names {dice} dice but {positions} digit positions")]
    PositionMismatch {
        expression: String,
        dice: u32,
        positions: usize,
    },

    /// Every face of a die is excluded by its reroll set
    #[error("impossible roll: '{expression}' produced only excluded values after {attempts} attempts")]
    ImpossibleRoll { expression: String, attempts: u32 },
}
