//! The dice capability tables are rolled against.

use dice::{DiceError, Roller};

/// Anything that can roll sum and concatenation expressions
///
/// Tables only ever talk to this trait, so a scripted or alternative dice
/// engine can stand in for [`dice::Roller`].
pub trait DiceRoller {
    /// Roll a sum expression such as `"2d6+1"`
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError>;

    /// Roll a digit-concatenation expression such as `"d66"`
    fn concat_roll(&mut self, expression: &str) -> Result<String, DiceError>;
}

impl DiceRoller for Roller {
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        Roller::roll(self, expression)
    }

    fn concat_roll(&mut self, expression: &str) -> Result<String, DiceError> {
        Roller::concat_roll(self, expression)
    }
}

impl<R: DiceRoller + ?Sized> DiceRoller for &mut R {
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        (**self).roll(expression)
    }

    fn concat_roll(&mut self, expression: &str) -> Result<String, DiceError> {
        (**self).concat_roll(expression)
    }
}
