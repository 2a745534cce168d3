use std::collections::VecDeque;

use dice::{ConcatDirectives, DiceError, RollDirectives};

use crate::roller::DiceRoller;

/// Dice that return a scripted sequence of raw rolls
///
/// Each scripted value stands for the unmodified dice total; the
/// expression's additive DM is applied on top, so tests can check how
/// modifiers move a roll. Expressions seen are recorded.
#[derive(Debug, Default)]
pub struct ScriptedRoller {
    rolls: VecDeque<i32>,
    pub expressions: Vec<String>,
}

impl ScriptedRoller {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            expressions: Vec::new(),
        }
    }

    fn next(&mut self) -> i32 {
        self.rolls.pop_front().expect("scripted rolls exhausted")
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        let directives = RollDirectives::parse(expression)?;
        self.expressions.push(expression.to_string());
        Ok(self.next() + directives.additive())
    }

    fn concat_roll(&mut self, expression: &str) -> Result<String, DiceError> {
        let directives = ConcatDirectives::parse(expression)?;
        self.expressions.push(expression.to_string());
        let raw: Vec<i32> = self
            .next()
            .to_string()
            .chars()
            .filter_map(|c| c.to_digit(10))
            .map(|digit| digit as i32)
            .collect();
        Ok(directives.evaluate(&raw))
    }
}
