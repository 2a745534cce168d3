use std::collections::VecDeque;

use dice::{DiceError, RollDirectives};
use gametable::DiceRoller;

/// Dice that return a scripted sequence of raw totals, plus whatever
/// additive DM the expression carries
#[derive(Debug, Default)]
pub struct Scripted {
    rolls: VecDeque<i32>,
    pub expressions: Vec<String>,
}

impl Scripted {
    pub fn new(rolls: impl IntoIterator<Item = i32>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            expressions: Vec::new(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.rolls.len()
    }
}

impl DiceRoller for Scripted {
    fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        let directives = RollDirectives::parse(expression)?;
        self.expressions.push(expression.to_string());
        Ok(self.rolls.pop_front().expect("script exhausted") + directives.additive())
    }

    fn concat_roll(&mut self, _expression: &str) -> Result<String, DiceError> {
        unimplemented!("no concatenation rolls in system generation")
    }
}
