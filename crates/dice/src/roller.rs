//! Seeded dice roller.
//!
//! One `Roller` is threaded through a whole generation run. Constructing two
//! rollers from the same non-empty seed string reproduces the same sequence of
//! results for the same sequence of expressions.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use tracing::trace;

use crate::concat::ConcatDirectives;
use crate::directives::{RollDirectives, RollOutcome};
use crate::error::DiceError;

/// Most recent results, kept for inspection only
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LastRoll {
    /// Dice of the last sum-roll before any modifier
    pub dice: Vec<i32>,
    /// Total of the last sum-roll
    pub total: Option<i32>,
    /// Result of the last concatenation roll
    pub concat: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Roller {
    rng: ChaChaRng,
    last: LastRoll,
}

impl Roller {
    /// Create a roller from a seed string
    ///
    /// An empty seed draws entropy from the system clock and is not
    /// reproducible; any other seed is hashed with [`hash_seed`].
    pub fn new(seed: &str) -> Self {
        let seed = if seed.is_empty() {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|elapsed| elapsed.as_nanos() as u64)
                .unwrap_or_default()
        } else {
            hash_seed(seed)
        };
        Self::from_seed_u64(seed)
    }

    pub fn from_seed_u64(seed: u64) -> Self {
        Self {
            rng: ChaChaRng::seed_from_u64(seed),
            last: LastRoll::default(),
        }
    }

    /// Roll a sum expression such as `"2d6+3"`
    pub fn roll(&mut self, expression: &str) -> Result<i32, DiceError> {
        let directives = RollDirectives::parse(expression)?;
        Ok(self.roll_directives(&directives)?.total)
    }

    /// Roll an already parsed expression, keeping the dice for inspection
    pub fn roll_directives(
        &mut self,
        directives: &RollDirectives,
    ) -> Result<RollOutcome, DiceError> {
        let outcome = directives.roll(&mut self.rng)?;
        trace!(expression = %directives, dice = ?outcome.raw, total = outcome.total, "rolled");
        self.last.dice = outcome.raw.clone();
        self.last.total = Some(outcome.total);
        Ok(outcome)
    }

    /// Roll a concatenation expression such as `"d66"`
    pub fn concat_roll(&mut self, expression: &str) -> Result<String, DiceError> {
        let directives = ConcatDirectives::parse(expression)?;
        let digits = directives.roll(&mut self.rng);
        trace!(expression = %directives, result = %digits, "concat rolled");
        self.last.concat = Some(digits.clone());
        Ok(digits)
    }

    /// Roll a compile-time literal expression
    ///
    /// # Panics
    /// Panics if the literal is malformed or impossible to roll. Expressions
    /// read from files or other runtime input go through [`Roller::roll`].
    pub fn roll_literal(&mut self, expression: &'static str) -> i32 {
        match self.roll(expression) {
            Ok(total) => total,
            Err(err) => panic!("dice literal '{}' is invalid: {}", expression, err),
        }
    }

    /// Concatenation counterpart of [`Roller::roll_literal`]
    ///
    /// # Panics
    /// Panics if the literal is malformed.
    pub fn concat_roll_literal(&mut self, expression: &'static str) -> String {
        match self.concat_roll(expression) {
            Ok(digits) => digits,
            Err(err) => panic!("dice literal '{}' is invalid: {}", expression, err),
        }
    }

    pub fn last_roll(&self) -> &LastRoll {
        &self.last
    }
}

/// Deterministic 64-bit hash of a seed string
///
/// Bytes at even and odd positions feed two separate polynomial
/// accumulators, which are combined with XOR.
pub fn hash_seed(seed: &str) -> u64 {
    let mut even: u64 = 0xcbf2_9ce4_8422_2325;
    let mut odd: u64 = 0x0000_0100_0000_01b3;
    for (position, byte) in seed.bytes().enumerate() {
        if position % 2 == 0 {
            even = even.wrapping_mul(31).wrapping_add(u64::from(byte));
        } else {
            odd = odd.wrapping_mul(131).wrapping_add(u64::from(byte));
        }
    }
    even ^ odd.rotate_left(29)
}
