//! Digit-concatenation rolls such as `d66`.
//!
//! Each digit after the `d` is the face count of one die; the dice are read
//! left to right as the digits of the result (`d66` yields `"11"` to `"66"`).
//! A trailing `+N`/`-N` shifts every position, `m<a>;<b>` shifts each
//! position independently. Every digit is clamped to `0..=9`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::Rng;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

use crate::directives::{extract, number};
use crate::error::DiceError;

static BASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)d(\d+)").expect("base pattern"));
static POSITIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"m([+-]?\d+(?:;[+-]?\d+)*)").expect("position pattern"));
static UNIFORM: Lazy<Regex> = Lazy::new(|| Regex::new(r"([+-]\d+)").expect("uniform pattern"));

/// Parsed form of a concatenation roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConcatDirectives {
    faces: Vec<u32>,
    modifiers: Vec<i32>,
}

impl ConcatDirectives {
    pub fn parse(input: &str) -> Result<Self, DiceError> {
        let expression = input.trim().to_lowercase();
        if expression.is_empty() {
            return Err(DiceError::Empty);
        }

        let (consumed, count, digits) = BASE
            .captures(&expression)
            .map(|caps| (caps[0].len(), caps[1].to_string(), caps[2].to_string()))
            .ok_or_else(|| DiceError::InvalidFormat {
                expression: expression.clone(),
                reason: "expected a d<digits> base".to_string(),
            })?;

        let faces: Vec<u32> = digits.chars().filter_map(|c| c.to_digit(10)).collect();
        if faces.contains(&0) {
            return Err(DiceError::InvalidFaces(expression));
        }
        if !count.is_empty() {
            let dice = number::<u32>(&count, &expression)?;
            if dice as usize != faces.len() {
                return Err(DiceError::PositionMismatch {
                    expression,
                    dice,
                    positions: faces.len(),
                });
            }
        }

        let mut rest = expression[consumed..].to_string();
        let mut modifiers = vec![0; faces.len()];

        let positions = extract(&mut rest, &POSITIONS);
        if positions.len() > 1 {
            return Err(DiceError::Duplicate {
                expression,
                directive: "per-position",
            });
        }
        if let Some(token) = positions.first() {
            let values = token[0]
                .split(';')
                .map(|value| number::<i32>(value, &expression))
                .collect::<Result<Vec<_>, _>>()?;
            if values.len() != faces.len() {
                return Err(DiceError::PositionMismatch {
                    expression,
                    dice: values.len() as u32,
                    positions: faces.len(),
                });
            }
            for (modifier, value) in modifiers.iter_mut().zip(values) {
                *modifier += value;
            }
        }

        for token in extract(&mut rest, &UNIFORM) {
            let shift = number::<i32>(&token[0], &expression)?;
            for modifier in modifiers.iter_mut() {
                *modifier = modifier
                    .checked_add(shift)
                    .ok_or_else(|| DiceError::Overflow(expression.clone()))?;
            }
        }

        if !rest.is_empty() {
            return Err(DiceError::Leftover {
                expression,
                leftover: rest,
            });
        }

        Ok(Self { faces, modifiers })
    }

    pub fn faces(&self) -> &[u32] {
        &self.faces
    }

    pub fn modifiers(&self) -> &[i32] {
        &self.modifiers
    }

    /// The same roll with `dm` added to a single digit position
    ///
    /// Digits are clamped anyway, so an out-of-range DM saturates.
    pub fn with_position_modifier(mut self, position: usize, dm: i32) -> Self {
        if let Some(modifier) = self.modifiers.get_mut(position) {
            *modifier = modifier.saturating_add(dm);
        }
        self
    }

    /// Roll one die per position and concatenate the clamped digits
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let raw: Vec<i32> = self
            .faces
            .iter()
            .map(|faces| rng.random_range(1..=*faces as i32))
            .collect();
        self.evaluate(&raw)
    }

    /// Apply per-position modifiers and the digit clamp to already-rolled dice
    pub fn evaluate(&self, raw: &[i32]) -> String {
        raw.iter()
            .zip(&self.modifiers)
            .map(|(value, modifier)| {
                let digit = value.saturating_add(*modifier).clamp(0, 9) as u32;
                char::from_digit(digit, 10).unwrap_or('0')
            })
            .collect()
    }
}

impl fmt::Display for ConcatDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d", self.faces.len())?;
        for faces in &self.faces {
            write!(f, "{}", faces)?;
        }
        if self.modifiers.iter().any(|modifier| *modifier != 0) {
            let list: Vec<String> = self
                .modifiers
                .iter()
                .map(|modifier| modifier.to_string())
                .collect();
            write!(f, "m{}", list.join(";"))?;
        }
        Ok(())
    }
}

impl FromStr for ConcatDirectives {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConcatDirectives {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConcatDirectives> for String {
    fn from(value: ConcatDirectives) -> Self {
        value.to_string()
    }
}
