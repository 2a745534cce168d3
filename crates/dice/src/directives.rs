//! Sum-roll expressions such as `"3d6+2dl1i-1min5max18rr1;2"`.
//!
//! Tokens are pulled out of the expression greedily in a fixed priority
//! order, so shapes that share a prefix never shadow each other:
//!
//! 1. `NdM` base (mandatory, `d6` is shorthand for `1d6`)
//! 2. `rrA;B` reroll any die showing A or B
//! 3. `rA;B:C` replace a die showing A or B with C
//! 4. `dlN` drop the N lowest dice
//! 5. `dhN` drop the N highest dice
//! 6. `iN` add N to every die (summed if repeated)
//! 7. `minN` clamp the total from below
//! 8. `maxN` clamp the total from above
//! 9. `xN` multiply the total (product if repeated)
//! 10. `/N` integer-divide the total (product of divisors)
//! 11. `+N` / `-N` add to the total (summed)

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use rand::Rng;
use regex_lite::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::error::DiceError;

/// Upper bound on rerolls of a single die before the roll is declared impossible
pub const MAX_REROLL_ATTEMPTS: u32 = 1000;

/// Most dice a single expression may roll
pub const MAX_DICE: u32 = 10_000;

/// Most faces a die may have; every face must fit an `i32`
pub const MAX_FACES: u32 = i32::MAX as u32;

static BASE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d*)d(\d+)").expect("base pattern"));
static REROLL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"rr(\d+(?:;\d+)*)").expect("reroll pattern"));
static REPLACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"r(\d+(?:;\d+)*):(-?\d+)").expect("replace pattern"));
static DROP_LOW: Lazy<Regex> = Lazy::new(|| Regex::new(r"dl(\d+)").expect("drop-low pattern"));
static DROP_HIGH: Lazy<Regex> = Lazy::new(|| Regex::new(r"dh(\d+)").expect("drop-high pattern"));
static PER_DIE: Lazy<Regex> = Lazy::new(|| Regex::new(r"i([+-]?\d+)").expect("per-die pattern"));
static MINIMUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"min(-?\d+)").expect("min pattern"));
static MAXIMUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"max(-?\d+)").expect("max pattern"));
static MULTIPLY: Lazy<Regex> = Lazy::new(|| Regex::new(r"x(\d+)").expect("multiply pattern"));
static DIVIDE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/(\d+)").expect("divide pattern"));
static ADDITIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([+-]\d+)").expect("additive pattern"));

/// Immutable, parsed form of a sum-roll expression
///
/// Constructed through [`RollDirectives::parse`] (or `str::parse`), which
/// guarantees `0 < dice <= MAX_DICE`, `0 < faces <= MAX_FACES` and
/// `drop_lowest + drop_highest < dice`.
/// `Display` writes the canonical form, which parses back to an equal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RollDirectives {
    dice: u32,
    faces: u32,
    additive: i32,
    multiplier: i32,
    divisor: i32,
    minimum: Option<i32>,
    maximum: Option<i32>,
    per_die: i32,
    drop_lowest: u32,
    drop_highest: u32,
    replacements: BTreeMap<i32, i32>,
    rerolls: BTreeSet<i32>,
}

/// The dice behind a single sum-roll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RollOutcome {
    /// Dice as rolled, after reroll exclusion but before any modifier
    pub raw: Vec<i32>,
    /// Dice that survived drop-lowest/drop-highest, ascending
    pub kept: Vec<i32>,
    /// Final total after every sum-level modifier and clamp
    pub total: i32,
}

impl RollDirectives {
    /// Plain `NdM` with no modifiers
    pub fn new(dice: u32, faces: u32) -> Result<Self, DiceError> {
        check_base(dice, faces, format!("{}d{}", dice, faces))?;
        Ok(Self::base(dice, faces))
    }

    fn base(dice: u32, faces: u32) -> Self {
        Self {
            dice,
            faces,
            additive: 0,
            multiplier: 1,
            divisor: 1,
            minimum: None,
            maximum: None,
            per_die: 0,
            drop_lowest: 0,
            drop_highest: 0,
            replacements: BTreeMap::new(),
            rerolls: BTreeSet::new(),
        }
    }

    /// Parse a dice expression; input is trimmed and case-insensitive
    pub fn parse(input: &str) -> Result<Self, DiceError> {
        let expression = input.trim().to_lowercase();
        if expression.is_empty() {
            return Err(DiceError::Empty);
        }

        let (consumed, count, faces) = BASE
            .captures(&expression)
            .map(|caps| (caps[0].len(), caps[1].to_string(), caps[2].to_string()))
            .ok_or_else(|| DiceError::InvalidFormat {
                expression: expression.clone(),
                reason: "expected an NdM base".to_string(),
            })?;
        let dice = match count.as_str() {
            "" => 1,
            count => number::<u32>(count, &expression)?,
        };
        let faces = number::<u32>(&faces, &expression)?;
        let expression = check_base(dice, faces, expression)?;
        let mut rest = expression[consumed..].to_string();
        let mut directives = Self::base(dice, faces);

        let rerolls = extract(&mut rest, &REROLL);
        if rerolls.len() > 1 {
            return Err(duplicate(&expression, "reroll"));
        }
        for token in &rerolls {
            for value in token[0].split(';') {
                directives.rerolls.insert(number(value, &expression)?);
            }
        }

        for token in extract(&mut rest, &REPLACE) {
            let to = number(&token[1], &expression)?;
            for value in token[0].split(';') {
                let from = number(value, &expression)?;
                if directives.replacements.insert(from, to).is_some() {
                    return Err(duplicate(&expression, "replace"));
                }
            }
        }

        directives.drop_lowest = single(&mut rest, &DROP_LOW, &expression, "drop-lowest")?
            .unwrap_or(0);
        directives.drop_highest = single(&mut rest, &DROP_HIGH, &expression, "drop-highest")?
            .unwrap_or(0);

        for token in extract(&mut rest, &PER_DIE) {
            let value = number::<i32>(&token[0], &expression)?;
            directives.per_die = directives
                .per_die
                .checked_add(value)
                .ok_or_else(|| DiceError::Overflow(expression.clone()))?;
        }

        directives.minimum = single(&mut rest, &MINIMUM, &expression, "min")?;
        directives.maximum = single(&mut rest, &MAXIMUM, &expression, "max")?;

        for token in extract(&mut rest, &MULTIPLY) {
            let factor = number::<i32>(&token[0], &expression)?;
            directives.multiplier = directives
                .multiplier
                .checked_mul(factor)
                .ok_or_else(|| DiceError::Overflow(expression.clone()))?;
        }
        for token in extract(&mut rest, &DIVIDE) {
            let divisor = number::<i32>(&token[0], &expression)?;
            if divisor == 0 {
                return Err(DiceError::DivideByZero(expression));
            }
            directives.divisor = directives
                .divisor
                .checked_mul(divisor)
                .ok_or_else(|| DiceError::Overflow(expression.clone()))?;
        }
        for token in extract(&mut rest, &ADDITIVE) {
            let value = number::<i32>(&token[0], &expression)?;
            directives.additive = directives
                .additive
                .checked_add(value)
                .ok_or_else(|| DiceError::Overflow(expression.clone()))?;
        }

        if !rest.is_empty() {
            return Err(DiceError::Leftover {
                expression,
                leftover: rest,
            });
        }

        let dropped = directives.drop_lowest + directives.drop_highest;
        if dropped >= directives.dice {
            return Err(DiceError::DropTooLarge {
                expression,
                dice: directives.dice,
                dropped,
            });
        }

        Ok(directives)
    }

    /// The same roll with `dm` added to the total
    pub fn with_additive(mut self, dm: i32) -> Result<Self, DiceError> {
        self.additive = self
            .additive
            .checked_add(dm)
            .ok_or_else(|| self.overflow())?;
        Ok(self)
    }

    pub fn dice(&self) -> u32 {
        self.dice
    }

    pub fn faces(&self) -> u32 {
        self.faces
    }

    pub fn additive(&self) -> i32 {
        self.additive
    }

    pub fn multiplier(&self) -> i32 {
        self.multiplier
    }

    pub fn divisor(&self) -> i32 {
        self.divisor
    }

    pub fn minimum(&self) -> Option<i32> {
        self.minimum
    }

    pub fn maximum(&self) -> Option<i32> {
        self.maximum
    }

    pub fn per_die(&self) -> i32 {
        self.per_die
    }

    pub fn drop_lowest(&self) -> u32 {
        self.drop_lowest
    }

    pub fn drop_highest(&self) -> u32 {
        self.drop_highest
    }

    pub fn replacements(&self) -> &BTreeMap<i32, i32> {
        &self.replacements
    }

    pub fn rerolls(&self) -> &BTreeSet<i32> {
        &self.rerolls
    }

    /// Roll the raw dice, rerolling any excluded face
    ///
    /// Fails with [`DiceError::ImpossibleRoll`] when a die keeps landing on
    /// excluded faces for [`MAX_REROLL_ATTEMPTS`] tries.
    pub fn roll_dice<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<i32>, DiceError> {
        (0..self.dice).map(|_| self.roll_die(rng)).collect()
    }

    fn roll_die<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<i32, DiceError> {
        let faces = self.top_face();
        for _ in 0..MAX_REROLL_ATTEMPTS {
            let value = rng.random_range(1..=faces);
            if !self.rerolls.contains(&value) {
                return Ok(value);
            }
        }
        Err(DiceError::ImpossibleRoll {
            expression: self.to_string(),
            attempts: MAX_REROLL_ATTEMPTS,
        })
    }

    /// Roll and evaluate in one step
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<RollOutcome, DiceError> {
        let raw = self.roll_dice(rng)?;
        self.evaluate(&raw)
    }

    /// Apply every post-roll directive to already-rolled dice
    ///
    /// Order: value replacement, per-die modifier, drop lowest/highest, sum,
    /// additive, multiplier, divisor, then the min/max clamp. The sum is
    /// carried in 64 bits; a total that still does not fit an `i32` after
    /// the clamp is [`DiceError::Overflow`].
    pub fn evaluate(&self, raw: &[i32]) -> Result<RollOutcome, DiceError> {
        let mut adjusted = raw
            .iter()
            .map(|value| {
                self.replacements
                    .get(value)
                    .copied()
                    .unwrap_or(*value)
                    .checked_add(self.per_die)
                    .ok_or_else(|| self.overflow())
            })
            .collect::<Result<Vec<i32>, DiceError>>()?;
        adjusted.sort_unstable();

        let end = adjusted.len().saturating_sub(self.drop_highest as usize);
        let start = (self.drop_lowest as usize).min(end);
        let kept = adjusted[start..end].to_vec();

        let sum: i64 = kept.iter().map(|die| i64::from(*die)).sum();
        let mut total = sum
            .checked_add(i64::from(self.additive))
            .and_then(|total| total.checked_mul(i64::from(self.multiplier)))
            .ok_or_else(|| self.overflow())?
            / i64::from(self.divisor);
        if let Some(minimum) = self.minimum {
            total = total.max(i64::from(minimum));
        }
        if let Some(maximum) = self.maximum {
            total = total.min(i64::from(maximum));
        }
        let total = i32::try_from(total).map_err(|_| self.overflow())?;

        Ok(RollOutcome {
            raw: raw.to_vec(),
            kept,
            total,
        })
    }

    /// Smallest total this expression can produce, `None` if every face is excluded
    pub fn min_total(&self) -> Result<Option<i32>, DiceError> {
        let lowest = self
            .settled_faces()
            .into_iter()
            .min_by_key(|(_, settled)| *settled);
        self.uniform_total(lowest)
    }

    /// Largest total this expression can produce, `None` if every face is excluded
    pub fn max_total(&self) -> Result<Option<i32>, DiceError> {
        let highest = self
            .settled_faces()
            .into_iter()
            .max_by_key(|(_, settled)| *settled);
        self.uniform_total(highest)
    }

    fn uniform_total(&self, face: Option<(i32, i32)>) -> Result<Option<i32>, DiceError> {
        match face {
            Some((face, _)) => {
                let outcome = self.evaluate(&vec![face; self.dice as usize])?;
                Ok(Some(outcome.total))
            }
            None => Ok(None),
        }
    }

    /// Faces that can decide a bound, paired with the value each settles to
    ///
    /// Only replaced faces and the lowest and highest untouched faces matter,
    /// so the full face range is never walked.
    fn settled_faces(&self) -> Vec<(i32, i32)> {
        let top = self.top_face();
        let untouched =
            |face: &i32| !self.rerolls.contains(face) && !self.replacements.contains_key(face);

        let mut faces: Vec<(i32, i32)> = self
            .replacements
            .iter()
            .filter(|(from, _)| (1..=top).contains(*from) && !self.rerolls.contains(*from))
            .map(|(from, to)| (*from, *to))
            .collect();
        faces.extend((1..=top).find(untouched).map(|face| (face, face)));
        faces.extend((1..=top).rev().find(untouched).map(|face| (face, face)));
        faces
    }

    fn top_face(&self) -> i32 {
        i32::try_from(self.faces).unwrap_or(i32::MAX)
    }

    fn overflow(&self) -> DiceError {
        DiceError::Overflow(self.to_string())
    }
}

impl fmt::Display for RollDirectives {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.dice, self.faces)?;
        if !self.rerolls.is_empty() {
            write!(f, "rr{}", join(self.rerolls.iter()))?;
        }
        let mut grouped: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for (from, to) in &self.replacements {
            grouped.entry(*to).or_default().push(*from);
        }
        for (to, from) in grouped {
            write!(f, "r{}:{}", join(from.iter()), to)?;
        }
        if self.drop_lowest > 0 {
            write!(f, "dl{}", self.drop_lowest)?;
        }
        if self.drop_highest > 0 {
            write!(f, "dh{}", self.drop_highest)?;
        }
        if self.per_die != 0 {
            write!(f, "i{:+}", self.per_die)?;
        }
        if let Some(minimum) = self.minimum {
            write!(f, "min{}", minimum)?;
        }
        if let Some(maximum) = self.maximum {
            write!(f, "max{}", maximum)?;
        }
        if self.multiplier != 1 {
            write!(f, "x{}", self.multiplier)?;
        }
        if self.divisor != 1 {
            write!(f, "/{}", self.divisor)?;
        }
        if self.additive != 0 {
            write!(f, "{:+}", self.additive)?;
        }
        Ok(())
    }
}

impl FromStr for RollDirectives {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for RollDirectives {
    type Error = DiceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RollDirectives> for String {
    fn from(value: RollDirectives) -> Self {
        value.to_string()
    }
}

/// Strip every match of `pattern` from `rest`, returning each match's capture groups
pub(crate) fn extract(rest: &mut String, pattern: &Regex) -> Vec<Vec<String>> {
    let mut tokens = Vec::new();
    while let Some((range, groups)) = pattern.captures(rest.as_str()).map(|caps| split(&caps)) {
        rest.replace_range(range, "");
        tokens.push(groups);
    }
    tokens
}

fn split(caps: &Captures<'_>) -> (std::ops::Range<usize>, Vec<String>) {
    let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
    let groups = caps
        .iter()
        .skip(1)
        .map(|group| group.map(|m| m.as_str().to_string()).unwrap_or_default())
        .collect();
    (whole, groups)
}

fn single<T: FromStr>(
    rest: &mut String,
    pattern: &Regex,
    expression: &str,
    directive: &'static str,
) -> Result<Option<T>, DiceError> {
    let tokens = extract(rest, pattern);
    match tokens.as_slice() {
        [] => Ok(None),
        [token] => number(&token[0], expression).map(Some),
        _ => Err(duplicate(expression, directive)),
    }
}

pub(crate) fn number<T: FromStr>(text: &str, expression: &str) -> Result<T, DiceError> {
    text.trim_start_matches('+')
        .parse()
        .map_err(|_| DiceError::InvalidFormat {
            expression: expression.to_string(),
            reason: format!("'{}' is not a valid number", text),
        })
}

/// Reject dice counts and face counts outside the supported range
fn check_base(dice: u32, faces: u32, expression: String) -> Result<String, DiceError> {
    if dice == 0 {
        return Err(DiceError::InvalidDiceCount(expression));
    }
    if dice > MAX_DICE {
        return Err(DiceError::TooManyDice {
            expression,
            limit: MAX_DICE,
        });
    }
    if faces == 0 {
        return Err(DiceError::InvalidFaces(expression));
    }
    if faces > MAX_FACES {
        return Err(DiceError::Overflow(expression));
    }
    Ok(expression)
}

fn duplicate(expression: &str, directive: &'static str) -> DiceError {
    DiceError::Duplicate {
        expression: expression.to_string(),
        directive,
    }
}

fn join<'a>(values: impl Iterator<Item = &'a i32>) -> String {
    values
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(";")
}
