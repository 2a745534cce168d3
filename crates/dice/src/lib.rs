//! Dice expressions and the seeded roller that executes them.
//!
//! Rule tables describe their rolls as short strings such as `"2d6"`,
//! `"4d6dl1"` or `"3d6+2dl1i-1min5max18rr1;2"`. [`RollDirectives`] is the
//! parsed form of such a string, [`ConcatDirectives`] the parsed form of a
//! digit-concatenation roll like `"d66"`, and [`Roller`] owns the random
//! source both are rolled against.
//!
//! # Example
//! ```
//! use dice::Roller;
//!
//! let mut a = Roller::new("sector-7");
//! let mut b = Roller::new("sector-7");
//! assert_eq!(a.roll("2d6+1").unwrap(), b.roll("2d6+1").unwrap());
//! ```

pub mod concat;
pub mod directives;
pub mod error;
pub mod roller;


pub use concat::ConcatDirectives;
pub use directives::{RollDirectives, RollOutcome, MAX_DICE, MAX_FACES, MAX_REROLL_ATTEMPTS};
pub use error::DiceError;
pub use roller::{hash_seed, LastRoll, Roller};
