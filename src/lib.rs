//! Evaluator for textual dice-roll expressions.
//!
//! An expression is a dice token `NdM` followed by optional modifiers:
//! `>T` flags each die rolling strictly above `T` as a success, `xT`
//! explodes dice rolling `T` or above. When the input carries no dice
//! token it is evaluated as plain integer arithmetic instead.
//!
//! ```
//! let outcome = dicecup::roll("(2+3)*4")?;
//! assert_eq!(outcome.total(), 20);
//! # Ok::<(), dicecup::RollError>(())
//! ```

mod common;
pub mod dice;
pub mod ops;
pub mod parse;
pub mod roll;

pub use common::{Int, NonZeroUInt, UInt};
pub use dice::DiceSpec;
pub use parse::{ParseError, Parser};
pub use roll::{Outcome, RollContext, RollError, RollResult, Roller};

/// Rolls `input` with the thread RNG and the default roll budget.
pub fn roll(input: &str) -> Result<Outcome, RollError> {
    let mut ctx = RollContext::default();
    ctx.eval_str(input)
}

/// Rolls `input` with a caller-supplied roller and roll budget.
pub fn roll_with<R: Roller>(
    input: &str,
    roller: R,
    max_rolls: usize,
) -> Result<Outcome, RollError> {
    let mut ctx = RollContext::new_bounded(max_rolls, roller);
    ctx.eval_str(input)
}
