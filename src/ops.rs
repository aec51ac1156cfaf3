use crate::common::UInt;
use crate::roll::{RollContext, RollError, RollResult, Roller};
use std::fmt;

/// One roll modifier trailing the dice token.
///
/// Modifiers are written to the results pipeline in order of ascending
/// [`priority`](DiceOperate::priority), so an exploding modifier always
/// runs before a success count no matter where it appears in the source.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[enum_dispatch::enum_dispatch(DiceOperate)]
pub enum DiceOperator {
    Successes(Successes),
    Exploding(Exploding),
}

impl fmt::Display for DiceOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Successes(x) => write!(f, "{}", x),
            Self::Exploding(x) => write!(f, "{}", x),
        }
    }
}

#[enum_dispatch::enum_dispatch]
pub trait DiceOperate {
    /// The character that selects this modifier in the expression string.
    fn trigger(&self) -> char;

    /// Evaluation rank; lower runs first.
    fn priority(&self) -> u8;

    fn operate<R: Roller>(
        &self,
        target: &mut RollResult,
        ctx: &mut RollContext<R>,
    ) -> Result<(), RollError>;
}

/// `>N`: flag every die that rolled strictly above `N`. The result total
/// becomes the number of flagged dice.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Successes(UInt);

impl Successes {
    pub const PRIORITY: u8 = 7;

    pub fn new(threshold: UInt) -> Self {
        Self(threshold)
    }

    pub fn threshold(&self) -> UInt {
        self.0
    }
}

impl DiceOperate for Successes {
    fn trigger(&self) -> char {
        '>'
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn operate<R: Roller>(
        &self,
        target: &mut RollResult,
        _: &mut RollContext<R>,
    ) -> Result<(), RollError> {
        for die in &mut target.dice {
            die.success = Some(die.value > self.0);
        }
        Ok(())
    }
}

impl fmt::Display for Successes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ">{}", self.0)
    }
}

/// `xN`: every die that rolled `N` or above chains an extra roll of the
/// same sides, appended to the results. Newly rolled dice keep chaining
/// while they meet the threshold.
///
/// Termination is enforced by the context's roll budget, so `x1` (which
/// would chain forever) ends in [`RollError::TooManyRolls`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Exploding(UInt);

impl Exploding {
    pub const PRIORITY: u8 = 1;

    pub fn new(threshold: UInt) -> Self {
        Self(threshold)
    }

    pub fn threshold(&self) -> UInt {
        self.0
    }
}

impl DiceOperate for Exploding {
    fn trigger(&self) -> char {
        'x'
    }

    fn priority(&self) -> u8 {
        Self::PRIORITY
    }

    fn operate<R: Roller>(
        &self,
        target: &mut RollResult,
        ctx: &mut RollContext<R>,
    ) -> Result<(), RollError> {
        // scan only the dice present when the modifier starts; each
        // chain appends to the tail and is checked on its own
        let snapshot = target.dice.len();
        for i in 0..snapshot {
            let sides = target.dice[i].sides;
            let mut value = target.dice[i].value;
            let mut last = i;
            while value >= self.0 {
                target.dice[last].explode();
                value = ctx.roll_one(sides)?;
                target.push_rolled(value, sides);
                last = target.dice.len() - 1;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Exploding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x{}", self.0)
    }
}
