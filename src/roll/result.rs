use crate::common::{Int, NonZeroUInt, UInt};
use crate::dice::DiceSpec;
use std::fmt;

/// What an expression evaluated to: a performed dice roll, or the value of
/// a plain arithmetic expression.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome {
    Dice(RollResult),
    Value(Int),
}

impl Outcome {
    pub fn total(&self) -> Int {
        match self {
            Self::Dice(result) => result.total(),
            Self::Value(x) => *x,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dice(result) => write!(f, "{}", result),
            Self::Value(x) => write!(f, "{}", x),
        }
    }
}

/// The per-die results of one roll, mutated in place by the modifier
/// pipeline: exploding appends dice, success counting flags them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RollResult {
    pub spec: DiceSpec,
    pub dice: Vec<Die>,
}

impl RollResult {
    pub(crate) fn new(spec: DiceSpec, values: impl IntoIterator<Item = UInt>) -> Self {
        let dice = values
            .into_iter()
            .map(|value| Die::new(value, spec.sides))
            .collect();
        Self { spec, dice }
    }

    pub fn values(&self) -> impl Iterator<Item = UInt> + '_ {
        self.dice.iter().map(|die| die.value)
    }

    /// Success count when any die carries a success flag, otherwise the
    /// sum of face values. An empty roll totals 0.
    pub fn total(&self) -> Int {
        if self.dice.iter().any(|die| die.success.is_some()) {
            self.dice
                .iter()
                .filter(|die| die.success == Some(true))
                .count() as Int
        } else {
            self.dice.iter().map(|die| Int::from(die.value)).sum()
        }
    }

    pub(crate) fn push_rolled(&mut self, value: UInt, sides: NonZeroUInt) {
        self.dice.push(Die::new(value, sides));
    }
}

impl fmt::Display for RollResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", die)?;
        }
        write!(f, ") = {}", self.total())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Die {
    pub value: UInt,
    pub sides: NonZeroUInt,
    pub exploded: bool,
    pub success: Option<bool>,
}

impl Die {
    pub(crate) fn new(value: UInt, sides: NonZeroUInt) -> Self {
        Self {
            value,
            sides,
            exploded: false,
            success: None,
        }
    }

    pub(crate) fn explode(&mut self) {
        self.exploded = true;
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.exploded {
            f.write_str("!")?;
        }
        if self.success == Some(true) {
            f.write_str("*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(values: Vec<UInt>) -> RollResult {
        let spec = DiceSpec::new(values.len() as UInt, NonZeroUInt::new(6).unwrap());
        RollResult::new(spec, values)
    }

    #[test]
    fn test_total_sums_without_flags() {
        assert_eq!(result(vec![1, 2, 3]).total(), 6);
        assert_eq!(result(vec![]).total(), 0);
    }

    #[test]
    fn test_total_counts_successes() {
        let mut r = result(vec![1, 5, 6]);
        r.dice[1].success = Some(true);
        r.dice[2].success = Some(true);
        r.dice[0].success = Some(false);
        assert_eq!(r.total(), 2);
    }

    #[test]
    fn test_display() {
        let mut r = result(vec![4, 6, 2]);
        r.dice[1].explode();
        r.push_rolled(3, NonZeroUInt::new(6).unwrap());
        assert_eq!(r.to_string(), "(4, 6!, 2, 3) = 15");
    }
}
