use super::{
    error::RollError,
    result::{Outcome, RollResult},
    roller::{DefaultRoller, Roller},
    RResult,
};
use crate::common::*;
use crate::ops::DiceOperate;
use crate::parse::{self, ast};
use log::debug;

/// Drives a roll from source string to [`Outcome`]: parse, roll the dice,
/// apply modifiers in priority order. Holds the roller and the roll
/// budget that bounds exploding chains.
pub struct RollContext<R = DefaultRoller> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls += n;
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    pub(crate) fn roll_one(&mut self, sides: NonZeroUInt) -> RResult<UInt> {
        self.count_rolls(1)?;
        Ok(self.roller.roll(sides))
    }

    pub fn eval_str(&mut self, input: &str) -> RResult<Outcome> {
        let expr = parse::parse(input)?;
        self.eval(expr)
    }

    pub fn eval(&mut self, expr: ast::Expression) -> RResult<Outcome> {
        match expr {
            ast::Expression::Roll(dice) => self.eval_dice(&dice).map(Outcome::Dice),
            ast::Expression::Arithmetic(node) => self.eval_node(&node).map(Outcome::Value),
        }
    }

    fn eval_dice(&mut self, expr: &ast::DiceExpr) -> RResult<RollResult> {
        self.count_rolls(expr.spec.quantity as usize)?;
        let values: Vec<UInt> = (0..expr.spec.quantity)
            .map(|_| self.roller.roll(expr.spec.sides))
            .collect();
        debug!("rolled {} as {:?}", expr.spec, values);

        let mut result = RollResult::new(expr.spec, values);
        for op in expr.sorted_ops() {
            op.operate(&mut result, self)?;
            debug!("after {}: {}", op, result);
        }
        Ok(result)
    }

    fn eval_node(&self, node: &ast::Node) -> RResult<Int> {
        match node {
            ast::Node::Literal(x) => Ok(*x),
            ast::Node::Parenthetical(inner) => self.eval_node(inner),
            ast::Node::Unary(op, rhs) => {
                let x = self.eval_node(rhs)?;
                match op {
                    UnaryOperator::Pos => Ok(x),
                    UnaryOperator::Neg => x.checked_neg().ok_or(RollError::Overflow),
                }
            }
            ast::Node::Binary(lhs, op, rhs) => {
                let l = self.eval_node(lhs)?;
                let r = self.eval_node(rhs)?;
                match op {
                    BinaryOperator::Add => l.checked_add(r).ok_or(RollError::Overflow),
                    BinaryOperator::Sub => l.checked_sub(r).ok_or(RollError::Overflow),
                    BinaryOperator::Mul => l.checked_mul(r).ok_or(RollError::Overflow),
                    BinaryOperator::Div => {
                        if r == 0 {
                            Err(RollError::ZeroDivision)
                        } else {
                            l.checked_div(r).ok_or(RollError::Overflow)
                        }
                    }
                }
            }
        }
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Some(1000), DefaultRoller::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::StepRoller;

    fn mock_roller() -> StepRoller {
        StepRoller::new(NonZeroUInt::new(10).unwrap(), 1)
    }

    fn eval(s: &str) -> RResult<Outcome> {
        let mut ctx = RollContext::new_bounded(1000, mock_roller());
        ctx.eval_str(s)
    }

    fn check(s: &str, expected: Int) {
        assert_eq!(eval(s).unwrap().total(), expected, "evaluating {:?}", s);
    }

    fn check_err(s: &str, expected: RollError) {
        assert_eq!(eval(s).unwrap_err(), expected, "evaluating {:?}", s);
    }

    #[test]
    fn test_eval_number() {
        check("2", 2);
        check("-2", -2);
        check("--2", 2);
    }

    #[test]
    fn test_eval_arithmetic() {
        check("2 + 3", 5);
        check("(2+3)*4", 20);
        check("10/2", 5);
        check("2 * (1 - 3)", -4);
    }

    #[test]
    fn test_eval_division_by_zero() {
        check_err("1/0", RollError::ZeroDivision);
        check_err("1/(2-2)", RollError::ZeroDivision);
    }

    #[test]
    fn test_eval_dice() {
        // StepRoller(10, 1) on d6 yields 4, 5, 6, 1, 2, 3, ...
        check("2d6", 4 + 5);
        check("d6", 4);
        check("1d1", 1);
        check("0d6", 0);
    }

    #[test]
    fn test_eval_dice_roll_shape() {
        let outcome = eval("3d6").unwrap();
        let result = match outcome {
            Outcome::Dice(r) => r,
            Outcome::Value(_) => panic!("expected a dice outcome"),
        };
        assert_eq!(result.dice.len(), 3);
        assert!(result.values().all(|v| (1..=6).contains(&v)));
    }

    #[test]
    fn test_eval_zero_quantity_is_empty() {
        let outcome = eval("0d6").unwrap();
        match outcome {
            Outcome::Dice(r) => assert!(r.dice.is_empty()),
            Outcome::Value(_) => panic!("expected a dice outcome"),
        }
    }

    #[test]
    fn test_eval_successes() {
        // d10 rolls: 10, 1, 2, 3
        check("4d10>6", 1);
        check("4d10>0", 4);
    }

    #[test]
    fn test_eval_exploding() {
        // d6 rolls: 4, 5, 6, then 1 for the chained die
        check("3d6x6", 4 + 5 + 6 + 1);
    }

    #[test]
    fn test_exploding_runs_before_successes() {
        // modifier order in the source must not matter
        check("3d6x6>5", 1);
        check("3d6>5x6", 1);
    }

    #[test]
    fn test_eval_exploding_budget() {
        let mut ctx = RollContext::new_bounded(
            50,
            StepRoller::new(NonZeroUInt::new(6).unwrap(), 0),
        );
        assert_eq!(ctx.eval_str("1d6x1").unwrap_err(), RollError::TooManyRolls);
    }

    #[test]
    fn test_eval_parse_error_propagates() {
        assert!(matches!(eval("4d10>").unwrap_err(), RollError::Parse(_)));
        assert!(matches!(eval("2+").unwrap_err(), RollError::Parse(_)));
    }
}
