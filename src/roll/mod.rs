mod ctx;
mod error;
mod result;
mod roller;

use crate::parse::ast;

type RResult<T> = Result<T, RollError>;

pub use ctx::RollContext;
pub use error::RollError;
pub use result::{Die, Outcome, RollResult};
pub use roller::{DefaultRoller, RngRoller, Roller};

#[cfg(test)]
pub(crate) use roller::StepRoller;

pub fn eval(expr: ast::Expression, roller: impl Roller, max_rolls: usize) -> RResult<Outcome> {
    let mut ctx = RollContext::new_bounded(max_rolls, roller);
    ctx.eval(expr)
}
