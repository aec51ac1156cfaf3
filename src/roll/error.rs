use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RollError {
    #[error("too many dice rolled")]
    TooManyRolls,
    #[error("cannot divide by zero")]
    ZeroDivision,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("{0}")]
    Parse(#[from] crate::parse::ParseError),
}
