use crate::common::{NonZeroUInt, UInt};
use std::fmt;

/// One `NdM` token: roll `quantity` dice with `sides` faces each.
///
/// `quantity` may be zero (a legal, if pointless, roll of no dice);
/// `sides` can never be. A missing quantity (`"d6"`) defaults to 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct DiceSpec {
    pub quantity: UInt,
    pub sides: NonZeroUInt,
}

impl DiceSpec {
    pub const fn new(quantity: UInt, sides: NonZeroUInt) -> Self {
        Self { quantity, sides }
    }
}

impl fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.quantity, self.sides)
    }
}

impl std::str::FromStr for DiceSpec {
    type Err = ParseDiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (quantity, sides) = s.split_once('d').ok_or(ParseDiceError::NoDelimiter)?;
        let quantity = if quantity.is_empty() {
            1
        } else {
            quantity.parse().map_err(ParseDiceError::InvalidQuantity)?
        };
        let sides = sides.parse().map_err(ParseDiceError::InvalidSides)?;
        Ok(Self::new(quantity, sides))
    }
}

#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ParseDiceError {
    #[error("cannot parse string as dice without 'd' delimiter")]
    NoDelimiter,
    #[error("invalid dice quantity: {0}")]
    InvalidQuantity(std::num::ParseIntError),
    #[error("invalid dice sides: {0}")]
    InvalidSides(std::num::ParseIntError),
}
