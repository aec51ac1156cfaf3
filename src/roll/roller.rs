use crate::common::{NonZeroUInt, UInt};
use rand::Rng;

/// Source of die faces. Abstracted from [`rand::Rng`] so tests can feed a
/// deterministic sequence of rolls.
pub trait Roller {
    /// One uniform value in `[1, sides]`.
    fn roll(&mut self, sides: NonZeroUInt) -> UInt;
}

/// [`Roller`] backed by any rand generator.
#[derive(Debug, Clone)]
pub struct RngRoller<R>(pub R);

impl<R: Rng> Roller for RngRoller<R> {
    fn roll(&mut self, sides: NonZeroUInt) -> UInt {
        self.0.gen_range(1..=sides.get())
    }
}

pub type DefaultRoller = RngRoller<rand::rngs::ThreadRng>;

impl Default for DefaultRoller {
    fn default() -> Self {
        RngRoller(rand::thread_rng())
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;
