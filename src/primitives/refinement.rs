use rug::Integer;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("value is zero")]
    Zero,
    #[error("value {0} is negative")]
    Negative(Integer),
    #[error("value is one")]
    One,
}

/// An integer strictly greater than one.
///
/// Accumulated elements are group exponents. `x^1 == x` for every `x`, so 1
/// would "prove" membership in any commitment at all.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Exponent {
    value: Integer,
}

impl TryFrom<Integer> for Exponent {
    type Error = Error;

    fn try_from(value: Integer) -> Result<Self, Self::Error> {
        use std::cmp::Ordering::*;
        match value.cmp(&Integer::ZERO) {
            Less => Err(Error::Negative(value)),
            Equal => Err(Error::Zero),
            Greater if value == 1 => Err(Error::One),
            Greater => Ok(Exponent { value }),
        }
    }
}

impl TryFrom<&Integer> for Exponent {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self, Self::Error> {
        Self::try_from(value.clone())
    }
}
