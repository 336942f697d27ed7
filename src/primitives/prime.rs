use rug::integer::IsPrime;
use rug::Integer;
use thiserror::Error;

// How sure do we want to be that our primes are actually prime?
// We want to be 30 sure.
pub(crate) const MILLER_RABIN_ITERS: u32 = 30;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{value} is composite")]
pub struct CompositeError {
    value: Integer,
}

#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct Prime(Integer);

impl Prime {
    pub fn inner(&self) -> &Integer {
        &self.0
    }

    pub fn into_inner(self) -> Integer {
        self.0
    }

    /// Is `(self - 1) / 2` also prime?
    pub fn is_safe(&self) -> bool {
        if self.0 <= 3 {
            return false;
        }
        let half = Integer::from(&self.0 - 1u8) >> 1;
        is_probably_prime(&half)
    }
}

pub(crate) fn is_probably_prime(value: &Integer) -> bool {
    value.is_probably_prime(MILLER_RABIN_ITERS) != IsPrime::No
}

impl TryFrom<Integer> for Prime {
    type Error = CompositeError;

    fn try_from(value: Integer) -> Result<Self, Self::Error> {
        if value < 2 || !is_probably_prime(&value) {
            return Err(CompositeError { value });
        }
        Ok(Prime(value))
    }
}

impl From<Prime> for Integer {
    fn from(prime: Prime) -> Self {
        prime.0
    }
}

#[cfg(test)]
use proptest::prelude::*;

#[cfg(test)]
impl Arbitrary for Prime {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        prop::sample::select(vec![3u32, 5, 7, 11, 13, 17, 19, 23, 29, 31])
            .prop_map(Integer::from)
            .prop_map(Prime::try_from)
            .prop_map(Result::unwrap)
            .boxed()
    }
}
