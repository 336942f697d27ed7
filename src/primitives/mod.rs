mod group;
pub mod prime;
pub mod provider;
pub mod refinement;
mod rsa_group;

pub use prime::Prime;
pub use refinement::Exponent;

pub use group::{HiddenOrderGroup, NonInvertibleError, TrapdoorGroup};
pub use provider::{FixedPrimes, ModulusProvider, SafePrimeGenerator};
pub use rsa_group::{ParameterError, RsaGroup, RsaTrapdoorGroup, DEFAULT_GENERATOR};

#[cfg(test)]
pub(crate) use rsa_group::test_group;
