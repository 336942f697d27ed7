//! Dynamic accumulators over hidden-order groups.
//!
//! An accumulator commits to a set of positive integers (group exponents)
//! with a single group element `g^(x_1 * ... * x_n)`. A member `x` is proven
//! by a witness `w` with `w^x == value`; anyone holding the public group can
//! check that, but only whoever knows the group order can delete members or
//! compute witnesses cheaply.
use rug::Integer;
use thiserror::Error;

use crate::hash_to_prime::HashToPrimeError;
use crate::primitives::{refinement, HiddenOrderGroup, NonInvertibleError, ParameterError};

pub mod keyed;
pub mod proof;
pub mod public;
pub mod shared;
pub mod trapdoor;

pub use keyed::KeyedAccumulator;
pub use proof::{verify_membership, MembershipProof};
pub use public::PublicAccumulator;
pub use shared::SharedAccumulator;
pub use trapdoor::TrapdoorAccumulator;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid group parameters: {0}")]
    InvalidParameter(#[from] ParameterError),
    #[error("{0} is already a member")]
    DuplicateMember(Integer),
    #[error(transparent)]
    NonInvertibleElement(#[from] NonInvertibleError),
    #[error("{0} is not a member")]
    NotAMember(Integer),
    #[error("invalid element: {0}")]
    InvalidElement(#[from] refinement::Error),
    #[error(transparent)]
    HashToPrime(#[from] HashToPrimeError),
}

pub trait Accumulator {
    /// What a verifier needs to check proofs against this accumulator.
    type Public: HiddenOrderGroup + Clone;

    fn public_parameters(&self) -> &Self::Public;

    /// The current commitment. Safe to publish.
    fn value(&self) -> &Integer;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }

    fn contains(&self, element: &Integer) -> bool;

    /// Accumulate `element`, returning the new commitment.
    ///
    /// Fails without touching the state if `element` is already a member.
    fn add(&mut self, element: Integer) -> Result<Integer, Error>;

    /// Remove `element`, returning the new commitment.
    ///
    /// Removing a non-member is a no-op that returns the current commitment.
    fn delete(&mut self, element: &Integer) -> Result<Integer, Error>;

    fn prove_membership(&self, element: &Integer) -> Result<MembershipProof, Error>;

    #[must_use]
    fn verify_membership(&self, commitment: &Integer, proof: &MembershipProof) -> bool {
        verify_membership(self.public_parameters(), commitment, proof)
    }
}
