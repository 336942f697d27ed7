#![cfg_attr(feature = "strict", deny(warnings))]
//! A dynamic RSA accumulator.
//!
//! The holder of a [`primitives::TrapdoorGroup`] commits to a set of integers
//! with one group element, adds and deletes members in place, and hands out
//! short membership proofs. Anyone with just the public group checks them
//! with [`accumulator::verify_membership`].
pub mod accumulator;
pub mod config;
pub mod hash_to_prime;
pub mod primitives;
pub mod util;

pub use accumulator::{
    verify_membership, Accumulator, KeyedAccumulator, MembershipProof, PublicAccumulator,
    SharedAccumulator, TrapdoorAccumulator,
};
pub use config::SetupConfig;
