use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rug::Integer;

use super::{Accumulator, Error, MembershipProof};

/// An accumulator that can be handed to several threads.
///
/// `add` and `delete` hold the write lock, so at most one mutation is in
/// flight and nobody sees a half-applied update. Proofs share the read lock
/// and run concurrently with each other.
#[derive(Debug)]
pub struct SharedAccumulator<A> {
    inner: Arc<RwLock<A>>,
}

impl<A> Clone for SharedAccumulator<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: Accumulator> SharedAccumulator<A> {
    pub fn new(accumulator: A) -> Self {
        Self {
            inner: Arc::new(RwLock::new(accumulator)),
        }
    }

    // Mutations validate before touching state, so a poisoned lock still
    // guards a consistent accumulator.
    fn read(&self) -> RwLockReadGuard<'_, A> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, A> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, element: Integer) -> Result<Integer, Error> {
        self.write().add(element)
    }

    pub fn delete(&self, element: &Integer) -> Result<Integer, Error> {
        self.write().delete(element)
    }

    pub fn prove_membership(&self, element: &Integer) -> Result<MembershipProof, Error> {
        self.read().prove_membership(element)
    }

    /// Prove against the value at the same instant, as one consistent pair.
    pub fn prove_with_commitment(
        &self,
        element: &Integer,
    ) -> Result<(Integer, MembershipProof), Error> {
        let accumulator = self.read();
        let proof = accumulator.prove_membership(element)?;
        Ok((accumulator.value().clone(), proof))
    }

    pub fn value(&self) -> Integer {
        self.read().value().clone()
    }

    pub fn size(&self) -> usize {
        self.read().size()
    }

    pub fn contains(&self, element: &Integer) -> bool {
        self.read().contains(element)
    }

    pub fn public_parameters(&self) -> A::Public {
        self.read().public_parameters().clone()
    }

    /// Run `f` with shared access to the accumulator.
    pub fn with<T>(&self, f: impl FnOnce(&A) -> T) -> T {
        f(&self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::trapdoor::tests::{init, ELEMENTS};
    use crate::accumulator::{verify_membership, TrapdoorAccumulator};
    use crate::primitives::{test_group, HiddenOrderGroup};
    use rayon::prelude::*;

    #[test]
    fn test_concurrent_adds_and_proofs() {
        init();
        let shared = SharedAccumulator::new(TrapdoorAccumulator::new(test_group()));
        let public = shared.public_parameters();

        ELEMENTS.par_iter().for_each(|&e| {
            let element = Integer::from(e);
            shared.add(element.clone()).unwrap();
            let (commitment, proof) = shared.prove_with_commitment(&element).unwrap();
            assert!(verify_membership(&public, &commitment, &proof));
        });
        assert_eq!(shared.size(), ELEMENTS.len());

        let value = shared.value();
        ELEMENTS.par_iter().for_each(|&e| {
            let proof = shared.prove_membership(&e.into()).unwrap();
            assert!(verify_membership(&public, &value, &proof));
        });

        ELEMENTS
            .par_iter()
            .enumerate()
            .filter(|(i, _)| i % 2 == 0)
            .for_each(|(_, &e)| {
                shared.delete(&e.into()).unwrap();
                shared.delete(&e.into()).unwrap();
            });
        assert_eq!(shared.size(), ELEMENTS.len() / 2);
        let expected = shared.with(|acc| {
            let product = acc
                .members()
                .fold(Integer::from(1u8), |product, member| product * member);
            public.exponentiate(public.generator(), &product)
        });
        assert_eq!(shared.value(), expected);
    }

    #[test]
    fn test_clones_share_state() {
        let a = SharedAccumulator::new(TrapdoorAccumulator::new(test_group()));
        let b = a.clone();
        a.add(7.into()).unwrap();
        assert!(b.contains(&7.into()));
        assert_eq!(a.value(), b.value());
    }
}
