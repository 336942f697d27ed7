use std::collections::HashMap;

use rug::Integer;

use super::{verify_membership, Accumulator, Error, MembershipProof};
use crate::config::{ConfigError, SetupConfig};
use crate::hash_to_prime::hash_to_prime;
use crate::primitives::{HiddenOrderGroup, Prime};

/// Accumulates arbitrary byte strings by hashing each one to a prime exponent.
///
/// Prime exponents mean no member's exponent divides another's, which is what
/// makes a witness for one key useless for any other.
#[derive(Debug)]
pub struct KeyedAccumulator<A> {
    inner: A,
    keys: HashMap<Vec<u8>, Prime>,
    key_prime_bits: u32,
}

impl<A: Accumulator> KeyedAccumulator<A> {
    pub fn new(inner: A, key_prime_bits: u32) -> Self {
        Self {
            inner,
            keys: HashMap::new(),
            key_prime_bits,
        }
    }

    pub fn from_config(inner: A, config: &SetupConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(inner, config.key_prime_bits))
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }

    pub fn value(&self) -> &Integer {
        self.inner.value()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn contains_key(&self, key: &[u8]) -> bool {
        self.keys.contains_key(key)
    }

    /// The exponent `key` is accumulated as.
    pub fn element_for(&self, key: &[u8]) -> Result<Prime, Error> {
        Ok(hash_to_prime(key, self.key_prime_bits)?)
    }

    pub fn add_key(&mut self, key: &[u8]) -> Result<Integer, Error> {
        let prime = self.element_for(key)?;
        let value = self.inner.add(prime.inner().clone())?;
        self.keys.insert(key.to_vec(), prime);
        Ok(value)
    }

    /// No-op for keys that aren't present.
    pub fn delete_key(&mut self, key: &[u8]) -> Result<Integer, Error> {
        let prime = match self.keys.get(key) {
            Some(prime) => prime,
            None => return Ok(self.inner.value().clone()),
        };
        let value = self.inner.delete(prime.inner())?;
        self.keys.remove(key);
        Ok(value)
    }

    pub fn prove_key(&self, key: &[u8]) -> Result<MembershipProof, Error> {
        match self.keys.get(key) {
            Some(prime) => self.inner.prove_membership(prime.inner()),
            None => Err(Error::NotAMember(self.element_for(key)?.into_inner())),
        }
    }

    #[must_use]
    pub fn verify_key(&self, commitment: &Integer, key: &[u8], proof: &MembershipProof) -> bool {
        verify_key(
            self.inner.public_parameters(),
            commitment,
            key,
            proof,
            self.key_prime_bits,
        )
    }
}

/// Check that `proof` shows `key` (hashed to a `key_prime_bits`-bit prime) is in `commitment`.
#[must_use]
pub fn verify_key<G: HiddenOrderGroup + ?Sized>(
    group: &G,
    commitment: &Integer,
    key: &[u8],
    proof: &MembershipProof,
    key_prime_bits: u32,
) -> bool {
    match hash_to_prime(key, key_prime_bits) {
        Ok(prime) if prime.inner() == &proof.element => {
            verify_membership(group, commitment, proof)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::trapdoor::tests::init;
    use crate::accumulator::TrapdoorAccumulator;
    use crate::primitives::{test_group, RsaTrapdoorGroup};
    use proptest::prelude::*;

    fn keyed() -> KeyedAccumulator<TrapdoorAccumulator<RsaTrapdoorGroup>> {
        init();
        KeyedAccumulator::from_config(
            TrapdoorAccumulator::new(test_group()),
            &SetupConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_keys() {
        let mut acc = keyed();
        acc.add_key(b"alice").unwrap();
        let commitment = acc.add_key(b"bob").unwrap();
        assert_eq!(acc.len(), 2);
        assert_eq!(acc.inner().size(), 2);

        let alice = acc.prove_key(b"alice").unwrap();
        assert_eq!(alice.element.significant_bits(), 128);
        assert!(acc.verify_key(&commitment, b"alice", &alice));
        // A proof only counts for the key it was made for.
        assert!(!acc.verify_key(&commitment, b"bob", &alice));
        assert!(!acc.verify_key(&commitment, b"carol", &alice));

        let after = acc.delete_key(b"alice").unwrap();
        assert!(!acc.contains_key(b"alice"));
        assert!(!acc.verify_key(&after, b"alice", &alice));
        assert_eq!(acc.delete_key(b"alice").unwrap(), after);
        assert!(matches!(acc.prove_key(b"alice"), Err(Error::NotAMember(_))));

        let bob = acc.prove_key(b"bob").unwrap();
        assert!(acc.verify_key(&after, b"bob", &bob));
    }

    #[test]
    fn test_from_config_validates() {
        let config = SetupConfig {
            key_prime_bits: 4,
            ..SetupConfig::default()
        };
        assert!(matches!(
            KeyedAccumulator::from_config(TrapdoorAccumulator::new(test_group()), &config),
            Err(ConfigError::KeyPrimeBits(4))
        ));
    }

    #[test]
    fn test_duplicate_key() {
        let mut acc = keyed();
        acc.add_key(b"alice").unwrap();
        let before = acc.value().clone();
        assert!(matches!(
            acc.add_key(b"alice"),
            Err(Error::DuplicateMember(_))
        ));
        assert_eq!(acc.value(), &before);
        assert_eq!(acc.len(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_keyed_round_trip(keys in prop::collection::hash_set(any::<Vec<u8>>(), 1..8)) {
            let mut acc = keyed();
            for key in &keys {
                acc.add_key(key)?;
            }
            for key in &keys {
                let proof = acc.prove_key(key)?;
                prop_assert!(verify_key(
                    acc.inner().public_parameters(),
                    acc.value(),
                    key,
                    &proof,
                    128,
                ));
            }
        }
    }
}
