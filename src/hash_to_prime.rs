use digest::{ExtendableOutput, Update, XofReader};
use rug::Integer;
use sha3::Shake256;
use thiserror::Error;

use crate::primitives::prime::is_probably_prime;
use crate::primitives::Prime;

// Primes near 2^k have density about 1/(k ln 2); this is plenty for any sane k.
const MAX_ATTEMPTS: usize = 100_000;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HashToPrimeError {
    #[error("primes need at least 2 bits (asked for {0})")]
    Bits(u32),
    #[error("no prime found after {0} attempts")]
    Exhausted(usize),
}

struct IntegerHasher {
    reader: <Shake256 as ExtendableOutput>::Reader,
    result: Vec<u8>,
}

impl IntegerHasher {
    fn new(data: &[u8], digits: usize) -> Self {
        // Here, we use Shake256 which is an "extendable output function" (XOF).
        // This is basically a hash function that gives you as many bytes of output
        // as you want, so we can keep drawing candidates from the same input.
        let mut hasher = Shake256::default();
        hasher.update(data);
        let reader = hasher.finalize_xof();
        let result: Vec<u8> = vec![0; digits];
        Self { result, reader }
    }

    fn hash(&mut self) -> Integer {
        self.reader.read(&mut self.result);
        Integer::from_digits(&self.result, rug::integer::Order::Lsf)
    }
}

/// Hash `data` to a prime of exactly `bits` bits.
///
/// Deterministic: the same data always gives the same prime.
pub fn hash_to_prime(data: &[u8], bits: u32) -> Result<Prime, HashToPrimeError> {
    if bits < 2 {
        return Err(HashToPrimeError::Bits(bits));
    }
    let digits = (bits as usize + 7) / 8;
    let mut hasher = IntegerHasher::new(data, digits);

    for _ in 0..MAX_ATTEMPTS {
        let mut candidate = hasher.hash().keep_bits(bits);
        candidate.set_bit(bits - 1, true).set_bit(0, true);
        if !is_probably_prime(&candidate) {
            continue;
        }
        // If we made it here, our candidate rocks.
        return Ok(Prime::try_from(candidate).expect("checked above"));
    }
    Err(HashToPrimeError::Exhausted(MAX_ATTEMPTS))
}
