//! Where group parameters come from.
//!
//! Accumulators never look at how a modulus was made, only at the
//! [`TrapdoorGroup`] a provider hands them.
use super::group::TrapdoorGroup;
use super::prime::is_probably_prime;
use super::rsa_group::{ParameterError, RsaTrapdoorGroup, DEFAULT_GENERATOR};
use crate::config::{ConfigError, SetupConfig};
use log::{debug, info};
use rand::RngCore;
use rug::integer::Order;
use rug::Integer;

/// How many prime candidates to try per safe prime before giving up.
const MAX_CANDIDATES: usize = 100_000;

pub trait ModulusProvider {
    type Group: TrapdoorGroup;

    fn provide(&mut self) -> Result<Self::Group, ParameterError>;
}

/// Parameters from two known primes.
#[derive(Debug, Clone)]
pub struct FixedPrimes {
    p: Integer,
    q: Integer,
    generator: Integer,
}

impl FixedPrimes {
    pub fn new(p: Integer, q: Integer) -> Self {
        Self::with_generator(p, q, DEFAULT_GENERATOR.clone())
    }

    pub fn with_generator(p: Integer, q: Integer, generator: Integer) -> Self {
        Self { p, q, generator }
    }
}

impl ModulusProvider for FixedPrimes {
    type Group = RsaTrapdoorGroup;

    fn provide(&mut self) -> Result<RsaTrapdoorGroup, ParameterError> {
        RsaTrapdoorGroup::from_primes(self.p.clone(), self.q.clone(), self.generator.clone())
    }
}

/// Fresh parameters: the product of two random safe primes.
pub struct SafePrimeGenerator<R> {
    rng: R,
    modulus_bits: u32,
    generator: Integer,
}

impl<R: RngCore> SafePrimeGenerator<R> {
    pub fn new(rng: R, modulus_bits: u32) -> Self {
        Self {
            rng,
            modulus_bits,
            generator: DEFAULT_GENERATOR.clone(),
        }
    }

    pub fn from_config(rng: R, config: &SetupConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            rng,
            modulus_bits: config.modulus_bits,
            generator: config.generator.clone(),
        })
    }

    fn random_bits(&mut self, bits: u32) -> Integer {
        let mut bytes = vec![0u8; (bits as usize + 7) / 8];
        self.rng.fill_bytes(&mut bytes);
        Integer::from_digits(&bytes, Order::Lsf).keep_bits(bits)
    }

    /// A `bits`-bit prime `p` with `(p - 1) / 2` also prime.
    fn safe_prime(&mut self, bits: u32) -> Result<Integer, ParameterError> {
        for candidates in 1..=MAX_CANDIDATES {
            let mut half = self.random_bits(bits - 1);
            half.set_bit(bits - 2, true);
            let half = half.next_prime();
            if half.significant_bits() != bits - 1 {
                continue;
            }
            let p = (half << 1u32) + 1u8;
            if is_probably_prime(&p) {
                debug!("found {bits}-bit safe prime after {candidates} candidates");
                return Ok(p);
            }
        }
        Err(ParameterError::Exhausted(MAX_CANDIDATES))
    }
}

impl<R: RngCore> ModulusProvider for SafePrimeGenerator<R> {
    type Group = RsaTrapdoorGroup;

    fn provide(&mut self) -> Result<RsaTrapdoorGroup, ParameterError> {
        let bits = self.modulus_bits / 2;
        if bits < 4 {
            return Err(ParameterError::PrimeSize(bits));
        }
        info!("generating {}-bit modulus", self.modulus_bits);
        let p = self.safe_prime(bits)?;
        let mut q = self.safe_prime(bits)?;
        while q == p {
            q = self.safe_prime(bits)?;
        }
        RsaTrapdoorGroup::from_primes(p, q, self.generator.clone())
    }
}
