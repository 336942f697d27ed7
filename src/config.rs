use rug::Integer;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::primitives::DEFAULT_GENERATOR;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("modulus must have at least 32 bits (got {0})")]
    ModulusBits(u32),
    #[error("key primes must have at least 8 bits (got {0})")]
    KeyPrimeBits(u32),
    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Knobs for setting up a fresh accumulator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SetupConfig {
    /// Size of the RSA modulus. 3072 bits gives 128 bits of security.
    pub modulus_bits: u32,
    pub generator: Integer,
    /// Size of the primes that keys hash to.
    pub key_prime_bits: u32,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            modulus_bits: 3072,
            generator: DEFAULT_GENERATOR.clone(),
            // LLX, "Universal accumulators with efficient nonmembership proofs", construction 1
            key_prime_bits: 128,
        }
    }
}

impl SetupConfig {
    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modulus_bits < 32 {
            return Err(ConfigError::ModulusBits(self.modulus_bits));
        }
        if self.key_prime_bits < 8 {
            return Err(ConfigError::KeyPrimeBits(self.key_prime_bits));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_in() {
        let config = SetupConfig::from_json(r#"{"modulus_bits": 1024}"#).unwrap();
        assert_eq!(config.modulus_bits, 1024);
        assert_eq!(config.key_prime_bits, 128);
        assert_eq!(config.generator, Integer::from(65537));
    }

    #[test]
    fn test_rejects_tiny_modulus() {
        assert!(matches!(
            SetupConfig::from_json(r#"{"modulus_bits": 16}"#),
            Err(ConfigError::ModulusBits(16))
        ));
        assert!(matches!(
            SetupConfig::from_json(r#"{"key_prime_bits": 4}"#),
            Err(ConfigError::KeyPrimeBits(4))
        ));
        assert!(matches!(
            SetupConfig::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_default_is_valid() {
        SetupConfig::default().validate().unwrap();
    }
}
