use super::group::{HiddenOrderGroup, NonInvertibleError, TrapdoorGroup};
use derivative::Derivative;
use log::info;
use once_cell::sync::Lazy;
use rug::Integer;
use serde::{Deserialize, Serialize};
use std::ops::Deref;
use thiserror::Error;

/// Anything below this is too small to hold a generator and its powers.
const MIN_MODULUS: u32 = 5;

static RSA_2048: Lazy<Integer> = Lazy::new(|| {
    Integer::parse(
        "2519590847565789349402718324004839857142928212620403202777713783604366202070\
           7595556264018525880784406918290641249515082189298559149176184502808489120072\
           8449926873928072877767359714183472702618963750149718246911650776133798590957\
           0009733045974880842840179742910064245869181719511874612151517265463228221686\
           9987549182422433637259085141865462043576798423387184774447920739934236584823\
           8242811981638150106748104516603773060562016196762561338441436038339044149526\
           3443219011465754445417842402092461651572335077870774981712577246796292638635\
           6373289912154831438167899885040445364023527381951378636564391212010397122822\
           120720357",
    )
    .expect("valid decimal literal")
    .into()
});

pub static DEFAULT_GENERATOR: Lazy<Integer> = Lazy::new(|| Integer::from(65537));

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("modulus {0} must be odd and greater than 4")]
    Modulus(Integer),
    #[error("group order must be greater than one")]
    Order,
    #[error("generator {generator} is not in the group mod {modulus}")]
    GeneratorOutOfRange { generator: Integer, modulus: Integer },
    #[error("generator {0} shares a factor with the modulus")]
    GeneratorNotCoprimeToModulus(Integer),
    #[error("generator {0} shares a factor with the group order")]
    GeneratorNotCoprimeToOrder(Integer),
    #[error("{0} is not prime")]
    Composite(Integer),
    #[error("the two prime factors must be distinct")]
    RepeatedFactor,
    #[error("cannot generate {0}-bit primes")]
    PrimeSize(u32),
    #[error("gave up looking for a safe prime after {0} candidates")]
    Exhausted(usize),
}

/// The public half of an RSA group: modulus and generator.
///
/// This is everything a verifier needs; it carries no trapdoor.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawRsaGroup")]
pub struct RsaGroup {
    modulus: Integer,
    generator: Integer,
}

#[derive(Deserialize)]
struct RawRsaGroup {
    modulus: Integer,
    generator: Integer,
}

impl TryFrom<RawRsaGroup> for RsaGroup {
    type Error = ParameterError;

    fn try_from(raw: RawRsaGroup) -> Result<Self, Self::Error> {
        RsaGroup::new(raw.modulus, raw.generator)
    }
}

impl RsaGroup {
    pub fn new(modulus: Integer, generator: Integer) -> Result<Self, ParameterError> {
        if modulus < MIN_MODULUS || modulus.is_even() {
            return Err(ParameterError::Modulus(modulus));
        }
        if generator <= 1 || generator >= modulus {
            return Err(ParameterError::GeneratorOutOfRange { generator, modulus });
        }
        if Integer::from(generator.gcd_ref(&modulus)) != 1 {
            return Err(ParameterError::GeneratorNotCoprimeToModulus(generator));
        }
        Ok(Self { modulus, generator })
    }

    /// The RSA-2048 challenge modulus.
    ///
    /// Nobody is known to have its factors, so there is no trapdoor and this
    /// group is only usable without one (see [`crate::accumulator::PublicAccumulator`]).
    pub fn rsa2048() -> Self {
        Self {
            modulus: RSA_2048.deref().clone(),
            generator: DEFAULT_GENERATOR.deref().clone(),
        }
    }
}

impl HiddenOrderGroup for RsaGroup {
    fn modulus(&self) -> &Integer {
        &self.modulus
    }

    fn generator(&self) -> &Integer {
        &self.generator
    }
}

/// An RSA group along with a multiple of its order.
///
/// Neither `Clone` nor `Serialize`: the order stays with whoever
/// constructed the group.
#[derive(Derivative)]
#[derivative(Debug)]
pub struct RsaTrapdoorGroup {
    public: RsaGroup,
    #[derivative(Debug = "ignore")]
    order: Integer,
}

impl RsaTrapdoorGroup {
    /// `order` must be a multiple of the order of the group mod `modulus`
    /// (e.g. `phi(modulus)`).
    pub fn from_parts(
        modulus: Integer,
        order: Integer,
        generator: Integer,
    ) -> Result<Self, ParameterError> {
        if order <= 1 {
            return Err(ParameterError::Order);
        }
        let public = RsaGroup::new(modulus, generator)?;
        if Integer::from(public.generator.gcd_ref(&order)) != 1 {
            return Err(ParameterError::GeneratorNotCoprimeToOrder(public.generator));
        }
        info!(
            "set up {}-bit RSA group with generator {}",
            public.modulus.significant_bits(),
            public.generator
        );
        Ok(Self { public, order })
    }

    /// Build the group mod `p * q` with order `phi(p * q)`.
    pub fn from_primes(p: Integer, q: Integer, generator: Integer) -> Result<Self, ParameterError> {
        for factor in [&p, &q] {
            if !super::prime::is_probably_prime(factor) {
                return Err(ParameterError::Composite(factor.clone()));
            }
        }
        if p == q {
            return Err(ParameterError::RepeatedFactor);
        }
        let modulus = Integer::from(&p * &q);
        let order = Integer::from(&p - 1u8) * Integer::from(&q - 1u8);
        Self::from_parts(modulus, order, generator)
    }
}

impl HiddenOrderGroup for RsaTrapdoorGroup {
    fn modulus(&self) -> &Integer {
        &self.public.modulus
    }

    fn generator(&self) -> &Integer {
        &self.public.generator
    }
}

impl TrapdoorGroup for RsaTrapdoorGroup {
    type Public = RsaGroup;

    fn public(&self) -> &RsaGroup {
        &self.public
    }

    fn invert_exponent(&self, exponent: &Integer) -> Result<Integer, NonInvertibleError> {
        exponent
            .clone()
            .invert(&self.order)
            .map_err(|exponent| NonInvertibleError { exponent })
    }

    fn reduce_exponent(&self, exponent: &Integer) -> Integer {
        exponent.clone().div_rem_euc(self.order.clone()).1
    }
}

/// A 512-bit group from two fixed 256-bit safe primes, for tests.
#[cfg(test)]
pub(crate) fn test_group() -> RsaTrapdoorGroup {
    let p = Integer::parse(
        "73634545789577203164274094033441768357552825200059657973999231281927058874423",
    )
    .unwrap()
    .into();
    let q = Integer::parse(
        "66159958837334822747865876530214365789881377529301454564780679776285223830587",
    )
    .unwrap()
    .into();
    RsaTrapdoorGroup::from_primes(p, q, DEFAULT_GENERATOR.clone()).unwrap()
}
