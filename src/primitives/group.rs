use rug::Integer;
use std::fmt::Debug;
use thiserror::Error;

/// The exponent shares a factor with the secret order, so it has no inverse.
///
/// Hitting this for a prime exponent means that exponent divides the order,
/// which leaks information about the factorisation of the modulus.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{exponent} is not invertible modulo the group order")]
pub struct NonInvertibleError {
    pub exponent: Integer,
}

/// A group whose order is hidden from everyone holding only its public description.
///
/// Also known as a group satisfying the adaptive root assumption [Wes18].
/// Group elements are represented as residues in `[1, modulus)`.
///
/// [Wes18]: https://eprint.iacr.org/2018/623
pub trait HiddenOrderGroup: Debug + Send + Sync {
    fn modulus(&self) -> &Integer;

    fn generator(&self) -> &Integer;

    /// Is `value` a valid group element?
    fn contains(&self, value: &Integer) -> bool {
        &Integer::ZERO < value && value < self.modulus()
    }

    /// `base^exponent mod modulus`, for a non-negative `exponent`.
    fn exponentiate(&self, base: &Integer, exponent: &Integer) -> Integer {
        debug_assert!(exponent >= &Integer::ZERO);
        base.clone()
            .pow_mod(exponent, self.modulus())
            .expect("exponent >= 0, modulus > 0")
    }
}

/// A hidden-order group together with its trapdoor.
///
/// The order itself is never handed out. The only thing a holder can do with
/// it is invert exponents, i.e. take roots in the group.
pub trait TrapdoorGroup: HiddenOrderGroup {
    /// The part of the group that is safe to hand to a verifier.
    type Public: HiddenOrderGroup + Clone;

    fn public(&self) -> &Self::Public;

    /// `exponent^-1 mod order`.
    fn invert_exponent(&self, exponent: &Integer) -> Result<Integer, NonInvertibleError>;

    /// Reduce an exponent modulo the secret order.
    ///
    /// `g^x == g^(reduce_exponent(x))` for every element `g`.
    fn reduce_exponent(&self, exponent: &Integer) -> Integer;

    /// `root^exponent == value`, computed with the trapdoor.
    fn root(&self, value: &Integer, exponent: &Integer) -> Result<Integer, NonInvertibleError> {
        let inverse = self.invert_exponent(exponent)?;
        Ok(self.exponentiate(value, &inverse))
    }
}
