use rug::Integer;
use serde::{Deserialize, Serialize};

use crate::primitives::HiddenOrderGroup;

/// Evidence that `element` was accumulated into some commitment.
///
/// Not tied to any accumulator: it checks against whichever commitment it was
/// produced for, including ones the accumulator has since moved past.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MembershipProof {
    pub witness: Integer,
    pub element: Integer,
}

impl MembershipProof {
    pub fn new(witness: Integer, element: Integer) -> Self {
        Self { witness, element }
    }
}

/// Check `proof.witness^proof.element == commitment`.
///
/// Needs only the public group. Malformed inputs are rejected, never panicked on.
#[must_use]
pub fn verify_membership<G: HiddenOrderGroup + ?Sized>(
    group: &G,
    commitment: &Integer,
    proof: &MembershipProof,
) -> bool {
    if proof.element <= 1 || !group.contains(&proof.witness) || !group.contains(commitment) {
        return false;
    }
    &group.exponentiate(&proof.witness, &proof.element) == commitment
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::{test_group, TrapdoorGroup};
    use crate::util::{byte, DataSized};

    #[test]
    fn test_verify() {
        let group = test_group();
        let public = group.public();
        let witness = Integer::from(987654321);
        let commitment = public.exponentiate(&witness, &Integer::from(13));

        let proof = MembershipProof::new(witness.clone(), 13.into());
        assert!(verify_membership(public, &commitment, &proof));

        let wrong_element = MembershipProof::new(witness.clone(), 17.into());
        assert!(!verify_membership(public, &commitment, &wrong_element));

        let wrong_commitment = Integer::from(&commitment + 1u8);
        assert!(!verify_membership(public, &wrong_commitment, &proof));
    }

    #[test]
    fn test_malformed_proofs_rejected() {
        let group = test_group();
        let public = group.public();
        let commitment = public.generator().clone();

        // 1^0 and 0^x tricks
        for proof in [
            MembershipProof::new(1.into(), 0.into()),
            MembershipProof::new(commitment.clone(), Integer::from(-1)),
            MembershipProof::new(0.into(), 5.into()),
            MembershipProof::new(public.modulus().clone(), 5.into()),
            MembershipProof::new(Integer::from(public.modulus() + 1u8), 1.into()),
            MembershipProof::new(commitment.clone(), 1.into()),
        ] {
            assert!(!verify_membership(public, &commitment, &proof), "{proof:?}");
        }
        assert!(!verify_membership(
            public,
            &Integer::new(),
            &MembershipProof::new(1.into(), 1.into())
        ));
    }

    #[test]
    fn test_serialization_is_lossless() {
        let group = test_group();
        let witness = group.exponentiate(group.generator(), &(Integer::from(1) << 600u32));
        let proof = MembershipProof::new(witness, (Integer::from(1) << 300u32) + 1u8);
        let json = serde_json::to_string(&proof).unwrap();
        let decoded: MembershipProof = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, proof);
        assert!(proof.size().get::<byte>() > 0);
    }
}
