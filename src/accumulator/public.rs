use std::collections::HashSet;

use log::debug;
use rug::Integer;

use super::{Accumulator, Error, MembershipProof};
use crate::primitives::{Exponent, HiddenOrderGroup, RsaGroup};

/// An accumulator that works without the trapdoor.
///
/// Without the order we can't take roots, so deleting and proving rebuild
/// from the generator: `g^(product of the other members)`. O(n) per call.
#[derive(Debug, Clone)]
pub struct PublicAccumulator<G> {
    group: G,
    value: Integer,
    members: HashSet<Integer>,
}

impl Default for PublicAccumulator<RsaGroup> {
    fn default() -> Self {
        Self::new(RsaGroup::rsa2048())
    }
}

impl<G: HiddenOrderGroup + Clone> PublicAccumulator<G> {
    pub fn new(group: G) -> Self {
        let value = group.generator().clone();
        Self {
            group,
            value,
            members: HashSet::new(),
        }
    }

    pub fn members(&self) -> impl Iterator<Item = &Integer> {
        self.members.iter()
    }

    fn accumulate_except(&self, skip: &Integer) -> Integer {
        let mut exponent = Integer::from(1u8);
        for member in self.members.iter().filter(|&member| member != skip) {
            exponent *= member;
        }
        self.group.exponentiate(self.group.generator(), &exponent)
    }
}

impl<G: HiddenOrderGroup + Clone> Accumulator for PublicAccumulator<G> {
    type Public = G;

    fn public_parameters(&self) -> &G {
        &self.group
    }

    fn value(&self) -> &Integer {
        &self.value
    }

    fn size(&self) -> usize {
        self.members.len()
    }

    fn contains(&self, element: &Integer) -> bool {
        self.members.contains(element)
    }

    fn add(&mut self, element: Integer) -> Result<Integer, Error> {
        Exponent::try_from(&element)?;
        if self.members.contains(&element) {
            return Err(Error::DuplicateMember(element));
        }
        self.value = self.group.exponentiate(&self.value, &element);
        debug!("added {element} ({} members)", self.members.len() + 1);
        self.members.insert(element);
        Ok(self.value.clone())
    }

    fn delete(&mut self, element: &Integer) -> Result<Integer, Error> {
        if !self.members.contains(element) {
            return Ok(self.value.clone());
        }
        self.value = self.accumulate_except(element);
        self.members.remove(element);
        debug!("deleted {element} ({} members)", self.members.len());
        Ok(self.value.clone())
    }

    fn prove_membership(&self, element: &Integer) -> Result<MembershipProof, Error> {
        if !self.members.contains(element) {
            return Err(Error::NotAMember(element.clone()));
        }
        Ok(MembershipProof::new(
            self.accumulate_except(element),
            element.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::trapdoor::tests::{element, init, Op};
    use crate::accumulator::TrapdoorAccumulator;
    use crate::primitives::{test_group, TrapdoorGroup};
    use proptest::prelude::*;

    #[test]
    fn test_rsa2048() {
        init();
        let mut acc = PublicAccumulator::default();
        let g = acc.public_parameters().generator().clone();

        let c1 = acc.add(7.into()).unwrap();
        let proof = acc.prove_membership(&7.into()).unwrap();
        assert_eq!(proof.witness, g);
        assert!(acc.verify_membership(&c1, &proof));

        let c2 = acc.add(11.into()).unwrap();
        assert!(!acc.verify_membership(&c2, &proof));
        let refreshed = acc.prove_membership(&7.into()).unwrap();
        assert!(acc.verify_membership(&c2, &refreshed));

        let c3 = acc.delete(&7.into()).unwrap();
        assert!(!acc.verify_membership(&c3, &refreshed));
        assert_eq!(acc.delete(&7.into()).unwrap(), c3);
        assert_eq!(acc.size(), 1);
        assert_eq!(
            acc.prove_membership(&7.into()),
            Err(Error::NotAMember(7.into()))
        );
    }

    #[test]
    fn test_even_elements_allowed() {
        // Nothing to invert here, so only positivity is checked.
        let mut acc = PublicAccumulator::new(test_group().public().clone());
        acc.add(8.into()).unwrap();
        assert_eq!(acc.add(8.into()), Err(Error::DuplicateMember(8.into())));
        assert!(matches!(acc.add(0.into()), Err(Error::InvalidElement(_))));
        assert!(matches!(acc.add(1.into()), Err(Error::InvalidElement(_))));
        assert_eq!(acc.size(), 1);
        acc.delete(&8.into()).unwrap();
        assert!(acc.is_empty());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        /// Both accumulators agree on the same group, with or without the trapdoor.
        #[test]
        fn test_matches_trapdoor(ops: Vec<Op>) {
            init();
            let group = test_group();
            let mut public = PublicAccumulator::new(group.public().clone());
            let mut trapdoor = TrapdoorAccumulator::new(group);
            for op in ops {
                match op {
                    Op::Add(i) => {
                        prop_assert_eq!(public.add(element(i)), trapdoor.add(element(i)));
                    }
                    Op::Delete(i) => {
                        prop_assert_eq!(public.delete(&element(i))?, trapdoor.delete(&element(i))?);
                    }
                    Op::Prove(i) => {
                        prop_assert_eq!(
                            public.prove_membership(&element(i)),
                            trapdoor.prove_membership(&element(i))
                        );
                    }
                }
                prop_assert_eq!(public.size(), trapdoor.size());
            }
        }
    }
}
