use std::collections::{HashMap, HashSet};

use log::{debug, warn};
use rayon::prelude::*;
use rug::Integer;

use super::{Accumulator, Error, MembershipProof};
use crate::primitives::{Exponent, ModulusProvider, TrapdoorGroup};

/// An accumulator run by the holder of the group trapdoor.
///
/// Knowing the order lets us take `x`-th roots directly, so deleting and
/// proving are a single exponentiation each, independent of the set size.
///
/// Invariant: `value == g^(product of members)`.
#[derive(Debug)]
pub struct TrapdoorAccumulator<G> {
    group: G,
    value: Integer,
    members: HashSet<Integer>,
}

impl<G: TrapdoorGroup> TrapdoorAccumulator<G> {
    /// An empty accumulator; its value is the generator.
    pub fn new(group: G) -> Self {
        let value = group.generator().clone();
        Self {
            group,
            value,
            members: HashSet::new(),
        }
    }

    pub fn setup<P>(provider: &mut P) -> Result<Self, Error>
    where
        P: ModulusProvider<Group = G>,
    {
        Ok(Self::new(provider.provide()?))
    }

    /// Accumulate many members at once.
    ///
    /// One exponentiation in total: the exponent is reduced mod the order as we go.
    pub fn import<I>(group: G, members: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = Integer>,
    {
        let mut set = HashSet::new();
        let mut exponent = Integer::from(1u8);
        for member in members {
            check_element(&group, &member)?;
            exponent *= &member;
            exponent = group.reduce_exponent(&exponent);
            if !set.insert(member.clone()) {
                return Err(Error::DuplicateMember(member));
            }
        }
        let value = group.exponentiate(group.generator(), &exponent);
        debug!("imported {} members", set.len());
        Ok(Self {
            group,
            value,
            members: set,
        })
    }

    /// The value of the empty accumulator.
    pub fn generator(&self) -> &Integer {
        self.group.generator()
    }

    pub fn members(&self) -> impl Iterator<Item = &Integer> {
        self.members.iter()
    }

    /// Membership proofs for every current member against the current value.
    pub fn prove_all(&self) -> Result<HashMap<Integer, MembershipProof>, Error> {
        self.members
            .par_iter()
            .map(|member| {
                self.prove_membership(member)
                    .map(|proof| (member.clone(), proof))
            })
            .collect()
    }

    fn root(&self, element: &Integer) -> Result<Integer, Error> {
        self.group.root(&self.value, element).map_err(|err| {
            warn!("{err}; this may be a factor of the group order");
            Error::from(err)
        })
    }
}

/// Elements must be greater than one and invertible mod the order, or we could
/// never delete them again.
fn check_element<G: TrapdoorGroup>(group: &G, element: &Integer) -> Result<(), Error> {
    Exponent::try_from(element)?;
    group.invert_exponent(element).map_err(|err| {
        warn!("rejecting {err}");
        Error::from(err)
    })?;
    Ok(())
}

impl<G: TrapdoorGroup> Accumulator for TrapdoorAccumulator<G> {
    type Public = G::Public;

    fn public_parameters(&self) -> &G::Public {
        self.group.public()
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
        if self.members.contains(&element) {
            return Err(Error::DuplicateMember(element));
        }
        check_element(&self.group, &element)?;
        self.value = self.group.exponentiate(&self.value, &element);
        debug!("added {element} ({} members)", self.members.len() + 1);
        self.members.insert(element);
        Ok(self.value.clone())
    }

    fn delete(&mut self, element: &Integer) -> Result<Integer, Error> {
        if !self.members.contains(element) {
            debug!("{element} is not a member; nothing to delete");
            return Ok(self.value.clone());
        }
        self.value = self.root(element)?;
        self.members.remove(element);
        debug!("deleted {element} ({} members)", self.members.len());
        Ok(self.value.clone())
    }

    fn prove_membership(&self, element: &Integer) -> Result<MembershipProof, Error> {
        if !self.members.contains(element) {
            return Err(Error::NotAMember(element.clone()));
        }
        let witness = self.root(element)?;
        Ok(MembershipProof::new(witness, element.clone()))
    }
}
