//! Claim registry
//!
//! The registry allocates claim identifiers and indexes claims by id. It is
//! the only place a [`Claim`] is created.

use std::collections::BTreeMap;

use core_kernel::{ClaimId, Principal, Timestamp};

use crate::claim::{Claim, NewClaim};

/// Strictly increasing claim id source
///
/// Ids start at 1 and are never reused; the counter itself is not exposed.
#[derive(Debug, Default)]
pub struct ClaimSequence {
    last: u64,
}

impl ClaimSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id
    pub fn next_id(&mut self) -> ClaimId {
        self.last += 1;
        ClaimId::new(self.last)
    }
}

/// Id allocation and lookup for claims
#[derive(Debug, Default)]
pub struct ClaimRegistry {
    sequence: ClaimSequence,
    claims: BTreeMap<ClaimId, Claim>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a claim in `Submitted` status under a fresh id
    pub(crate) fn create(&mut self, new: NewClaim, at: Timestamp) -> &Claim {
        let id = self.sequence.next_id();
        self.claims
            .entry(id)
            .or_insert_with(|| Claim::submitted(id, new, at))
    }

    /// Replaces a claim record wholesale, returning the previous record
    pub(crate) fn replace(&mut self, claim: Claim) -> Option<Claim> {
        self.claims.insert(claim.id(), claim)
    }

    pub fn get(&self, id: ClaimId) -> Option<&Claim> {
        self.claims.get(&id)
    }

    pub fn contains(&self, id: ClaimId) -> bool {
        self.claims.contains_key(&id)
    }

    /// Iterates claims in id order
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    /// Claims filed by `claimant`, in id order
    pub fn by_claimant<'a>(&'a self, claimant: &'a Principal) -> impl Iterator<Item = &'a Claim> + 'a {
        self.claims.values().filter(move |c| c.claimant() == claimant)
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::{EvidenceHash, Money, PolicyId};

    fn new_claim(claimant: &str) -> NewClaim {
        NewClaim {
            claimant: Principal::new(claimant),
            policy_id: PolicyId::new(1),
            amount: Money::from_minor(50_000),
            description: "Crop damage due to drought".to_string(),
            evidence_hash: EvidenceHash::digest(b"evidence"),
        }
    }

    #[test]
    fn test_sequence_starts_at_one_and_increases() {
        let mut seq = ClaimSequence::new();
        assert_eq!(seq.next_id(), ClaimId::new(1));
        assert_eq!(seq.next_id(), ClaimId::new(2));
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let mut registry = ClaimRegistry::new();
        let first = registry.create(new_claim("alice"), Timestamp::new(1)).id();
        let second = registry.create(new_claim("bob"), Timestamp::new(2)).id();

        assert!(second > first);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.by_claimant(&Principal::new("bob")).count(), 1);
    }
}
