//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use core_kernel::{EvidenceHash, Money, Principal};
use domain_claims::ClaimStatus;
use proptest::prelude::*;

/// Strategy for generating valid positive claim amounts
pub fn positive_money_strategy() -> impl Strategy<Value = Money> {
    (1u64..1_000_000_000u64).prop_map(Money::from_minor)
}

/// Strategy for generating caller principals
pub fn principal_strategy() -> impl Strategy<Value = Principal> {
    "[A-Z0-9]{8,16}".prop_map(Principal::new)
}

/// Strategy for generating non-empty descriptions within `max_len` characters
pub fn description_strategy(max_len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(proptest::char::range('a', 'z'), 1..=max_len.max(1))
        .prop_map(|chars| chars.into_iter().collect())
}

/// Strategy for generating evidence hashes
pub fn evidence_strategy() -> impl Strategy<Value = EvidenceHash> {
    any::<[u8; 32]>().prop_map(EvidenceHash::from_bytes)
}

/// Strategy for generating a sequence of votes (true = approve)
pub fn votes_strategy(max_votes: usize) -> impl Strategy<Value = Vec<bool>> {
    proptest::collection::vec(any::<bool>(), 0..=max_votes)
}

/// Strategy for generating claim statuses
pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Submitted),
        Just(ClaimStatus::UnderReview),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
        Just(ClaimStatus::Paid),
    ]
}
