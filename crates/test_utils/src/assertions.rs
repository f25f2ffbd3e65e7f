//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use std::fmt::Debug;

use core_kernel::{ClaimId, ErrorCode};
use domain_claims::{AdjudicationDesk, ClaimError, ClaimStatus};
use domain_verification::VerificationRecord;

/// Asserts that a desk operation failed with the given error code
///
/// # Panics
///
/// Panics if the result is `Ok` or carries a different code
pub fn assert_error_code<T: Debug>(result: Result<T, ClaimError>, expected: ErrorCode) {
    match result {
        Ok(value) => panic!("Expected error code {}, got Ok({:?})", expected, value),
        Err(e) => assert_eq!(
            e.code(),
            expected,
            "Expected error code {}, got {} ({})",
            expected,
            e.code(),
            e
        ),
    }
}

/// Asserts the current status of a claim
pub fn assert_claim_status(desk: &AdjudicationDesk, claim_id: ClaimId, expected: ClaimStatus) {
    let claim = desk
        .get_claim(claim_id)
        .unwrap_or_else(|e| panic!("Claim {} should exist: {}", claim_id, e));
    assert_eq!(
        claim.status(),
        expected,
        "Claim {} status mismatch",
        claim_id
    );
}

/// Asserts a verification session's tally and the counting invariant
pub fn assert_tally(record: &VerificationRecord, approve: u32, reject: u32) {
    let tally = record.tally();
    assert_eq!(
        (tally.approve, tally.reject),
        (approve, reject),
        "Tally mismatch for claim {}",
        record.claim_id()
    );
    assert_eq!(
        tally.total() as usize,
        record.voters().count(),
        "Vote counts must equal the number of distinct voters"
    );
    assert!(
        tally.total() <= record.max_votes(),
        "Tally {} exceeds the vote cap {}",
        tally.total(),
        record.max_votes()
    );
}
