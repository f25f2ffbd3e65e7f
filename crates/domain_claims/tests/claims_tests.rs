//! Comprehensive tests for domain_claims

use std::sync::Arc;

use core_kernel::{
    AccessPolicy, ClaimId, ErrorCode, EvidenceHash, LogicalClock, Money, PolicyId, Principal,
};
use domain_billing::{PolicyTerms, PremiumPool};
use domain_verification::VerificationStatus;

use domain_claims::{AdjudicationDesk, ClaimError, ClaimStatus, DeskSettings};

const EVIDENCE: &str = "0x1234567890abcdef1234567890abcdef1234567890abcdef1234567890abcdef";

fn admin() -> Principal {
    Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")
}

fn claimant() -> Principal {
    Principal::new("ST2PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM")
}

fn verifier(n: u32) -> Principal {
    Principal::new(format!("verifier-{}", n))
}

fn policy() -> PolicyId {
    PolicyId::new(1)
}

/// A desk whose claimant holds an active subscription and whose pool can
/// cover `funding` in payouts on top of collected premiums
struct Harness {
    desk: AdjudicationDesk,
    pool: Arc<PremiumPool>,
}

fn harness_with(settings: DeskSettings, funding: u64) -> Harness {
    let clock = LogicalClock::new();
    let pool = Arc::new(PremiumPool::new(clock.clone()));
    pool.register_policy(policy(), PolicyTerms::new(Money::from_minor(5000), 10_000))
        .unwrap();
    pool.subscribe(&claimant(), policy()).unwrap();
    if funding > 0 {
        pool.fund(Money::from_minor(funding)).unwrap();
    }

    let desk = AdjudicationDesk::new(
        AccessPolicy::new(admin()),
        settings,
        clock,
        pool.clone(),
        pool.clone(),
    );
    Harness { desk, pool }
}

fn harness() -> Harness {
    harness_with(DeskSettings::default(), 1_000_000)
}

fn submit(desk: &mut AdjudicationDesk) -> ClaimId {
    desk.submit_claim(
        &claimant(),
        policy(),
        Money::from_minor(50_000),
        "Crop damage due to drought",
        EVIDENCE.parse().unwrap(),
    )
    .unwrap()
}

/// Drives a claim to Approved through peer verification
fn approved_claim(desk: &mut AdjudicationDesk) -> ClaimId {
    let claim_id = submit(desk);
    desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
    desk.initialize_claim_verification(&admin(), claim_id, 2).unwrap();
    desk.verify_claim(&verifier(1), claim_id, true).unwrap();
    desk.verify_claim(&verifier(2), claim_id, true).unwrap();
    desk.process_verified_claim(&admin(), claim_id).unwrap();
    claim_id
}

// ============================================================================
// Submission Tests
// ============================================================================

mod submission_tests {
    use super::*;

    #[test]
    fn test_submit_claim() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);

        assert_eq!(claim_id, ClaimId::new(1));
        let claim = h.desk.get_claim(claim_id).unwrap();
        assert_eq!(claim.status(), ClaimStatus::Submitted);
        assert_eq!(claim.claimant(), &claimant());
        assert_eq!(claim.amount(), Money::from_minor(50_000));
        assert_eq!(claim.description(), "Crop damage due to drought");
        assert_eq!(claim.evidence_hash().to_hex(), EVIDENCE);
        assert_eq!(claim.created_at(), claim.updated_at());
    }

    #[test]
    fn test_ids_are_strictly_increasing() {
        let mut h = harness();
        let first = submit(&mut h.desk);
        let second = submit(&mut h.desk);
        assert!(second > first);
    }

    #[test]
    fn test_submit_without_subscription_fails_not_subscribed() {
        let mut h = harness();
        let stranger = Principal::new("uninsured");

        let result = h.desk.submit_claim(
            &stranger,
            policy(),
            Money::from_minor(100),
            "Flood",
            EvidenceHash::digest(b"flood.jpg"),
        );

        assert_eq!(result.unwrap_err().code(), ErrorCode::NotSubscribed);
        assert_eq!(h.desk.claims().claim_count(), 0);
        // The next successful submission still gets the first id
        assert_eq!(submit(&mut h.desk), ClaimId::new(1));
    }

    #[test]
    fn test_submit_against_unknown_policy_fails() {
        let mut h = harness();
        let result = h.desk.submit_claim(
            &claimant(),
            PolicyId::new(999),
            Money::from_minor(100),
            "Flood",
            EvidenceHash::digest(b"flood.jpg"),
        );
        assert_eq!(result, Err(ClaimError::PolicyNotFound(PolicyId::new(999))));
    }

    #[test]
    fn test_submit_with_cancelled_subscription_fails() {
        let mut h = harness();
        h.pool.cancel_subscription(&claimant(), policy()).unwrap();

        let result = h.desk.submit_claim(
            &claimant(),
            policy(),
            Money::from_minor(100),
            "Flood",
            EvidenceHash::digest(b"flood.jpg"),
        );
        assert!(matches!(result, Err(ClaimError::NotSubscribed { .. })));
    }

    #[test]
    fn test_submit_zero_amount_fails() {
        let mut h = harness();
        let result = h.desk.submit_claim(
            &claimant(),
            policy(),
            Money::zero(),
            "Flood",
            EvidenceHash::digest(b"flood.jpg"),
        );
        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidAmount);
    }

    #[test]
    fn test_submit_description_bounds() {
        let settings = DeskSettings {
            max_description_len: 10,
            ..DeskSettings::default()
        };
        let mut h = harness_with(settings, 0);
        let evidence = EvidenceHash::digest(b"e");

        let empty = h.desk.submit_claim(&claimant(), policy(), Money::from_minor(1), "   ", evidence);
        assert_eq!(empty.unwrap_err().code(), ErrorCode::InvalidDescription);

        let long = h.desk.submit_claim(&claimant(), policy(), Money::from_minor(1), "x".repeat(11), evidence);
        assert_eq!(long.unwrap_err().code(), ErrorCode::InvalidDescription);

        let exact = h.desk.submit_claim(&claimant(), policy(), Money::from_minor(1), "x".repeat(10), evidence);
        assert!(exact.is_ok());
    }

    #[test]
    fn test_claim_serialization() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);

        let json = serde_json::to_value(h.desk.get_claim(claim_id).unwrap()).unwrap();

        assert_eq!(json["id"], 1);
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["amount"], 50_000);
        assert_eq!(json["evidence_hash"], EVIDENCE);
    }

    #[test]
    fn test_get_unknown_claim() {
        let h = harness();
        assert_eq!(
            h.desk.get_claim(ClaimId::new(5)).unwrap_err(),
            ClaimError::ClaimNotFound(ClaimId::new(5))
        );
    }

    #[test]
    fn test_claims_by_claimant() {
        let mut h = harness();
        submit(&mut h.desk);
        submit(&mut h.desk);
        assert_eq!(h.desk.claims().claims_by_claimant(&claimant()).len(), 2);
        assert!(h.desk.claims().claims_by_claimant(&admin()).is_empty());
    }
}

// ============================================================================
// Status Transition Tests
// ============================================================================

mod status_tests {
    use super::*;

    #[test]
    fn test_update_claim_status_to_under_review() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        let before = h.desk.get_claim(claim_id).unwrap().updated_at();

        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();

        let claim = h.desk.get_claim(claim_id).unwrap();
        assert_eq!(claim.status(), ClaimStatus::UnderReview);
        assert!(claim.updated_at() > before);
        assert!(claim.updated_at() >= claim.created_at());
    }

    #[test]
    fn test_non_admin_update_fails_unauthorized() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);

        let result = h.desk.update_claim_status(&claimant(), claim_id, ClaimStatus::Approved);

        assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Submitted);
    }

    #[test]
    fn test_authorization_precedes_lookup() {
        let mut h = harness();
        let result = h.desk.update_claim_status(&claimant(), ClaimId::new(77), ClaimStatus::UnderReview);
        assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_update_unknown_claim() {
        let mut h = harness();
        let result = h.desk.update_claim_status(&admin(), ClaimId::new(77), ClaimStatus::UnderReview);
        assert_eq!(result, Err(ClaimError::ClaimNotFound(ClaimId::new(77))));
    }

    #[test]
    fn test_skipping_review_is_invalid() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);

        for target in [ClaimStatus::Approved, ClaimStatus::Rejected, ClaimStatus::Paid, ClaimStatus::Submitted] {
            let result = h.desk.update_claim_status(&admin(), claim_id, target);
            assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        }
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Submitted);
    }

    #[test]
    fn test_admin_can_decide_from_review() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();

        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::Rejected).unwrap();

        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Rejected);
        let reopen = h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview);
        assert!(matches!(reopen, Err(ClaimError::InvalidStatusTransition { from: ClaimStatus::Rejected, .. })));
    }

    #[test]
    fn test_paid_is_not_reachable_through_status_update() {
        let mut h = harness();
        let claim_id = approved_claim(&mut h.desk);

        let result = h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::Paid);

        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        assert!(h.desk.payouts().is_empty());
    }
}

// ============================================================================
// Verification Coupling Tests
// ============================================================================

mod verification_tests {
    use super::*;

    #[test]
    fn test_process_verified_claim_approved() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.initialize_claim_verification(&admin(), claim_id, 3).unwrap();

        assert_eq!(h.desk.verify_claim(&verifier(1), claim_id, true), Ok(VerificationStatus::Pending));
        assert_eq!(h.desk.verify_claim(&verifier(2), claim_id, true), Ok(VerificationStatus::Pending));
        assert_eq!(h.desk.verify_claim(&verifier(3), claim_id, true), Ok(VerificationStatus::Approved));

        let status = h.desk.process_verified_claim(&admin(), claim_id).unwrap();
        assert_eq!(status, ClaimStatus::Approved);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Approved);
    }

    #[test]
    fn test_process_verified_claim_rejected() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.initialize_claim_verification(&admin(), claim_id, 1).unwrap();
        h.desk.verify_claim(&verifier(1), claim_id, false).unwrap();

        assert_eq!(h.desk.process_verified_claim(&admin(), claim_id), Ok(ClaimStatus::Rejected));
    }

    #[test]
    fn test_process_from_submitted_passes_through_review() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.initialize_claim_verification(&admin(), claim_id, 1).unwrap();
        h.desk.verify_claim(&verifier(1), claim_id, true).unwrap();

        assert_eq!(h.desk.process_verified_claim(&admin(), claim_id), Ok(ClaimStatus::Approved));
    }

    #[test]
    fn test_process_pending_verification_fails() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.initialize_claim_verification(&admin(), claim_id, 2).unwrap();
        h.desk.verify_claim(&verifier(1), claim_id, true).unwrap();

        let result = h.desk.process_verified_claim(&admin(), claim_id);

        assert_eq!(result, Err(ClaimError::VerificationUnresolved(claim_id)));
        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Submitted);
    }

    #[test]
    fn test_process_without_session_fails() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        let result = h.desk.process_verified_claim(&admin(), claim_id);
        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_process_unknown_claim() {
        let mut h = harness();
        let result = h.desk.process_verified_claim(&admin(), ClaimId::new(3));
        assert_eq!(result, Err(ClaimError::ClaimNotFound(ClaimId::new(3))));
    }

    #[test]
    fn test_process_twice_fails() {
        let mut h = harness();
        let claim_id = approved_claim(&mut h.desk);
        let again = h.desk.process_verified_claim(&admin(), claim_id);
        assert_eq!(again.unwrap_err().code(), ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_non_admin_cannot_process() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        let result = h.desk.process_verified_claim(&verifier(1), claim_id);
        assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
    }

    #[test]
    fn test_initialize_requires_existing_open_claim() {
        let mut h = harness();
        let missing = h.desk.initialize_claim_verification(&admin(), ClaimId::new(9), 2);
        assert_eq!(missing, Err(ClaimError::ClaimNotFound(ClaimId::new(9))));

        let claim_id = approved_claim(&mut h.desk);
        let closed = h.desk.initialize_claim_verification(&admin(), claim_id, 2);
        assert_eq!(closed.unwrap_err().code(), ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_initialize_twice_fails_already_initialized() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.initialize_claim_verification(&admin(), claim_id, 2).unwrap();

        let again = h.desk.initialize_claim_verification(&admin(), claim_id, 2);
        assert_eq!(again.unwrap_err().code(), ErrorCode::AlreadyInitialized);
    }

    #[test]
    fn test_claimant_cannot_vote_on_own_claim() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.initialize_claim_verification(&admin(), claim_id, 1).unwrap();

        let result = h.desk.verify_claim(&claimant(), claim_id, true);

        assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
        assert_eq!(h.desk.get_verification_status(claim_id), Ok(VerificationStatus::Pending));
    }

    #[test]
    fn test_double_vote_through_desk() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.initialize_claim_verification(&admin(), claim_id, 3).unwrap();
        h.desk.verify_claim(&verifier(1), claim_id, true).unwrap();

        let again = h.desk.verify_claim(&verifier(1), claim_id, true);

        assert_eq!(again.unwrap_err().code(), ErrorCode::AlreadyVerified);
        assert_eq!(h.desk.get_verification(claim_id).unwrap().tally().approve, 1);
    }

    #[test]
    fn test_get_verification_status_not_found() {
        let h = harness();
        let result = h.desk.get_verification_status(ClaimId::new(1));
        assert_eq!(result.unwrap_err().code(), ErrorCode::NotFound);
    }

    #[test]
    fn test_auto_apply_resolution() {
        let settings = DeskSettings {
            auto_apply_resolution: true,
            ..DeskSettings::default()
        };
        let mut h = harness_with(settings, 0);
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.initialize_claim_verification(&admin(), claim_id, 2).unwrap();

        h.desk.verify_claim(&verifier(1), claim_id, false).unwrap();
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::UnderReview);

        h.desk.verify_claim(&verifier(2), claim_id, false).unwrap();
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Rejected);
    }

    #[test]
    fn test_vote_refused_once_claim_leaves_review() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.initialize_claim_verification(&admin(), claim_id, 1).unwrap();
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::Approved).unwrap();
        h.desk.pay_claim(&admin(), claim_id).unwrap();

        let result = h.desk.verify_claim(&verifier(1), claim_id, false);

        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Paid);
        assert_eq!(
            h.desk.get_verification_status(claim_id).unwrap(),
            VerificationStatus::Pending
        );
        assert_eq!(h.desk.get_verification(claim_id).unwrap().tally().total(), 0);
    }

    #[test]
    fn test_vote_refused_on_rejected_claim_with_auto_apply() {
        let settings = DeskSettings {
            auto_apply_resolution: true,
            ..DeskSettings::default()
        };
        let mut h = harness_with(settings, 0);
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.initialize_claim_verification(&admin(), claim_id, 1).unwrap();
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::Rejected).unwrap();

        let result = h.desk.verify_claim(&verifier(1), claim_id, true);

        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Rejected);
    }
}

// ============================================================================
// Payment Tests
// ============================================================================

mod payment_tests {
    use super::*;

    #[test]
    fn test_pay_submitted_claim_fails_invalid_status() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);

        let result = h.desk.pay_claim(&admin(), claim_id);

        assert_eq!(result.unwrap_err().code(), ErrorCode::InvalidStatus);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Submitted);
    }

    #[test]
    fn test_pay_approved_claim_once() {
        let mut h = harness();
        let claim_id = approved_claim(&mut h.desk);
        let balance_before = h.pool.balance();

        let payout = h.desk.pay_claim(&admin(), claim_id).unwrap();

        assert_eq!(payout.claim_id, claim_id);
        assert_eq!(payout.payee, claimant());
        assert_eq!(payout.amount, Money::from_minor(50_000));
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Paid);
        assert_eq!(
            h.pool.balance(),
            balance_before.checked_sub(Money::from_minor(50_000)).unwrap()
        );

        let second = h.desk.pay_claim(&admin(), claim_id);
        assert!(matches!(
            second,
            Err(ClaimError::InvalidStatusTransition { from: ClaimStatus::Paid, to: ClaimStatus::Paid })
        ));
        assert_eq!(h.desk.payouts().len(), 1);
    }

    #[test]
    fn test_pay_rejected_claim_fails() {
        let mut h = harness();
        let claim_id = submit(&mut h.desk);
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::UnderReview).unwrap();
        h.desk.update_claim_status(&admin(), claim_id, ClaimStatus::Rejected).unwrap();

        assert_eq!(h.desk.pay_claim(&admin(), claim_id).unwrap_err().code(), ErrorCode::InvalidStatus);
    }

    #[test]
    fn test_non_admin_cannot_pay() {
        let mut h = harness();
        let claim_id = approved_claim(&mut h.desk);

        let result = h.desk.pay_claim(&claimant(), claim_id);

        assert_eq!(result.unwrap_err().code(), ErrorCode::Unauthorized);
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Approved);
    }

    #[test]
    fn test_failed_payout_rolls_back_to_approved() {
        // Only the 5000 premium is in the pool; the claim is for 50000
        let mut h = harness_with(DeskSettings::default(), 0);
        let claim_id = approved_claim(&mut h.desk);
        let approved = h.desk.get_claim(claim_id).unwrap().clone();

        let result = h.desk.pay_claim(&admin(), claim_id);

        assert_eq!(result.unwrap_err().code(), ErrorCode::PayoutFailed);
        assert_eq!(h.desk.get_claim(claim_id).unwrap(), &approved);
        assert!(h.desk.payouts().is_empty());
        assert_eq!(h.pool.balance(), Money::from_minor(5000));

        // Once the pool is funded the same claim pays out
        h.pool.fund(Money::from_minor(100_000)).unwrap();
        assert!(h.desk.pay_claim(&admin(), claim_id).is_ok());
        assert_eq!(h.desk.get_claim(claim_id).unwrap().status(), ClaimStatus::Paid);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn status_strategy() -> impl Strategy<Value = ClaimStatus> {
        prop_oneof![
            Just(ClaimStatus::Submitted),
            Just(ClaimStatus::UnderReview),
            Just(ClaimStatus::Approved),
            Just(ClaimStatus::Rejected),
            Just(ClaimStatus::Paid),
        ]
    }

    proptest! {
        /// Status only ever moves along lifecycle edges, and failed attempts change nothing
        #[test]
        fn status_moves_only_forward(
            attempts in proptest::collection::vec(status_strategy(), 1..12)
        ) {
            let mut h = harness();
            let claim_id = submit(&mut h.desk);

            for target in attempts {
                let before = h.desk.get_claim(claim_id).unwrap().clone();
                match h.desk.update_claim_status(&admin(), claim_id, target) {
                    Ok(()) => {
                        let after = h.desk.get_claim(claim_id).unwrap();
                        prop_assert!(before.status().can_transition_to(after.status()));
                        prop_assert!(after.updated_at() > before.updated_at());
                    }
                    Err(e) => {
                        prop_assert_eq!(e.code(), ErrorCode::InvalidStatus);
                        prop_assert_eq!(h.desk.get_claim(claim_id).unwrap(), &before);
                    }
                }
            }
        }

        /// pay_claim succeeds at most once per claim
        #[test]
        fn payment_is_single_fire(attempts in 1usize..6) {
            let mut h = harness();
            let claim_id = approved_claim(&mut h.desk);

            let successes = (0..attempts)
                .filter(|_| h.desk.pay_claim(&admin(), claim_id).is_ok())
                .count();

            prop_assert_eq!(successes, 1);
            prop_assert_eq!(h.desk.payouts().len(), 1);
        }
    }
}
