//! Adjudication desk
//!
//! The desk owns both subsystems, the claims processor and the verification
//! engine, and exposes the complete operation surface. It is the one place
//! where a verification outcome is handed to the lifecycle, either when the
//! administrator asks for it or, with `auto_apply_resolution`, as soon as the
//! deciding vote lands.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut desk = AdjudicationDesk::new(access, DeskSettings::default(), clock, pool.clone(), pool);
//! let claim_id = desk.submit_claim(&alice, policy_id, amount, "Hail damage", evidence)?;
//! desk.update_claim_status(&admin, claim_id, ClaimStatus::UnderReview)?;
//! desk.initialize_claim_verification(&admin, claim_id, 2)?;
//! desk.verify_claim(&bob, claim_id, true)?;
//! desk.verify_claim(&carol, claim_id, true)?;
//! desk.process_verified_claim(&admin, claim_id)?;
//! desk.pay_claim(&admin, claim_id)?;
//! ```

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{
    AccessPolicy, ClaimId, EvidenceHash, LogicalClock, Money, Operation, PayoutPort, PolicyId,
    Principal, SubscriptionLookup,
};
use domain_verification::{
    VerificationEngine, VerificationError, VerificationRecord, VerificationSettings,
    VerificationStatus, DEFAULT_MAX_VOTES,
};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::lifecycle::{ClaimSettings, ClaimsProcessor, DEFAULT_MAX_DESCRIPTION_LEN};
use crate::payment::PayoutRecord;

/// Desk configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeskSettings {
    /// Maximum claim description length, in characters
    pub max_description_len: usize,
    /// Maximum number of votes per verification session
    pub max_votes: u32,
    /// Apply a verification outcome to the claim as soon as it resolves
    pub auto_apply_resolution: bool,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
            max_votes: DEFAULT_MAX_VOTES,
            auto_apply_resolution: false,
        }
    }
}

/// Serialized entry point for every claims operation
pub struct AdjudicationDesk {
    access: AccessPolicy,
    claims: ClaimsProcessor,
    verification: VerificationEngine,
    auto_apply_resolution: bool,
}

impl AdjudicationDesk {
    pub fn new(
        access: AccessPolicy,
        settings: DeskSettings,
        clock: LogicalClock,
        subscriptions: Arc<dyn SubscriptionLookup>,
        payouts: Arc<dyn PayoutPort>,
    ) -> Self {
        let claims = ClaimsProcessor::new(
            access.clone(),
            ClaimSettings {
                max_description_len: settings.max_description_len,
            },
            clock,
            subscriptions,
            payouts,
        );
        let verification = VerificationEngine::new(
            access.clone(),
            VerificationSettings {
                max_votes: settings.max_votes,
            },
        );

        Self {
            access,
            claims,
            verification,
            auto_apply_resolution: settings.auto_apply_resolution,
        }
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    pub fn claims(&self) -> &ClaimsProcessor {
        &self.claims
    }

    pub fn verification(&self) -> &VerificationEngine {
        &self.verification
    }

    pub fn submit_claim(
        &mut self,
        claimant: &Principal,
        policy_id: PolicyId,
        amount: Money,
        description: impl Into<String>,
        evidence_hash: EvidenceHash,
    ) -> Result<ClaimId, ClaimError> {
        self.claims
            .submit_claim(claimant, policy_id, amount, description, evidence_hash)
    }

    pub fn update_claim_status(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        new_status: ClaimStatus,
    ) -> Result<(), ClaimError> {
        self.claims.update_claim_status(caller, claim_id, new_status)
    }

    /// Opens peer verification for a claim that is still under consideration
    pub fn initialize_claim_verification(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        required_threshold: u32,
    ) -> Result<(), ClaimError> {
        self.access
            .authorize(caller, Operation::InitializeVerification, None)?;

        let claim = self.claims.get_claim(claim_id)?;
        if !matches!(claim.status(), ClaimStatus::Submitted | ClaimStatus::UnderReview) {
            return Err(ClaimError::InvalidStatusTransition {
                from: claim.status(),
                to: ClaimStatus::UnderReview,
            });
        }
        let claimant = claim.claimant().clone();

        self.verification
            .initialize_claim_verification(caller, claim_id, claimant, required_threshold)?;
        Ok(())
    }

    /// Casts a verifier's vote and returns the session status after it
    ///
    /// Votes are refused once the claim has left review, even while the
    /// session is still pending. With `auto_apply_resolution`, the deciding
    /// vote also moves the claim.
    pub fn verify_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        approve: bool,
    ) -> Result<VerificationStatus, ClaimError> {
        if self.verification.get_verification(claim_id).is_some() {
            let current = self.claims.get_claim(claim_id)?.status();
            if !matches!(current, ClaimStatus::Submitted | ClaimStatus::UnderReview) {
                return Err(ClaimError::InvalidStatusTransition {
                    from: current,
                    to: if approve { ClaimStatus::Approved } else { ClaimStatus::Rejected },
                });
            }
        }

        let status = self.verification.verify_claim(caller, claim_id, approve)?;

        if status.is_resolved() && self.auto_apply_resolution {
            match self.claims.apply_verification_outcome(claim_id, status) {
                Ok(applied) => {
                    info!(claim_id = %claim_id, status = ?applied, "Resolution applied automatically")
                }
                Err(e) => {
                    warn!(claim_id = %claim_id, error = %e, "Resolution not applied automatically")
                }
            }
        }
        Ok(status)
    }

    pub fn process_verified_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
    ) -> Result<ClaimStatus, ClaimError> {
        self.claims
            .process_verified_claim(caller, claim_id, &self.verification)
    }

    pub fn pay_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
    ) -> Result<PayoutRecord, ClaimError> {
        self.claims.pay_claim(caller, claim_id)
    }

    pub fn get_claim(&self, claim_id: ClaimId) -> Result<&Claim, ClaimError> {
        self.claims.get_claim(claim_id)
    }

    pub fn get_verification_status(
        &self,
        claim_id: ClaimId,
    ) -> Result<VerificationStatus, ClaimError> {
        Ok(self.verification.get_verification_status(claim_id)?)
    }

    pub fn get_verification(&self, claim_id: ClaimId) -> Result<&VerificationRecord, ClaimError> {
        self.verification
            .get_verification(claim_id)
            .ok_or(ClaimError::Verification(VerificationError::NotFound(claim_id)))
    }

    pub fn payouts(&self) -> &[PayoutRecord] {
        self.claims.payouts()
    }
}
