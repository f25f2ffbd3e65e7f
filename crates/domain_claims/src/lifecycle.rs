//! Claim lifecycle state machine
//!
//! [`ClaimsProcessor`] owns the claim registry and applies every transition.
//! Each operation authorizes the caller, validates against the current
//! record, and only then commits a replacement record, so a failed call
//! leaves no trace.

use std::sync::Arc;
use tracing::{info, warn};

use core_kernel::{
    AccessPolicy, ClaimId, EvidenceHash, LogicalClock, Money, Operation, PayoutPort, PolicyId,
    Principal, SubscriptionLookup,
};
use domain_verification::{VerificationEngine, VerificationStatus};

use crate::claim::{Claim, ClaimStatus, NewClaim};
use crate::error::ClaimError;
use crate::payment::PayoutRecord;
use crate::registry::ClaimRegistry;

/// Default maximum claim description length, in characters
pub const DEFAULT_MAX_DESCRIPTION_LEN: usize = 500;

/// Lifecycle configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClaimSettings {
    pub max_description_len: usize,
}

impl Default for ClaimSettings {
    fn default() -> Self {
        Self {
            max_description_len: DEFAULT_MAX_DESCRIPTION_LEN,
        }
    }
}

/// Source of resolved verification outcomes
///
/// Outcomes cross into the lifecycle by value.
pub trait VerificationSource {
    /// Returns the current verification status for a claim, if a session exists
    fn verification_status(&self, claim_id: ClaimId) -> Option<VerificationStatus>;
}

impl VerificationSource for VerificationEngine {
    fn verification_status(&self, claim_id: ClaimId) -> Option<VerificationStatus> {
        self.get_verification_status(claim_id).ok()
    }
}

/// Applies lifecycle transitions to claims
pub struct ClaimsProcessor {
    access: AccessPolicy,
    settings: ClaimSettings,
    clock: LogicalClock,
    registry: ClaimRegistry,
    subscriptions: Arc<dyn SubscriptionLookup>,
    payouts: Arc<dyn PayoutPort>,
    journal: Vec<PayoutRecord>,
}

impl ClaimsProcessor {
    pub fn new(
        access: AccessPolicy,
        settings: ClaimSettings,
        clock: LogicalClock,
        subscriptions: Arc<dyn SubscriptionLookup>,
        payouts: Arc<dyn PayoutPort>,
    ) -> Self {
        Self {
            access,
            settings,
            clock,
            registry: ClaimRegistry::new(),
            subscriptions,
            payouts,
            journal: Vec::new(),
        }
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    pub fn registry(&self) -> &ClaimRegistry {
        &self.registry
    }

    /// Files a new claim on behalf of `claimant`
    ///
    /// The claimant must hold an active subscription to the policy. No id is
    /// allocated unless every check passes.
    pub fn submit_claim(
        &mut self,
        claimant: &Principal,
        policy_id: PolicyId,
        amount: Money,
        description: impl Into<String>,
        evidence_hash: EvidenceHash,
    ) -> Result<ClaimId, ClaimError> {
        self.access.authorize(claimant, Operation::SubmitClaim, None)?;

        if !amount.is_positive() {
            return Err(ClaimError::InvalidAmount(
                "claim amount must be greater than zero".to_string(),
            ));
        }

        let description = description.into();
        self.validate_description(&description)?;

        if !self.subscriptions.policy_exists(policy_id) {
            return Err(ClaimError::PolicyNotFound(policy_id));
        }
        match self.subscriptions.get_subscription(claimant, policy_id) {
            Some(subscription) if subscription.active => {}
            _ => {
                return Err(ClaimError::NotSubscribed {
                    claimant: claimant.clone(),
                    policy_id,
                })
            }
        }

        let now = self.clock.tick();
        let claim_id = self
            .registry
            .create(
                NewClaim {
                    claimant: claimant.clone(),
                    policy_id,
                    amount,
                    description,
                    evidence_hash,
                },
                now,
            )
            .id();

        info!(
            claim_id = %claim_id,
            claimant = %claimant,
            policy_id = %policy_id,
            amount = %amount,
            "Claim submitted"
        );
        Ok(claim_id)
    }

    /// Moves a claim along one edge of the lifecycle graph
    ///
    /// Administrator only. `Paid` is reachable only through [`Self::pay_claim`].
    pub fn update_claim_status(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        new_status: ClaimStatus,
    ) -> Result<(), ClaimError> {
        self.access.authorize(caller, Operation::UpdateClaimStatus, None)?;

        let claim = self.claim(claim_id)?;
        let from = claim.status();
        if new_status == ClaimStatus::Paid || !from.can_transition_to(new_status) {
            return Err(ClaimError::InvalidStatusTransition { from, to: new_status });
        }

        let next = claim.with_status(new_status, self.clock.tick());
        self.registry.replace(next);

        info!(claim_id = %claim_id, ?from, to = ?new_status, "Claim status updated");
        Ok(())
    }

    /// Applies a resolved verification outcome to a claim
    ///
    /// Administrator only. A claim still in `Submitted` passes through
    /// `UnderReview` in the same step.
    pub fn process_verified_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        verification: &dyn VerificationSource,
    ) -> Result<ClaimStatus, ClaimError> {
        self.access.authorize(caller, Operation::ProcessVerifiedClaim, None)?;
        self.claim(claim_id)?;

        let outcome = verification
            .verification_status(claim_id)
            .ok_or(ClaimError::VerificationUnresolved(claim_id))?;
        self.apply_verification_outcome(claim_id, outcome)
    }

    /// Commits the claim status that corresponds to a verification outcome
    ///
    /// Callers are responsible for authorization.
    pub(crate) fn apply_verification_outcome(
        &mut self,
        claim_id: ClaimId,
        outcome: VerificationStatus,
    ) -> Result<ClaimStatus, ClaimError> {
        let target = match outcome {
            VerificationStatus::Approved => ClaimStatus::Approved,
            VerificationStatus::Rejected => ClaimStatus::Rejected,
            VerificationStatus::Pending => {
                return Err(ClaimError::VerificationUnresolved(claim_id))
            }
        };

        let claim = self.claim(claim_id)?;
        let from = claim.status();
        let reviewable = match from {
            ClaimStatus::Submitted => ClaimStatus::UnderReview.can_transition_to(target),
            other => other.can_transition_to(target),
        };
        if !reviewable {
            return Err(ClaimError::InvalidStatusTransition { from, to: target });
        }

        let next = claim.with_status(target, self.clock.tick());
        self.registry.replace(next);

        info!(claim_id = %claim_id, ?from, to = ?target, "Verification outcome applied");
        Ok(target)
    }

    /// Pays an approved claim
    ///
    /// Administrator only, and single-fire: a paid claim cannot be paid
    /// again. The `Paid` transition commits before the transfer is requested;
    /// if the transfer fails the claim is restored to its approved record and
    /// the call fails, so payment can be retried.
    pub fn pay_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
    ) -> Result<PayoutRecord, ClaimError> {
        self.access.authorize(caller, Operation::PayClaim, None)?;

        let approved = self.claim(claim_id)?.clone();
        if approved.status() != ClaimStatus::Approved {
            return Err(ClaimError::InvalidStatusTransition {
                from: approved.status(),
                to: ClaimStatus::Paid,
            });
        }

        let paid_at = self.clock.tick();
        self.registry.replace(approved.with_status(ClaimStatus::Paid, paid_at));

        if let Err(e) = self.payouts.transfer(approved.claimant(), approved.amount()) {
            warn!(claim_id = %claim_id, error = %e, "Payout failed, restoring approved claim");
            self.registry.replace(approved);
            return Err(ClaimError::PayoutFailed {
                claim_id,
                reason: e.to_string(),
            });
        }

        let record = PayoutRecord::new(
            claim_id,
            approved.claimant().clone(),
            approved.amount(),
            paid_at,
        );
        self.journal.push(record.clone());

        info!(
            claim_id = %claim_id,
            payee = %approved.claimant(),
            amount = %approved.amount(),
            payout_id = %record.id,
            "Claim paid"
        );
        Ok(record)
    }

    /// Returns a claim by id
    pub fn get_claim(&self, claim_id: ClaimId) -> Result<&Claim, ClaimError> {
        self.claim(claim_id)
    }

    /// Claims filed by `claimant`
    pub fn claims_by_claimant<'a>(&'a self, claimant: &'a Principal) -> Vec<&'a Claim> {
        self.registry.by_claimant(claimant).collect()
    }

    /// Completed payouts, oldest first
    pub fn payouts(&self) -> &[PayoutRecord] {
        &self.journal
    }

    pub fn claim_count(&self) -> usize {
        self.registry.len()
    }

    fn claim(&self, claim_id: ClaimId) -> Result<&Claim, ClaimError> {
        self.registry
            .get(claim_id)
            .ok_or(ClaimError::ClaimNotFound(claim_id))
    }

    fn validate_description(&self, description: &str) -> Result<(), ClaimError> {
        let len = description.chars().count();
        if description.trim().is_empty() {
            return Err(ClaimError::InvalidDescription(
                "description must not be empty".to_string(),
            ));
        }
        if len > self.settings.max_description_len {
            return Err(ClaimError::InvalidDescription(format!(
                "description is {} characters, maximum is {}",
                len, self.settings.max_description_len
            )));
        }
        Ok(())
    }
}
