//! Consensus engine
//!
//! The engine is the only writer of verification records. Outcomes leave the
//! engine by value as a [`VerificationStatus`]; callers never hold a mutable
//! reference into a session.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

use core_kernel::{AccessPolicy, ClaimId, Operation, Principal};

use crate::error::VerificationError;
use crate::record::{VerificationRecord, VerificationStatus};

/// Default cap on votes per session
pub const DEFAULT_MAX_VOTES: u32 = 10;

/// Engine configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationSettings {
    /// Maximum number of votes a single session accepts
    pub max_votes: u32,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            max_votes: DEFAULT_MAX_VOTES,
        }
    }
}

/// Per-claim peer verification
#[derive(Debug, Clone)]
pub struct VerificationEngine {
    access: AccessPolicy,
    settings: VerificationSettings,
    sessions: HashMap<ClaimId, VerificationRecord>,
}

impl VerificationEngine {
    pub fn new(access: AccessPolicy, settings: VerificationSettings) -> Self {
        Self {
            access,
            settings,
            sessions: HashMap::new(),
        }
    }

    pub fn settings(&self) -> VerificationSettings {
        self.settings
    }

    pub fn access(&self) -> &AccessPolicy {
        &self.access
    }

    /// Opens a verification session for a claim
    ///
    /// Administrator only. A resolved session for the same claim is replaced
    /// by a fresh one; a pending session is not.
    pub fn initialize_claim_verification(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        claimant: Principal,
        required_threshold: u32,
    ) -> Result<(), VerificationError> {
        self.access.authorize(caller, Operation::InitializeVerification, None)?;

        if let Some(existing) = self.sessions.get(&claim_id) {
            if !existing.status().is_resolved() {
                return Err(VerificationError::AlreadyInitialized(claim_id));
            }
        }

        let record = VerificationRecord::open(
            claim_id,
            claimant,
            required_threshold,
            self.settings.max_votes,
        )?;
        self.sessions.insert(claim_id, record);

        info!(
            claim_id = %claim_id,
            required_threshold,
            max_votes = self.settings.max_votes,
            "Verification opened"
        );
        Ok(())
    }

    /// Casts a vote and returns the session's status after it
    pub fn verify_claim(
        &mut self,
        caller: &Principal,
        claim_id: ClaimId,
        approve: bool,
    ) -> Result<VerificationStatus, VerificationError> {
        let current = self
            .sessions
            .get(&claim_id)
            .ok_or(VerificationError::NotFound(claim_id))?;

        self.access
            .authorize(caller, Operation::CastVote, Some(current.claimant()))?;

        let mut next = current.clone();
        let status = next.record_vote(caller, approve)?;
        let tally = next.tally();
        self.sessions.insert(claim_id, next);

        debug!(
            claim_id = %claim_id,
            voter = %caller,
            approve,
            approvals = tally.approve,
            rejections = tally.reject,
            "Vote recorded"
        );
        if status.is_resolved() {
            info!(claim_id = %claim_id, ?status, "Verification resolved");
        }
        Ok(status)
    }

    /// Returns the status of a claim's session
    pub fn get_verification_status(
        &self,
        claim_id: ClaimId,
    ) -> Result<VerificationStatus, VerificationError> {
        self.sessions
            .get(&claim_id)
            .map(VerificationRecord::status)
            .ok_or(VerificationError::NotFound(claim_id))
    }

    /// Returns the full session record
    pub fn get_verification(&self, claim_id: ClaimId) -> Option<&VerificationRecord> {
        self.sessions.get(&claim_id)
    }

    /// Returns true if `voter` has voted in the claim's current session
    pub fn has_voted(&self, claim_id: ClaimId, voter: &Principal) -> bool {
        self.sessions
            .get(&claim_id)
            .is_some_and(|record| record.has_voted(voter))
    }
}
