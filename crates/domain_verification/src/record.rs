//! Verification session record

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use core_kernel::{ClaimId, Principal};
use crate::error::VerificationError;

/// Outcome of a verification session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Collecting votes
    Pending,
    /// Approvals reached the threshold
    Approved,
    /// Rejections reached the threshold
    Rejected,
}

impl VerificationStatus {
    /// Numeric status code
    pub fn as_code(&self) -> u8 {
        match self {
            VerificationStatus::Pending => 0,
            VerificationStatus::Approved => 1,
            VerificationStatus::Rejected => 2,
        }
    }

    /// Returns true once the session can no longer change
    pub fn is_resolved(&self) -> bool {
        !matches!(self, VerificationStatus::Pending)
    }
}

/// Vote counts for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub approve: u32,
    pub reject: u32,
}

impl Tally {
    pub fn total(&self) -> u32 {
        self.approve + self.reject
    }
}

/// Voting state for one claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRecord {
    claim_id: ClaimId,
    claimant: Principal,
    required_threshold: u32,
    max_votes: u32,
    voters: BTreeSet<Principal>,
    tally: Tally,
    status: VerificationStatus,
}

impl VerificationRecord {
    /// Opens a session
    ///
    /// The threshold must be reachable within the vote cap.
    pub fn open(
        claim_id: ClaimId,
        claimant: Principal,
        required_threshold: u32,
        max_votes: u32,
    ) -> Result<Self, VerificationError> {
        if required_threshold == 0 || required_threshold > max_votes {
            return Err(VerificationError::InvalidThreshold {
                threshold: required_threshold,
                max_votes,
            });
        }

        Ok(Self {
            claim_id,
            claimant,
            required_threshold,
            max_votes,
            voters: BTreeSet::new(),
            tally: Tally::default(),
            status: VerificationStatus::Pending,
        })
    }

    pub fn claim_id(&self) -> ClaimId {
        self.claim_id
    }

    pub fn claimant(&self) -> &Principal {
        &self.claimant
    }

    pub fn required_threshold(&self) -> u32 {
        self.required_threshold
    }

    pub fn max_votes(&self) -> u32 {
        self.max_votes
    }

    pub fn status(&self) -> VerificationStatus {
        self.status
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn voters(&self) -> impl Iterator<Item = &Principal> {
        self.voters.iter()
    }

    pub fn has_voted(&self, voter: &Principal) -> bool {
        self.voters.contains(voter)
    }

    /// Checks whether `voter` may vote now, without changing anything
    pub fn check_vote(&self, voter: &Principal) -> Result<(), VerificationError> {
        if self.status.is_resolved() {
            return Err(VerificationError::Closed {
                claim_id: self.claim_id,
                status: self.status,
            });
        }
        if self.voters.contains(voter) {
            return Err(VerificationError::AlreadyVerified {
                claim_id: self.claim_id,
                voter: voter.clone(),
            });
        }
        if self.tally.total() >= self.max_votes {
            return Err(VerificationError::VerificationLimit {
                claim_id: self.claim_id,
                max_votes: self.max_votes,
            });
        }
        Ok(())
    }

    /// Records a vote and re-evaluates the outcome
    ///
    /// All checks run before the record is touched; on error it is unchanged.
    pub fn record_vote(
        &mut self,
        voter: &Principal,
        approve: bool,
    ) -> Result<VerificationStatus, VerificationError> {
        self.check_vote(voter)?;

        self.voters.insert(voter.clone());
        if approve {
            self.tally.approve += 1;
        } else {
            self.tally.reject += 1;
        }
        self.status = self.resolve();
        Ok(self.status)
    }

    // Only one counter moves per vote, so both sides cannot cross the
    // threshold in the same step; approval is still checked first.
    fn resolve(&self) -> VerificationStatus {
        if self.tally.approve >= self.required_threshold {
            VerificationStatus::Approved
        } else if self.tally.reject >= self.required_threshold {
            VerificationStatus::Rejected
        } else {
            VerificationStatus::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(threshold: u32, max_votes: u32) -> VerificationRecord {
        VerificationRecord::open(ClaimId::new(1), Principal::new("claimant"), threshold, max_votes)
            .unwrap()
    }

    #[test]
    fn test_open_rejects_zero_threshold() {
        let result = VerificationRecord::open(ClaimId::new(1), Principal::new("c"), 0, 5);
        assert!(matches!(result, Err(VerificationError::InvalidThreshold { .. })));
    }

    #[test]
    fn test_open_rejects_unreachable_threshold() {
        let result = VerificationRecord::open(ClaimId::new(1), Principal::new("c"), 6, 5);
        assert!(matches!(result, Err(VerificationError::InvalidThreshold { threshold: 6, max_votes: 5 })));
    }

    #[test]
    fn test_threshold_of_one_resolves_immediately() {
        let mut rec = record(1, 5);
        let status = rec.record_vote(&Principal::new("v1"), false).unwrap();
        assert_eq!(status, VerificationStatus::Rejected);
    }

    #[test]
    fn test_failed_vote_leaves_record_unchanged() {
        let mut rec = record(3, 5);
        rec.record_vote(&Principal::new("v1"), true).unwrap();
        let before = rec.clone();
        assert!(rec.record_vote(&Principal::new("v1"), false).is_err());
        assert_eq!(rec, before);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(VerificationStatus::Pending.as_code(), 0);
        assert_eq!(VerificationStatus::Approved.as_code(), 1);
        assert_eq!(VerificationStatus::Rejected.as_code(), 2);
    }
}
