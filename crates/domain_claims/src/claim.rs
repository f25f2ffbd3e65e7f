//! Claim record

use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, EvidenceHash, Money, PolicyId, Principal, Timestamp};

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    /// Filed by the claimant
    Submitted,
    /// Under peer review
    UnderReview,
    /// Approved for payment
    Approved,
    /// Rejected (terminal)
    Rejected,
    /// Paid out (terminal)
    Paid,
}

impl ClaimStatus {
    /// Numeric status code
    pub fn as_code(&self) -> u8 {
        match self {
            ClaimStatus::Submitted => 0,
            ClaimStatus::UnderReview => 1,
            ClaimStatus::Approved => 2,
            ClaimStatus::Rejected => 3,
            ClaimStatus::Paid => 4,
        }
    }

    /// Parses a numeric status code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ClaimStatus::Submitted),
            1 => Some(ClaimStatus::UnderReview),
            2 => Some(ClaimStatus::Approved),
            3 => Some(ClaimStatus::Rejected),
            4 => Some(ClaimStatus::Paid),
            _ => None,
        }
    }

    /// Returns true if no transition leaves this status
    pub fn is_terminal(&self) -> bool {
        matches!(self, ClaimStatus::Rejected | ClaimStatus::Paid)
    }

    /// Checks if `self -> target` is an edge of the lifecycle graph
    pub fn can_transition_to(&self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!(
            (*self, target),
            (Submitted, UnderReview) |
            (UnderReview, Approved) |
            (UnderReview, Rejected) |
            (Approved, Paid)
        )
    }
}

/// Fields supplied by the claimant at submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClaim {
    pub claimant: Principal,
    pub policy_id: PolicyId,
    pub amount: Money,
    pub description: String,
    pub evidence_hash: EvidenceHash,
}

/// A claim against a policy
///
/// Claims are created only by the registry and never edited in place;
/// a transition produces a replacement record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Claim {
    id: ClaimId,
    claimant: Principal,
    policy_id: PolicyId,
    amount: Money,
    description: String,
    status: ClaimStatus,
    created_at: Timestamp,
    updated_at: Timestamp,
    evidence_hash: EvidenceHash,
}

impl Claim {
    pub(crate) fn submitted(id: ClaimId, new: NewClaim, at: Timestamp) -> Self {
        Self {
            id,
            claimant: new.claimant,
            policy_id: new.policy_id,
            amount: new.amount,
            description: new.description,
            status: ClaimStatus::Submitted,
            created_at: at,
            updated_at: at,
            evidence_hash: new.evidence_hash,
        }
    }

    /// Returns a copy of this claim in `status`, stamped at `at`
    ///
    /// The caller has already validated the edge.
    pub(crate) fn with_status(&self, status: ClaimStatus, at: Timestamp) -> Self {
        Self {
            status,
            updated_at: at.max(self.updated_at),
            ..self.clone()
        }
    }

    pub fn id(&self) -> ClaimId {
        self.id
    }

    pub fn claimant(&self) -> &Principal {
        &self.claimant
    }

    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    pub fn amount(&self) -> Money {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> ClaimStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn evidence_hash(&self) -> &EvidenceHash {
        &self.evidence_hash
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_edges() {
        use ClaimStatus::*;
        assert!(Submitted.can_transition_to(UnderReview));
        assert!(UnderReview.can_transition_to(Approved));
        assert!(UnderReview.can_transition_to(Rejected));
        assert!(Approved.can_transition_to(Paid));

        assert!(!Submitted.can_transition_to(Paid));
        assert!(!Submitted.can_transition_to(Approved));
        assert!(!Rejected.can_transition_to(Paid));
        assert!(!Paid.can_transition_to(Paid));
        assert!(!Approved.can_transition_to(UnderReview));
    }

    #[test]
    fn test_status_codes_round_trip() {
        for code in 0..5u8 {
            assert_eq!(ClaimStatus::from_code(code).map(|s| s.as_code()), Some(code));
        }
        assert_eq!(ClaimStatus::from_code(5), None);
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(ClaimStatus::Paid.is_terminal());
        assert!(ClaimStatus::Rejected.is_terminal());
        assert!(!ClaimStatus::Approved.is_terminal());
    }
}
