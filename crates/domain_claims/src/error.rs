//! Claims domain errors

use thiserror::Error;

use core_kernel::{AccessError, ClaimId, ErrorCode, PolicyId, Principal};
use domain_verification::VerificationError;

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClaimError {
    #[error(transparent)]
    Unauthorized(#[from] AccessError),

    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidStatusTransition { from: ClaimStatus, to: ClaimStatus },

    #[error("Verification for claim {0} has not resolved")]
    VerificationUnresolved(ClaimId),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid description: {0}")]
    InvalidDescription(String),

    #[error("Policy not found: {0}")]
    PolicyNotFound(PolicyId),

    #[error("{claimant} holds no active subscription to {policy_id}")]
    NotSubscribed { claimant: Principal, policy_id: PolicyId },

    #[error("Payout for claim {claim_id} failed: {reason}")]
    PayoutFailed { claim_id: ClaimId, reason: String },

    #[error(transparent)]
    Verification(#[from] VerificationError),
}

impl ClaimError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ClaimError::Unauthorized(e) => e.code(),
            ClaimError::ClaimNotFound(_) => ErrorCode::NotFound,
            ClaimError::InvalidStatusTransition { .. } | ClaimError::VerificationUnresolved(_) => {
                ErrorCode::InvalidStatus
            }
            ClaimError::InvalidAmount(_) => ErrorCode::InvalidAmount,
            ClaimError::InvalidDescription(_) => ErrorCode::InvalidDescription,
            ClaimError::PolicyNotFound(_) => ErrorCode::PolicyNotFound,
            ClaimError::NotSubscribed { .. } => ErrorCode::NotSubscribed,
            ClaimError::PayoutFailed { .. } => ErrorCode::PayoutFailed,
            ClaimError::Verification(e) => e.code(),
        }
    }
}
