//! Verification domain errors

use thiserror::Error;

use core_kernel::{AccessError, ClaimId, ErrorCode, Principal};

use crate::record::VerificationStatus;

/// Errors that can occur in the verification domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VerificationError {
    #[error(transparent)]
    Unauthorized(#[from] AccessError),

    #[error("No verification session for claim {0}")]
    NotFound(ClaimId),

    #[error("Verification already in progress for claim {0}")]
    AlreadyInitialized(ClaimId),

    #[error("Invalid threshold {threshold}: must be between 1 and {max_votes}")]
    InvalidThreshold { threshold: u32, max_votes: u32 },

    #[error("{voter} has already verified claim {claim_id}")]
    AlreadyVerified { claim_id: ClaimId, voter: Principal },

    #[error("Verification limit of {max_votes} votes reached for claim {claim_id}")]
    VerificationLimit { claim_id: ClaimId, max_votes: u32 },

    #[error("Verification for claim {claim_id} is closed ({status:?})")]
    Closed { claim_id: ClaimId, status: VerificationStatus },
}

impl VerificationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            VerificationError::Unauthorized(e) => e.code(),
            VerificationError::NotFound(_) => ErrorCode::NotFound,
            VerificationError::AlreadyInitialized(_) => ErrorCode::AlreadyInitialized,
            VerificationError::InvalidThreshold { .. } => ErrorCode::InvalidThreshold,
            VerificationError::AlreadyVerified { .. } => ErrorCode::AlreadyVerified,
            VerificationError::VerificationLimit { .. } => ErrorCode::VerificationLimit,
            VerificationError::Closed { .. } => ErrorCode::VerificationClosed,
        }
    }
}
