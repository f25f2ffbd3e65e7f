//! Claims DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{ClaimId, Money, PolicyId, Timestamp};
use domain_claims::{Claim, ClaimStatus, PayoutRecord};
use domain_verification::{VerificationRecord, VerificationStatus};

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitClaimRequest {
    pub policy_id: u64,
    #[validate(range(min = 1, message = "amount must be greater than zero"))]
    pub amount: u64,
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: String,
    /// Hex-encoded 32-byte content hash, optionally `0x`-prefixed
    #[validate(length(min = 64, max = 66))]
    pub evidence_hash: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ClaimStatus,
}

#[derive(Debug, Deserialize, Validate)]
pub struct InitializeVerificationRequest {
    #[validate(range(min = 1, message = "threshold must be at least one"))]
    pub required_threshold: u32,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub approve: bool,
}

#[derive(Debug, Serialize)]
pub struct SubmitClaimResponse {
    pub claim_id: ClaimId,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub claimant: String,
    pub policy_id: PolicyId,
    pub amount: Money,
    pub description: String,
    pub status: ClaimStatus,
    pub status_code: u8,
    pub evidence_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<&Claim> for ClaimResponse {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id(),
            claimant: claim.claimant().to_string(),
            policy_id: claim.policy_id(),
            amount: claim.amount(),
            description: claim.description().to_string(),
            status: claim.status(),
            status_code: claim.status().as_code(),
            evidence_hash: claim.evidence_hash().to_hex(),
            created_at: claim.created_at(),
            updated_at: claim.updated_at(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClaimStatusResponse {
    pub claim_id: ClaimId,
    pub status: ClaimStatus,
}

#[derive(Debug, Serialize)]
pub struct VerificationResponse {
    pub claim_id: ClaimId,
    pub status: VerificationStatus,
    pub status_code: u8,
    pub required_threshold: u32,
    pub max_votes: u32,
    pub approve_count: u32,
    pub reject_count: u32,
    pub voters: Vec<String>,
}

impl From<&VerificationRecord> for VerificationResponse {
    fn from(record: &VerificationRecord) -> Self {
        let tally = record.tally();
        Self {
            claim_id: record.claim_id(),
            status: record.status(),
            status_code: record.status().as_code(),
            required_threshold: record.required_threshold(),
            max_votes: record.max_votes(),
            approve_count: tally.approve,
            reject_count: tally.reject,
            voters: record.voters().map(|v| v.to_string()).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub claim_id: ClaimId,
    pub status: VerificationStatus,
}

#[derive(Debug, Serialize)]
pub struct PayoutResponse {
    pub payout_id: String,
    pub claim_id: ClaimId,
    pub payee: String,
    pub amount: Money,
    pub paid_at: Timestamp,
}

impl From<PayoutRecord> for PayoutResponse {
    fn from(record: PayoutRecord) -> Self {
        Self {
            payout_id: record.id.to_string(),
            claim_id: record.claim_id,
            payee: record.payee.to_string(),
            amount: record.amount,
            paid_at: record.paid_at,
        }
    }
}
