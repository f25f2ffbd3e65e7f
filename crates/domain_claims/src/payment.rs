//! Claim payouts

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, Money, PayoutId, Principal, Timestamp};

/// A completed payout for a claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutRecord {
    pub id: PayoutId,
    pub claim_id: ClaimId,
    pub payee: Principal,
    pub amount: Money,
    /// Logical time of the `Paid` transition
    pub paid_at: Timestamp,
    /// Wall-clock time the payout was journaled
    pub recorded_at: DateTime<Utc>,
}

impl PayoutRecord {
    /// Creates a new payout record
    pub fn new(claim_id: ClaimId, payee: Principal, amount: Money, paid_at: Timestamp) -> Self {
        Self {
            id: PayoutId::new_v7(),
            claim_id,
            payee,
            amount,
            paid_at,
            recorded_at: Utc::now(),
        }
    }
}
