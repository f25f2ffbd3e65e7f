//! Pool ledger
//!
//! Every movement of money into or out of the pool is journaled. The pool
//! balance always equals inflows minus outflows.

use serde::{Deserialize, Serialize};

use core_kernel::{Money, PolicyId, Principal, Timestamp};

/// Kind of pool movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoolEntryKind {
    /// Premium collected from a subscriber
    PremiumCollected,
    /// Capital added to the pool directly
    Funded,
    /// Claim payout
    ClaimPaid,
}

impl PoolEntryKind {
    /// Returns true if the entry adds to the balance
    pub fn is_inflow(&self) -> bool {
        matches!(self, PoolEntryKind::PremiumCollected | PoolEntryKind::Funded)
    }
}

/// A single pool movement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub kind: PoolEntryKind,
    /// Subscriber or payee; `None` for direct funding
    pub counterparty: Option<Principal>,
    pub policy_id: Option<PolicyId>,
    pub amount: Money,
    pub at: Timestamp,
}

/// Sums inflows minus outflows
pub fn net_balance(entries: &[PoolEntry]) -> i128 {
    entries.iter().fold(0i128, |acc, e| {
        let amount = e.amount.minor_units() as i128;
        if e.kind.is_inflow() {
            acc + amount
        } else {
            acc - amount
        }
    })
}
