//! Subscription view
//!
//! The premium collector owns subscriptions. The claims core only reads them,
//! to decide whether a claimant holds an active, paid policy.

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::temporal::Timestamp;

/// A claimant's premium subscription to a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Premium due each period
    pub premium_amount: Money,
    /// Billing period in which the most recent premium was paid
    pub last_payment: Timestamp,
    /// Length of one premium period, in billing-calendar ticks
    pub payment_frequency: u64,
    /// Whether the subscription is in force
    pub active: bool,
    /// Total premiums collected over the subscription's life
    pub total_paid: Money,
}

impl Subscription {
    /// Returns the time by which the next premium must be paid
    pub fn next_due(&self) -> Timestamp {
        self.last_payment.advanced_by(self.payment_frequency)
    }

    /// Returns true if the subscription is active and not past due at `now`
    pub fn is_in_force_at(&self, now: Timestamp) -> bool {
        self.active && now <= self.next_due()
    }
}
