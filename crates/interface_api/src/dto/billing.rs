//! Premium and treasury DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::{Money, PolicyId, Subscription, Timestamp};

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterPolicyRequest {
    #[validate(range(min = 1, message = "premium must be greater than zero"))]
    pub premium_amount: u64,
    #[validate(range(min = 1, message = "payment frequency must be at least one tick"))]
    pub payment_frequency: u64,
}

#[derive(Debug, Serialize)]
pub struct SubscriptionResponse {
    pub policy_id: PolicyId,
    pub premium_amount: Money,
    pub last_payment: Timestamp,
    pub next_due: Timestamp,
    pub payment_frequency: u64,
    pub active: bool,
    pub total_paid: Money,
}

impl SubscriptionResponse {
    pub fn new(policy_id: PolicyId, subscription: &Subscription) -> Self {
        Self {
            policy_id,
            premium_amount: subscription.premium_amount,
            last_payment: subscription.last_payment,
            next_due: subscription.next_due(),
            payment_frequency: subscription.payment_frequency,
            active: subscription.active,
            total_paid: subscription.total_paid,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TreasuryResponse {
    pub balance: Money,
}
