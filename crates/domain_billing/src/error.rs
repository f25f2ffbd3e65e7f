//! Billing domain errors

use thiserror::Error;

use core_kernel::{ErrorCode, Money, MoneyError, PolicyId, Principal};

/// Errors that can occur in the billing domain
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BillingError {
    /// Policy is not in the catalog
    #[error("Policy not found: {0}")]
    PolicyNotFound(PolicyId),

    /// Subscriber has no active subscription to the policy
    #[error("{subscriber} is not subscribed to {policy_id}")]
    NotSubscribed { subscriber: Principal, policy_id: PolicyId },

    /// Subscriber already holds an active subscription
    #[error("{subscriber} is already subscribed to {policy_id}")]
    AlreadySubscribed { subscriber: Principal, policy_id: PolicyId },

    /// Policy terms are unusable
    #[error("Invalid policy terms: {0}")]
    InvalidTerms(String),

    /// The pool cannot cover a payout
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Money, available: Money },

    /// Calculation error
    #[error("Calculation error: {0}")]
    Calculation(#[from] MoneyError),
}

impl BillingError {
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::PolicyNotFound(_) => ErrorCode::PolicyNotFound,
            BillingError::NotSubscribed { .. } => ErrorCode::NotSubscribed,
            BillingError::AlreadySubscribed { .. } => ErrorCode::AlreadySubscribed,
            BillingError::InvalidTerms(_) | BillingError::Calculation(_) => ErrorCode::InvalidAmount,
            BillingError::InsufficientFunds { .. } => ErrorCode::PayoutFailed,
        }
    }
}
