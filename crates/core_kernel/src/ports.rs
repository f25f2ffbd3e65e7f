//! Ports for external collaborators
//!
//! The claims core depends on two systems it does not own:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │       Claims core            │
//! │ (lifecycle + verification)   │
//! └──────────────────────────────┘
//!        │                 │
//!        ▼                 ▼
//! SubscriptionLookup   PayoutPort
//!        ▲                 ▲
//!        │                 │
//! ┌──────┴─────────────────┴─────┐
//! │  Premium collector adapter   │
//! │  (in-memory pool, or an      │
//! │   external billing system)   │
//! └──────────────────────────────┘
//! ```
//!
//! The core runs to completion without suspension, so ports are synchronous.
//! Adapters that talk to slow systems are expected to answer from a local view.

use thiserror::Error;

use crate::identifiers::{PolicyId, Principal};
use crate::money::Money;
use crate::subscription::Subscription;

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The payout source cannot cover the transfer
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Money,
        available: Money,
    },

    /// The adapter failed for a reason of its own
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal {
            message: message.into(),
        }
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so adapters can be shared across
/// request handlers.
pub trait DomainPort: Send + Sync + 'static {}

/// Read access to premium subscriptions
pub trait SubscriptionLookup: DomainPort {
    /// Returns true if the policy exists in the collector's catalog
    fn policy_exists(&self, policy_id: PolicyId) -> bool;

    /// Returns the subscription for `(claimant, policy_id)`, if any
    ///
    /// The returned `active` flag reflects whether the policy is in force
    /// right now, including lapse for unpaid premiums.
    fn get_subscription(&self, claimant: &Principal, policy_id: PolicyId) -> Option<Subscription>;
}

/// Fund movement for approved claims
pub trait PayoutPort: DomainPort {
    /// Transfers `amount` to `to`
    fn transfer(&self, to: &Principal, amount: Money) -> Result<(), PortError>;
}

impl<T: DomainPort + ?Sized> DomainPort for std::sync::Arc<T> {}

impl<T: SubscriptionLookup + ?Sized> SubscriptionLookup for std::sync::Arc<T> {
    fn policy_exists(&self, policy_id: PolicyId) -> bool {
        (**self).policy_exists(policy_id)
    }

    fn get_subscription(&self, claimant: &Principal, policy_id: PolicyId) -> Option<Subscription> {
        (**self).get_subscription(claimant, policy_id)
    }
}

impl<T: PayoutPort + ?Sized> PayoutPort for std::sync::Arc<T> {
    fn transfer(&self, to: &Principal, amount: Money) -> Result<(), PortError> {
        (**self).transfer(to, amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_display() {
        let error = PortError::InsufficientFunds {
            requested: Money::from_minor(10),
            available: Money::zero(),
        };
        assert!(error.to_string().starts_with("Insufficient funds"));
        assert_eq!(PortError::internal("boom").to_string(), "Internal error: boom");
    }
}
