//! Policy catalog entries
//!
//! Policies are defined elsewhere; the collector only needs each policy's
//! premium and how often it falls due.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use crate::error::BillingError;

/// Premium terms for a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyTerms {
    /// Premium due each period
    pub premium_amount: Money,
    /// Length of one premium period, in billing-calendar ticks
    pub payment_frequency: u64,
}

impl PolicyTerms {
    pub fn new(premium_amount: Money, payment_frequency: u64) -> Self {
        Self {
            premium_amount,
            payment_frequency,
        }
    }

    /// Checks that the terms can be collected on
    pub fn validate(&self) -> Result<(), BillingError> {
        if !self.premium_amount.is_positive() {
            return Err(BillingError::InvalidTerms(
                "premium must be greater than zero".to_string(),
            ));
        }
        if self.payment_frequency == 0 {
            return Err(BillingError::InvalidTerms(
                "payment frequency must be at least one tick".to_string(),
            ));
        }
        Ok(())
    }
}
