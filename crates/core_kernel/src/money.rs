//! Money in integer minor units
//!
//! Claims, premiums, and payouts are all denominated in a single currency and
//! carried as non-negative integer minor units (e.g., cents). Arithmetic is
//! checked so an overflow or a negative balance surfaces as an error instead
//! of wrapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;
use thiserror::Error;

/// Errors that can occur during money operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient amount: need {needed}, have {available}")]
    Insufficient { needed: u64, available: u64 },

    #[error("Overflow during calculation")]
    Overflow,
}

/// A monetary amount in minor units
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    /// Creates Money from an amount in minor units
    pub const fn from_minor(minor_units: u64) -> Self {
        Self(minor_units)
    }

    /// Creates a zero amount
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Creates a strictly positive amount, rejecting zero
    pub fn positive(minor_units: u64) -> Result<Self, MoneyError> {
        if minor_units == 0 {
            return Err(MoneyError::InvalidAmount(
                "amount must be greater than zero".to_string(),
            ));
        }
        Ok(Self(minor_units))
    }

    /// Returns the amount in minor units
    pub fn minor_units(&self) -> u64 {
        self.0
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Returns true if the amount is positive
    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checked addition
    pub fn checked_add(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_add(other.0)
            .map(Money)
            .ok_or(MoneyError::Overflow)
    }

    /// Checked subtraction; fails rather than going below zero
    pub fn checked_sub(&self, other: Money) -> Result<Money, MoneyError> {
        self.0
            .checked_sub(other.0)
            .map(Money)
            .ok_or(MoneyError::Insufficient {
                needed: other.0,
                available: self.0,
            })
    }
}

impl Add for Money {
    type Output = Money;

    /// Saturating addition, for totals that are only ever displayed
    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Money {
    fn from(minor_units: u64) -> Self {
        Money(minor_units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positive_rejects_zero() {
        assert!(Money::positive(0).is_err());
        assert_eq!(Money::positive(50_000).unwrap().minor_units(), 50_000);
    }

    #[test]
    fn test_checked_sub_insufficient() {
        let balance = Money::from_minor(100);
        let err = balance.checked_sub(Money::from_minor(101)).unwrap_err();
        assert_eq!(err, MoneyError::Insufficient { needed: 101, available: 100 });
    }

    #[test]
    fn test_checked_add_overflow() {
        let max = Money::from_minor(u64::MAX);
        assert_eq!(max.checked_add(Money::from_minor(1)), Err(MoneyError::Overflow));
    }
}
