//! Billing Domain - Premium Collection and Payout Pool
//!
//! This crate is the premium collector the claims core consults. Premiums
//! paid by subscribers flow into a shared pool, and approved claims are paid
//! out of that same pool.
//!
//! # Subscription Lifecycle
//!
//! ```text
//! subscribe -> (pay_premium)* -> cancel_subscription
//! ```
//!
//! A subscription is in force while it is active and its latest premium is
//! not past due. The claims core sees subscriptions only through
//! [`core_kernel::SubscriptionLookup`] and moves money only through
//! [`core_kernel::PayoutPort`], both implemented by [`PremiumPool`].
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_billing::{PremiumPool, PolicyTerms};
//!
//! let pool = PremiumPool::new(clock);
//! pool.register_policy(policy_id, PolicyTerms::new(Money::from_minor(5000), 30))?;
//! pool.subscribe(&alice, policy_id)?;
//! pool.pay_premium(&alice, policy_id)?;
//! ```

pub mod catalog;
pub mod ledger;
pub mod pool;
pub mod error;

pub use catalog::PolicyTerms;
pub use ledger::{PoolEntry, PoolEntryKind};
pub use pool::PremiumPool;
pub use error::BillingError;
