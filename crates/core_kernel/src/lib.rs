//! Core Kernel - Foundational types shared by the claims adjudication system
//!
//! This crate provides the building blocks used across all domain modules:
//! - Strongly-typed identifiers and caller principals
//! - Single-currency money in minor units
//! - Logical time for ordering committed operations
//! - Role-based access control
//! - Port traits for the external collaborators (subscriptions, payouts)

pub mod money;
pub mod temporal;
pub mod identifiers;
pub mod evidence;
pub mod access;
pub mod subscription;
pub mod ports;
pub mod error;

pub use money::{Money, MoneyError};
pub use temporal::{Timestamp, LogicalClock};
pub use identifiers::{ClaimId, PolicyId, PayoutId, Principal};
pub use evidence::{EvidenceHash, EvidenceHashError};
pub use access::{AccessPolicy, AccessError, Operation, Role};
pub use subscription::Subscription;
pub use ports::{DomainPort, PortError, PayoutPort, SubscriptionLookup};
pub use error::ErrorCode;
