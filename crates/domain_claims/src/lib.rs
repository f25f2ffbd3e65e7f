//! Claims Management Domain
//!
//! This crate implements the claim lifecycle from submission through
//! peer verification to payout.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Submitted -> Under Review -> Approved -> Paid
//!                           \-> Rejected
//! ```
//!
//! `Rejected` and `Paid` are terminal. Every transition is gated by the
//! access policy, and the move out of review is driven by the outcome of the
//! claim's peer verification session.

pub mod claim;
pub mod registry;
pub mod lifecycle;
pub mod payment;
pub mod desk;
pub mod error;

pub use claim::{Claim, ClaimStatus, NewClaim};
pub use registry::{ClaimRegistry, ClaimSequence};
pub use lifecycle::{ClaimsProcessor, ClaimSettings, VerificationSource, DEFAULT_MAX_DESCRIPTION_LEN};
pub use payment::PayoutRecord;
pub use desk::{AdjudicationDesk, DeskSettings};
pub use error::ClaimError;
