//! Peer Verification Domain
//!
//! This crate implements the consensus engine that turns independent
//! approve/reject votes into a binding outcome for a claim.
//!
//! # Session Lifecycle
//!
//! ```text
//! Pending -> Approved | Rejected
//! ```
//!
//! A session resolves on the first vote that brings either side to the
//! required threshold. Each verifier votes at most once, the number of votes
//! per session is capped, and a resolved session accepts no further votes.

pub mod record;
pub mod engine;
pub mod error;

pub use record::{VerificationRecord, VerificationStatus, Tally};
pub use engine::{VerificationEngine, VerificationSettings, DEFAULT_MAX_VOTES};
pub use error::VerificationError;
