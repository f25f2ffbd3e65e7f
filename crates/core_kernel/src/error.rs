//! Error codes shared across the system

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable numeric codes reported to callers
///
/// Every failure condition has its own code; no two conditions share one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Unauthorized,
    NotFound,
    InvalidStatus,
    AlreadyVerified,
    VerificationLimit,
    PolicyNotFound,
    NotSubscribed,
    AlreadyInitialized,
    InvalidThreshold,
    InvalidAmount,
    InvalidDescription,
    VerificationClosed,
    PayoutFailed,
    AlreadySubscribed,
    InvalidEvidence,
}

impl ErrorCode {
    /// Returns the numeric wire code
    pub fn as_u32(&self) -> u32 {
        match self {
            ErrorCode::Unauthorized => 100,
            ErrorCode::NotFound => 101,
            ErrorCode::InvalidStatus => 102,
            ErrorCode::AlreadyVerified => 103,
            ErrorCode::VerificationLimit => 104,
            ErrorCode::PolicyNotFound => 105,
            ErrorCode::NotSubscribed => 106,
            ErrorCode::AlreadyInitialized => 107,
            ErrorCode::InvalidThreshold => 108,
            ErrorCode::InvalidAmount => 109,
            ErrorCode::InvalidDescription => 110,
            ErrorCode::VerificationClosed => 111,
            ErrorCode::PayoutFailed => 112,
            ErrorCode::AlreadySubscribed => 113,
            ErrorCode::InvalidEvidence => 114,
        }
    }

    /// Returns every code, in numeric order
    pub fn all() -> [ErrorCode; 15] {
        [
            ErrorCode::Unauthorized,
            ErrorCode::NotFound,
            ErrorCode::InvalidStatus,
            ErrorCode::AlreadyVerified,
            ErrorCode::VerificationLimit,
            ErrorCode::PolicyNotFound,
            ErrorCode::NotSubscribed,
            ErrorCode::AlreadyInitialized,
            ErrorCode::InvalidThreshold,
            ErrorCode::InvalidAmount,
            ErrorCode::InvalidDescription,
            ErrorCode::VerificationClosed,
            ErrorCode::PayoutFailed,
            ErrorCode::AlreadySubscribed,
            ErrorCode::InvalidEvidence,
        ]
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}
