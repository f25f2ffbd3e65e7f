//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::{AccessError, ErrorCode, EvidenceHashError};
use domain_billing::BillingError;
use domain_claims::ClaimError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed, or expired credentials
    #[error("Unauthorized")]
    Unauthenticated,

    /// A domain operation refused the request
    #[error("{message}")]
    Domain { code: ErrorCode, message: String },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u32>,
    pub message: String,
}

impl ApiError {
    pub fn domain(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::Domain {
            code,
            message: message.into(),
        }
    }

    /// Returns the domain error code, if any
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ApiError::Domain { code, .. } => Some(*code),
            _ => None,
        }
    }
}

/// HTTP status for a domain error code
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::Unauthorized => StatusCode::FORBIDDEN,
        ErrorCode::NotFound | ErrorCode::PolicyNotFound => StatusCode::NOT_FOUND,
        ErrorCode::InvalidStatus
        | ErrorCode::AlreadyVerified
        | ErrorCode::VerificationLimit
        | ErrorCode::AlreadyInitialized
        | ErrorCode::VerificationClosed
        | ErrorCode::AlreadySubscribed => StatusCode::CONFLICT,
        ErrorCode::NotSubscribed
        | ErrorCode::InvalidThreshold
        | ErrorCode::InvalidAmount
        | ErrorCode::InvalidDescription
        | ErrorCode::InvalidEvidence => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorCode::PayoutFailed => StatusCode::PAYMENT_REQUIRED,
    }
}

fn error_type(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::Unauthorized => "unauthorized",
        ErrorCode::NotFound => "not_found",
        ErrorCode::InvalidStatus => "invalid_status",
        ErrorCode::AlreadyVerified => "already_verified",
        ErrorCode::VerificationLimit => "verification_limit",
        ErrorCode::PolicyNotFound => "policy_not_found",
        ErrorCode::NotSubscribed => "not_subscribed",
        ErrorCode::AlreadyInitialized => "already_initialized",
        ErrorCode::InvalidThreshold => "invalid_threshold",
        ErrorCode::InvalidAmount => "invalid_amount",
        ErrorCode::InvalidDescription => "invalid_description",
        ErrorCode::VerificationClosed => "verification_closed",
        ErrorCode::PayoutFailed => "payout_failed",
        ErrorCode::AlreadySubscribed => "already_subscribed",
        ErrorCode::InvalidEvidence => "invalid_evidence",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, code, message) = match &self {
            ApiError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "unauthenticated",
                None,
                "Unauthorized".to_string(),
            ),
            ApiError::Domain { code, message } => {
                (status_for(*code), error_type(*code), Some(code.as_u32()), message.clone())
            }
            ApiError::Validation(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "validation_error", None, msg.clone())
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            code,
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        ApiError::domain(err.code(), err.to_string())
    }
}

impl From<BillingError> for ApiError {
    fn from(err: BillingError) -> Self {
        ApiError::domain(err.code(), err.to_string())
    }
}

impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        ApiError::domain(err.code(), err.to_string())
    }
}

impl From<EvidenceHashError> for ApiError {
    fn from(err: EvidenceHashError) -> Self {
        ApiError::domain(ErrorCode::InvalidEvidence, err.to_string())
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err.to_string())
    }
}
