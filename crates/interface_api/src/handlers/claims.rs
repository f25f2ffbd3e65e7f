//! Claims handlers
//!
//! Every handler holds the desk lock for exactly one core operation.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{ClaimId, EvidenceHash, Money, PolicyId};

use crate::auth::Claims;
use crate::dto::claims::*;
use crate::{error::ApiError, AppState};

/// Files a claim on behalf of the caller
pub async fn submit_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Json(request): Json<SubmitClaimRequest>,
) -> Result<(StatusCode, Json<SubmitClaimResponse>), ApiError> {
    request.validate()?;
    let evidence_hash: EvidenceHash = request.evidence_hash.parse()?;

    let claim_id = state.desk.lock().await.submit_claim(
        &caller.principal(),
        PolicyId::new(request.policy_id),
        Money::from_minor(request.amount),
        request.description,
        evidence_hash,
    )?;

    Ok((StatusCode::CREATED, Json(SubmitClaimResponse { claim_id })))
}

/// Gets a claim by ID
pub async fn get_claim(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let desk = state.desk.lock().await;
    let claim = desk.get_claim(ClaimId::new(id))?;
    Ok(Json(ClaimResponse::from(claim)))
}

/// Moves a claim along the lifecycle
pub async fn update_status(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(id): Path<u64>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim_id = ClaimId::new(id);
    let mut desk = state.desk.lock().await;
    desk.update_claim_status(&caller.principal(), claim_id, request.status)?;
    let claim = desk.get_claim(claim_id)?;
    Ok(Json(ClaimResponse::from(claim)))
}

/// Opens peer verification for a claim
pub async fn initialize_verification(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(id): Path<u64>,
    Json(request): Json<InitializeVerificationRequest>,
) -> Result<(StatusCode, Json<VerificationResponse>), ApiError> {
    request.validate()?;
    let claim_id = ClaimId::new(id);

    let mut desk = state.desk.lock().await;
    desk.initialize_claim_verification(&caller.principal(), claim_id, request.required_threshold)?;
    let record = desk.get_verification(claim_id)?;

    Ok((StatusCode::CREATED, Json(VerificationResponse::from(record))))
}

/// Casts the caller's vote
pub async fn cast_vote(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(id): Path<u64>,
    Json(request): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, ApiError> {
    let claim_id = ClaimId::new(id);
    let status = state
        .desk
        .lock()
        .await
        .verify_claim(&caller.principal(), claim_id, request.approve)?;
    Ok(Json(VoteResponse { claim_id, status }))
}

/// Gets the verification session for a claim
pub async fn get_verification(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<VerificationResponse>, ApiError> {
    let desk = state.desk.lock().await;
    let record = desk.get_verification(ClaimId::new(id))?;
    Ok(Json(VerificationResponse::from(record)))
}

/// Applies a resolved verification outcome to the claim
pub async fn process_verified(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimStatusResponse>, ApiError> {
    let claim_id = ClaimId::new(id);
    let status = state
        .desk
        .lock()
        .await
        .process_verified_claim(&caller.principal(), claim_id)?;
    Ok(Json(ClaimStatusResponse { claim_id, status }))
}

/// Pays an approved claim from the premium pool
pub async fn pay_claim(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(id): Path<u64>,
) -> Result<Json<PayoutResponse>, ApiError> {
    let payout = state
        .desk
        .lock()
        .await
        .pay_claim(&caller.principal(), ClaimId::new(id))?;
    Ok(Json(PayoutResponse::from(payout)))
}
