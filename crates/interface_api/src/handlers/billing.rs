//! Premium pool handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use validator::Validate;

use core_kernel::{AccessError, Money, PolicyId, SubscriptionLookup};
use domain_billing::{BillingError, PolicyTerms};

use crate::auth::Claims;
use crate::dto::billing::*;
use crate::{error::ApiError, AppState};

/// Registers or replaces a policy's premium terms (administrator only)
pub async fn register_policy(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(policy_id): Path<u64>,
    Json(request): Json<RegisterPolicyRequest>,
) -> Result<StatusCode, ApiError> {
    let caller = caller.principal();
    if !state.access.is_administrator(&caller) {
        return Err(AccessError::NotAdministrator { caller }.into());
    }
    request.validate()?;

    state.pool.register_policy(
        PolicyId::new(policy_id),
        PolicyTerms::new(
            Money::from_minor(request.premium_amount),
            request.payment_frequency,
        ),
    )?;
    Ok(StatusCode::NO_CONTENT)
}

/// Subscribes the caller to a policy
pub async fn subscribe(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(policy_id): Path<u64>,
) -> Result<(StatusCode, Json<SubscriptionResponse>), ApiError> {
    let policy_id = PolicyId::new(policy_id);
    let subscription = state.pool.subscribe(&caller.principal(), policy_id)?;
    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::new(policy_id, &subscription)),
    ))
}

/// Collects one premium from the caller
pub async fn pay_premium(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(policy_id): Path<u64>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let policy_id = PolicyId::new(policy_id);
    let subscription = state.pool.pay_premium(&caller.principal(), policy_id)?;
    Ok(Json(SubscriptionResponse::new(policy_id, &subscription)))
}

/// Cancels the caller's subscription
pub async fn cancel_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(policy_id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state
        .pool
        .cancel_subscription(&caller.principal(), PolicyId::new(policy_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Gets the caller's subscription, with lapse applied
pub async fn get_subscription(
    State(state): State<AppState>,
    Extension(caller): Extension<Claims>,
    Path(policy_id): Path<u64>,
) -> Result<Json<SubscriptionResponse>, ApiError> {
    let subscriber = caller.principal();
    let policy_id = PolicyId::new(policy_id);
    let subscription = state
        .pool
        .get_subscription(&subscriber, policy_id)
        .ok_or(BillingError::NotSubscribed {
            subscriber,
            policy_id,
        })?;
    Ok(Json(SubscriptionResponse::new(policy_id, &subscription)))
}

/// Current pool balance
pub async fn treasury(State(state): State<AppState>) -> Json<TreasuryResponse> {
    Json(TreasuryResponse {
        balance: state.pool.balance(),
    })
}
