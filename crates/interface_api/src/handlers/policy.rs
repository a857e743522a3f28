//! Held policy handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{PolicyId, SessionContext};

use crate::dto::policy::{ChangePlanRequest, PolicyResponse, PurchaseRequest};
use crate::{error::ApiError, AppState};

pub async fn held_policies(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<PolicyResponse>>, ApiError> {
    let policies = state.policies.held_policies(&session).await?;
    Ok(Json(policies.into_iter().map(PolicyResponse::from).collect()))
}

/// Buys a catalog policy on one of its plans
pub async fn purchase(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<PurchaseRequest>,
) -> Result<(StatusCode, Json<PolicyResponse>), ApiError> {
    let policy = state
        .policies
        .purchase(&session, request.policy_id, request.plan())
        .await?;
    Ok((StatusCode::CREATED, Json(policy.into())))
}

pub async fn change_plan(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
    Json(request): Json<ChangePlanRequest>,
) -> Result<Json<PolicyResponse>, ApiError> {
    let policy = state
        .policies
        .change_plan(&session, PolicyId::new(id), request.plan())
        .await?;
    Ok(Json(policy.into()))
}

pub async fn remove(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
) -> Result<StatusCode, ApiError> {
    state.policies.remove(&session, PolicyId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
