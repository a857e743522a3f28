//! Claims handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};

use core_kernel::{ClaimId, SessionContext};
use domain_claims::ClaimSummary;

use crate::dto::claims::{ApprovalResponse, ClaimResponse, FileClaimRequest};
use crate::{error::ApiError, AppState};

/// Files a pending claim against one of the caller's policies
pub async fn file_claim(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Json(request): Json<FileClaimRequest>,
) -> Result<(StatusCode, Json<ClaimResponse>), ApiError> {
    let claim = state.claims.file_claim(&session, request).await?;
    Ok((StatusCode::CREATED, Json(claim.into())))
}

/// The caller's claims with their policy names
pub async fn my_claims(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<ClaimSummary>>, ApiError> {
    let claims = state.claims.my_claims(&session).await?;
    let catalog = state.policies.catalog(&session).await?;
    Ok(Json(ClaimSummary::from_claims(&claims, &catalog)))
}

/// Every claim, pending first
pub async fn list_claims(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<ClaimResponse>>, ApiError> {
    let claims = state.claims.list_claims(&session).await?;
    Ok(Json(claims.into_iter().map(ClaimResponse::from).collect()))
}

pub async fn approve(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
) -> Result<Json<ApprovalResponse>, ApiError> {
    let approval = state.claims.approve(&session, ClaimId::new(id)).await?;
    Ok(Json(approval.into()))
}

pub async fn reject(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
) -> Result<Json<ClaimResponse>, ApiError> {
    let claim = state.claims.reject(&session, ClaimId::new(id)).await?;
    Ok(Json(claim.into()))
}
