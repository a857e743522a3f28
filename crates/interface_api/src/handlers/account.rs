//! Login, registration and profile handlers

use axum::{extract::State, http::StatusCode, Extension, Json};

use core_kernel::SessionContext;
use domain_party::{LoginRequest, RegistrationRequest};

use crate::dto::account::{LoginResponse, ProfileResponse};
use crate::{error::ApiError, AppState};

/// Exchanges credentials for a CMS token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let outcome = state.accounts.login(request).await?;
    Ok(Json(outcome.into()))
}

/// Creates a regular account and logs it in
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegistrationRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), ApiError> {
    let outcome = state.accounts.register(request).await?;
    Ok((StatusCode::CREATED, Json(outcome.into())))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let account = state.accounts.profile(&session).await?;
    Ok(Json(account.into()))
}
