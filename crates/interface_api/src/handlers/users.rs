//! User management handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use core_kernel::{SessionContext, UserId};

use crate::dto::account::UserResponse;
use crate::dto::users::SetBlockedRequest;
use crate::{error::ApiError, AppState};

/// Accounts an administrator may manage
pub async fn list_users(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = state.accounts.manageable_users(&session).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn set_blocked(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
    Json(request): Json<SetBlockedRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state
        .accounts
        .set_blocked(&session, UserId::new(id), request.blocked)
        .await?;
    Ok(Json(user.into()))
}
