//! Bearer tokens and admin authorization
//!
//! Tokens are issued and verified by the CMS; the desk only carries them.

use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
    Extension,
};
use tracing::warn;

use core_kernel::SessionContext;

use crate::error::ApiError;

/// Extracts the token from an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Fails unless the session belongs to an administrator
pub fn require_admin(session: &SessionContext) -> Result<(), ApiError> {
    if session.is_admin() {
        Ok(())
    } else {
        warn!(user = %session.username(), "Admin route refused");
        Err(ApiError::Forbidden("Administrator access required".to_string()))
    }
}

/// Route layer guarding the admin routes
///
/// Runs after the session middleware, which inserts the [`SessionContext`].
pub async fn admin_middleware(
    Extension(session): Extension<SessionContext>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    require_admin(&session)?;
    Ok(next.run(request).await)
}
