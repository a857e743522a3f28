//! API middleware

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use core_kernel::SessionContext;

use crate::auth::bearer_token;
use crate::error::ApiError;
use crate::AppState;

/// Session middleware
///
/// Resolves the bearer token through the CMS and adds the resulting
/// [`SessionContext`] to the request extensions. The session takes its
/// request id from `x-request-id` when the header holds a UUID. Blocked
/// accounts are refused here.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(token) = bearer_token(request.headers()).map(str::to_owned) else {
        warn!(uri = %request.uri(), "Missing or invalid Authorization header");
        return Err(ApiError::Unauthorized("Bearer token required".to_string()));
    };

    let session = state.accounts.session_for_token(&token).await.map_err(|e| {
        warn!(error = %e, "Session resolution failed");
        ApiError::from(e)
    })?;

    let session = match correlation_id(&request) {
        Some(id) => session.with_request_id(id),
        None => session,
    };

    request.extensions_mut().insert(session);
    Ok(next.run(request).await)
}

fn correlation_id(request: &Request<Body>) -> Option<Uuid> {
    request
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| Uuid::parse_str(v).ok())
}

/// Audit logging middleware
///
/// Logs every API request with the user it ran for
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let (user, request_id) = request
        .extensions()
        .get::<SessionContext>()
        .map(|s| (s.username().to_string(), s.request_id().to_string()))
        .unwrap_or_else(|| ("anonymous".to_string(), String::new()));

    let start = Utc::now();

    let response = next.run(request).await;

    let duration = Utc::now() - start;
    let status = response.status();

    info!(
        method = %method,
        uri = %uri,
        user = %user,
        request_id = %request_id,
        status = %status.as_u16(),
        duration_ms = duration.num_milliseconds(),
        "API request"
    );

    response
}
