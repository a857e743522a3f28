//! API error handling
//!
//! Domain errors are converted here, so handlers can use `?` on every
//! service call and still answer with the right status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_claims::ClaimError;
use domain_party::PartyError;
use domain_policy::PolicyError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The claim asks for more than the policy has left
    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    /// The CMS failed or answered with something unusable
    #[error("Upstream error: {message}")]
    BadGateway {
        message: String,
        details: Option<Value>,
    },

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Validation(_) | ApiError::InsufficientBalance { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "not_found",
            ApiError::Unauthorized(_) => "unauthorized",
            ApiError::Forbidden(_) => "forbidden",
            ApiError::Conflict(_) => "conflict",
            ApiError::Validation(_) => "validation_error",
            ApiError::InsufficientBalance { .. } => "insufficient_balance",
            ApiError::BadGateway { .. } => "upstream_error",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    fn upstream(err: impl std::fmt::Display) -> Self {
        ApiError::BadGateway {
            message: err.to_string(),
            details: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_type = self.error_type();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let (message, details) = match self {
            ApiError::InsufficientBalance { requested, available } => (
                "Claim amount exceeds the remaining balance".to_string(),
                Some(json!({ "requested": requested, "available": available })),
            ),
            ApiError::BadGateway { message, details } => (message, details),
            ApiError::NotFound(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg)
            | ApiError::Validation(msg)
            | ApiError::ServiceUnavailable(msg) => (msg, None),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        match &err {
            PortError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            PortError::Validation { .. } => ApiError::Validation(err.to_string()),
            PortError::Conflict { .. } => ApiError::Conflict(err.to_string()),
            PortError::Unauthorized { .. } => ApiError::Unauthorized(err.to_string()),
            PortError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            PortError::RateLimited { .. } => ApiError::ServiceUnavailable(err.to_string()),
            PortError::Connection { .. }
            | PortError::Timeout { .. }
            | PortError::ServiceUnavailable { .. }
            | PortError::Transformation { .. }
            | PortError::Internal { .. } => ApiError::upstream(&err),
        }
    }
}

impl From<PolicyError> for ApiError {
    fn from(err: PolicyError) -> Self {
        match err {
            PolicyError::Persistence(e) => e.into(),
            PolicyError::DuplicatePolicy(_) => ApiError::Conflict(err.to_string()),
            PolicyError::PolicyNotHeld(_) | PolicyError::CatalogEntryNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            PolicyError::PlanNotOffered { .. }
            | PolicyError::BalanceOutOfRange { .. }
            | PolicyError::InvalidPolicy(_) => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::InsufficientBalance { requested, available } => {
                ApiError::InsufficientBalance { requested, available }
            }
            ClaimError::Policy(e) => e.into(),
            ClaimError::PersistenceFailure(e) => e.into(),
            ClaimError::ClaimNotFound(_) | ClaimError::PolicyNotFound { .. } => {
                ApiError::NotFound(err.to_string())
            }
            ClaimError::InvalidStatusTransition { .. } => ApiError::Conflict(err.to_string()),
            ClaimError::InvalidAmount(_) => ApiError::Validation(err.to_string()),
            ClaimError::SettlementIncomplete {
                claim_id,
                ref policyholder,
                policy_id,
                amount,
                ..
            } => ApiError::BadGateway {
                details: Some(json!({
                    "claim_id": claim_id,
                    "policyholder": policyholder,
                    "policy_id": policy_id,
                    "amount": amount,
                })),
                message: err.to_string(),
            },
        }
    }
}

impl From<PartyError> for ApiError {
    fn from(err: PartyError) -> Self {
        match err {
            PartyError::Persistence(e) => e.into(),
            PartyError::InvalidCredentials | PartyError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            PartyError::AccountBlocked(_) => ApiError::Forbidden(err.to_string()),
            PartyError::ProtectedAccount(_) => ApiError::Conflict(err.to_string()),
            PartyError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            PartyError::RegistrationRefused(_) => ApiError::Conflict(err.to_string()),
            PartyError::Validation(_) => ApiError::Validation(err.to_string()),
        }
    }
}
