//! Strapi transport errors
//!
//! Errors stay transport-shaped inside this crate and are translated to
//! [`PortError`] at the adapter boundary:
//!
//! | response | port error |
//! |---|---|
//! | 400 | `Validation` |
//! | 401 | `Unauthorized` |
//! | 403 | `Forbidden` |
//! | 404 | `NotFound` |
//! | 409 | `Conflict` |
//! | 429 | `RateLimited` |
//! | 5xx | `ServiceUnavailable` |
//! | timeout | `Timeout` |
//! | unreadable body | `Transformation` |

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur talking to the CMS
#[derive(Debug, Error)]
pub enum StrapiError {
    /// Connection refused, DNS failure, TLS failure
    #[error("Request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Request to {path} timed out after {timeout_ms}ms")]
    Timeout { path: String, timeout_ms: u64 },

    /// The CMS answered with a non-success status
    #[error("{path} answered {status}: {message}")]
    Status {
        path: String,
        status: StatusCode,
        message: String,
        retry_after_secs: Option<u64>,
    },

    /// The body did not have the expected shape
    #[error("Unexpected response from {path}: {message}")]
    Decode { path: String, message: String },

    /// The HTTP client could not be built
    #[error("Invalid client configuration: {0}")]
    Configuration(String),
}

impl StrapiError {
    pub fn decode(path: impl Into<String>, message: impl Into<String>) -> Self {
        StrapiError::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Status code of the response, when there was one
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            StrapiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Converts to a port error, naming the entity for 404 responses
    pub fn into_port_error(self, entity_type: &str, id: impl std::fmt::Display) -> PortError {
        match self {
            StrapiError::Status { status: StatusCode::NOT_FOUND, .. } => PortError::not_found(entity_type, id),
            other => other.into(),
        }
    }
}

impl From<StrapiError> for PortError {
    fn from(error: StrapiError) -> Self {
        match error {
            StrapiError::Transport { path, source } => PortError::Connection {
                message: format!("request to {path} failed"),
                source: Some(Box::new(source)),
            },
            StrapiError::Timeout { path, timeout_ms } => PortError::Timeout {
                operation: path,
                duration_ms: timeout_ms,
            },
            StrapiError::Status { path, status, message, retry_after_secs } => match status {
                StatusCode::BAD_REQUEST => PortError::validation(message),
                StatusCode::UNAUTHORIZED => PortError::unauthorized(message),
                StatusCode::FORBIDDEN => PortError::Forbidden { message },
                StatusCode::NOT_FOUND => PortError::not_found("Resource", path),
                StatusCode::CONFLICT => PortError::conflict(message),
                StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
                    retry_after_secs: retry_after_secs.unwrap_or(1),
                },
                s if s.is_server_error() => PortError::ServiceUnavailable {
                    service: format!("strapi ({s}): {message}"),
                },
                s => PortError::internal(format!("{path} answered {s}: {message}")),
            },
            StrapiError::Decode { path, message } => {
                PortError::transformation(format!("{path}: {message}"))
            }
            StrapiError::Configuration(message) => PortError::internal(message),
        }
    }
}

/// Error body returned by Strapi v4
///
/// ```text
/// { "data": null, "error": { "status": 400, "name": "ValidationError", "message": "..." } }
/// ```
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub name: Option<String>,
    pub message: String,
}

/// Best-effort message for a failed response body
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { error: ErrorDetail { name: Some(name), message } }) => format!("{name}: {message}"),
        Ok(ErrorBody { error: ErrorDetail { name: None, message } }) => message,
        Err(_) if body.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("no response body")
            .to_string(),
        Err(_) => body.chars().take(200).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_error(status: StatusCode) -> StrapiError {
        StrapiError::Status {
            path: "/api/claims/4".to_string(),
            status,
            message: "boom".to_string(),
            retry_after_secs: None,
        }
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(PortError::from(status_error(StatusCode::BAD_REQUEST)), PortError::Validation { .. }));
        assert!(matches!(PortError::from(status_error(StatusCode::UNAUTHORIZED)), PortError::Unauthorized { .. }));
        assert!(matches!(PortError::from(status_error(StatusCode::FORBIDDEN)), PortError::Forbidden { .. }));
        assert!(PortError::from(status_error(StatusCode::NOT_FOUND)).is_not_found());
        assert!(matches!(PortError::from(status_error(StatusCode::CONFLICT)), PortError::Conflict { .. }));
        assert!(matches!(
            PortError::from(status_error(StatusCode::TOO_MANY_REQUESTS)),
            PortError::RateLimited { retry_after_secs: 1 }
        ));
        let unavailable = PortError::from(status_error(StatusCode::BAD_GATEWAY));
        assert!(matches!(unavailable, PortError::ServiceUnavailable { .. }));
        assert!(unavailable.is_transient());
    }

    #[test]
    fn test_not_found_names_entity() {
        let error = status_error(StatusCode::NOT_FOUND).into_port_error("Claim", "CLM-4");
        assert!(error.to_string().contains("Claim"));
        assert!(error.to_string().contains("CLM-4"));
    }

    #[test]
    fn test_error_message_from_strapi_body() {
        let body = r#"{"data":null,"error":{"status":400,"name":"ValidationError","message":"Email or Username are already taken","details":{}}}"#;
        assert_eq!(
            error_message(StatusCode::BAD_REQUEST, body),
            "ValidationError: Email or Username are already taken"
        );
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
        assert_eq!(error_message(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
    }
}
