//! Kernel errors

use thiserror::Error;

/// Errors raised while building kernel values from untrusted input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A textual identifier did not hold a CMS key
    #[error("Invalid {kind} identifier: '{value}'")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("Invalid username: {0}")]
    InvalidUsername(String),
}

impl CoreError {
    pub fn invalid_identifier(kind: &'static str, value: impl Into<String>) -> Self {
        CoreError::InvalidIdentifier {
            kind,
            value: value.into(),
        }
    }
}
