//! Account domain errors

use thiserror::Error;
use validator::ValidationErrors;

use core_kernel::{PortError, UserId, Username};

/// Errors that can occur in the account domain
#[derive(Debug, Error)]
pub enum PartyError {
    /// Identifier or password rejected by the CMS
    #[error("Invalid identifier or password")]
    InvalidCredentials,

    /// Missing, expired or unknown bearer token
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Account {0} is blocked")]
    AccountBlocked(Username),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    /// Administrators cannot be blocked from the desk
    #[error("User {0} is an administrator and cannot be managed")]
    ProtectedAccount(UserId),

    /// Username or email already taken, or otherwise refused by the CMS
    #[error("Registration refused: {0}")]
    RegistrationRefused(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),
}

impl From<ValidationErrors> for PartyError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let reasons: Vec<String> = errs
                    .iter()
                    .map(|e| e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()))
                    .collect();
                format!("{field}: {}", reasons.join(", "))
            })
            .collect();
        fields.sort();
        PartyError::Validation(fields.join("; "))
    }
}
