//! Registration and login requests

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::account::UserAccount;

/// Sign-up form
#[derive(Clone, Deserialize, Validate)]
pub struct RegistrationRequest {
    #[validate(length(min = 3, max = 64, message = "must be between 3 and 64 characters"))]
    pub username: String,
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
    #[validate(range(min = 18, max = 120, message = "must be between 18 and 120"))]
    pub age: Option<u32>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"[redacted]")
            .field("age", &self.age)
            .finish()
    }
}

/// Login form; `identifier` is a username or an email
#[derive(Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub identifier: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub password: String,
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Token and account returned by a successful login or registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginOutcome {
    pub token: String,
    pub user: UserAccount,
}
