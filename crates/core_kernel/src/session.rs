//! Explicit session context
//!
//! Every port call that touches the CMS on behalf of a user receives the
//! session it runs under. The context is resolved once per request from the
//! bearer token and handed down; nothing reads credentials from ambient
//! state.

use std::fmt;

use uuid::Uuid;

use crate::identifiers::{UserId, Username};

/// Authenticated caller of a desk operation
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    token: String,
    user_id: UserId,
    username: Username,
    is_admin: bool,
    request_id: Uuid,
}

impl SessionContext {
    /// Creates a session for an authenticated user
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token issued by the CMS
    /// * `user_id` - CMS key of the user
    /// * `username` - Login name, used as the policyholder key on claims
    /// * `is_admin` - Whether the user may settle claims and manage users
    pub fn new(token: impl Into<String>, user_id: UserId, username: Username, is_admin: bool) -> Self {
        Self {
            token: token.into(),
            user_id,
            username,
            is_admin,
            request_id: Uuid::now_v7(),
        }
    }

    /// Replaces the generated correlation id
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn username(&self) -> &Username {
        &self.username
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    /// Correlation id for tracing one request across adapter calls
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }
}

// The bearer token never reaches logs.
impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("user_id", &self.user_id)
            .field("username", &self.username)
            .field("is_admin", &self.is_admin)
            .field("request_id", &self.request_id)
            .finish_non_exhaustive()
    }
}
