//! User account record

use serde::{Deserialize, Serialize};

use core_kernel::{SessionContext, UserId, Username};
use domain_policy::Policy;

use crate::error::PartyError;

/// A user account as stored by the CMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    pub username: Username,
    pub email: String,
    pub age: Option<u32>,
    /// Blocked accounts cannot open a session
    pub blocked: bool,
    pub is_admin: bool,
    /// Held policies, in purchase order
    #[serde(default)]
    pub policies: Vec<Policy>,
}

impl UserAccount {
    /// Whether an administrator may block or unblock the account
    pub fn is_manageable(&self) -> bool {
        !self.is_admin
    }

    /// Opens a session for the account under `token`
    ///
    /// # Errors
    ///
    /// `AccountBlocked` when the account is blocked.
    pub fn open_session(&self, token: impl Into<String>) -> Result<SessionContext, PartyError> {
        if self.blocked {
            return Err(PartyError::AccountBlocked(self.username.clone()));
        }
        Ok(SessionContext::new(token, self.id, self.username.clone(), self.is_admin))
    }
}
