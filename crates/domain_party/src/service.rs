//! Account service

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use core_kernel::{PortError, SessionContext, UserId};

use crate::account::UserAccount;
use crate::error::PartyError;
use crate::ports::PartyPort;
use crate::registration::{LoginOutcome, LoginRequest, RegistrationRequest};

/// Login, registration, session resolution and user administration
#[derive(Clone)]
pub struct AccountService {
    party: Arc<dyn PartyPort>,
}

impl AccountService {
    pub fn new(party: Arc<dyn PartyPort>) -> Self {
        Self { party }
    }

    /// Validates credentials with the CMS
    ///
    /// Blocked accounts are refused here as well as at session resolution.
    pub async fn login(&self, request: LoginRequest) -> Result<LoginOutcome, PartyError> {
        request.validate()?;

        let outcome = self.party.login(&request).await.map_err(|e| match e {
            PortError::Unauthorized { .. } | PortError::Validation { .. } => PartyError::InvalidCredentials,
            other => PartyError::Persistence(other),
        })?;

        if outcome.user.blocked {
            warn!(username = %outcome.user.username, "Login refused for blocked account");
            return Err(PartyError::AccountBlocked(outcome.user.username));
        }
        info!(username = %outcome.user.username, is_admin = outcome.user.is_admin, "User logged in");
        Ok(outcome)
    }

    pub async fn register(&self, request: RegistrationRequest) -> Result<LoginOutcome, PartyError> {
        request.validate()?;

        let outcome = self.party.register(&request).await.map_err(|e| match e {
            PortError::Validation { message, .. } | PortError::Conflict { message } => {
                PartyError::RegistrationRefused(message)
            }
            other => PartyError::Persistence(other),
        })?;

        info!(username = %outcome.user.username, user_id = %outcome.user.id, "User registered");
        Ok(outcome)
    }

    /// Turns a bearer token into a session
    ///
    /// # Errors
    ///
    /// * `Unauthenticated` - the CMS does not recognise the token
    /// * `AccountBlocked` - the token belongs to a blocked account
    pub async fn session_for_token(&self, token: &str) -> Result<SessionContext, PartyError> {
        let account = self.party.current_user(token).await.map_err(|e| match e {
            PortError::Unauthorized { .. } | PortError::Forbidden { .. } => PartyError::Unauthenticated,
            other => PartyError::Persistence(other),
        })?;
        account.open_session(token)
    }

    /// Account of the session user, held policies included
    pub async fn profile(&self, session: &SessionContext) -> Result<UserAccount, PartyError> {
        Ok(self.party.current_user(session.token()).await?)
    }

    /// Accounts an administrator may block or unblock
    pub async fn manageable_users(&self, session: &SessionContext) -> Result<Vec<UserAccount>, PartyError> {
        let users = self.party.list_users(session).await?;
        Ok(users.into_iter().filter(UserAccount::is_manageable).collect())
    }

    /// Blocks or unblocks a regular account
    ///
    /// # Errors
    ///
    /// * `UserNotFound` - no account has `id`
    /// * `ProtectedAccount` - the account is an administrator
    pub async fn set_blocked(
        &self,
        session: &SessionContext,
        id: UserId,
        blocked: bool,
    ) -> Result<UserAccount, PartyError> {
        let target = self.party.get_user(session, id).await.map_err(|e| {
            if e.is_not_found() {
                PartyError::UserNotFound(id)
            } else {
                PartyError::Persistence(e)
            }
        })?;
        if !target.is_manageable() {
            return Err(PartyError::ProtectedAccount(id));
        }

        let updated = self.party.set_blocked(session, id, blocked).await?;
        info!(
            user_id = %id,
            username = %updated.username,
            blocked,
            by = %session.username(),
            "User block status changed"
        );
        Ok(updated)
    }
}
