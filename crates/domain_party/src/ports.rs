//! Account Domain Ports

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, SessionContext, UserId};

use crate::account::UserAccount;
use crate::registration::{LoginOutcome, LoginRequest, RegistrationRequest};

/// Access to accounts and authentication in the CMS
///
/// Login and registration run without a session; they are what produces
/// one.
#[async_trait]
pub trait PartyPort: DomainPort {
    /// Exchanges credentials for a token
    ///
    /// # Errors
    ///
    /// `PortError::Unauthorized` or `PortError::Validation` when the
    /// credentials are refused.
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, PortError>;

    /// Creates a regular, unblocked account with no policies
    async fn register(&self, request: &RegistrationRequest) -> Result<LoginOutcome, PortError>;

    /// Resolves the account a token belongs to
    async fn current_user(&self, token: &str) -> Result<UserAccount, PortError>;

    /// Every account, administrators included
    async fn list_users(&self, session: &SessionContext) -> Result<Vec<UserAccount>, PortError>;

    async fn get_user(&self, session: &SessionContext, id: UserId) -> Result<UserAccount, PortError>;

    /// Sets the blocked flag and returns the stored account
    async fn set_blocked(
        &self,
        session: &SessionContext,
        id: UserId,
        blocked: bool,
    ) -> Result<UserAccount, PortError>;
}
