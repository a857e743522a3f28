//! Strapi Party Adapter
//!
//! Backed by the users-permissions plugin: `auth/local` for login and
//! registration, `users/me` for token resolution, `users` for
//! administration. These endpoints return plain records rather than the
//! `{ data, meta }` envelope.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::instrument;

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, SessionContext, UserId};
use domain_party::{LoginOutcome, LoginRequest, PartyPort, RegistrationRequest, UserAccount};

use crate::client::StrapiClient;
use crate::envelope::{AuthResponse, BlockedUpdate, LoginBody, RegisterBody, UserRecord};

const USERS_PATH: &str = "/api/users";

#[derive(Debug, Clone)]
pub struct StrapiPartyAdapter {
    client: Arc<StrapiClient>,
}

impl StrapiPartyAdapter {
    pub fn new(client: Arc<StrapiClient>) -> Self {
        Self { client }
    }
}

impl DomainPort for StrapiPartyAdapter {}

#[async_trait]
impl HealthCheckable for StrapiPartyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.health_check().await
    }
}

#[async_trait]
impl PartyPort for StrapiPartyAdapter {
    #[instrument(skip_all, fields(identifier = %request.identifier))]
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, PortError> {
        let body = LoginBody {
            identifier: &request.identifier,
            password: &request.password,
        };
        let response: AuthResponse = self.client.post(None, "/api/auth/local", &body).await?;
        Ok(response.into_outcome()?)
    }

    #[instrument(skip_all, fields(username = %request.username))]
    async fn register(&self, request: &RegistrationRequest) -> Result<LoginOutcome, PortError> {
        let response: AuthResponse = self
            .client
            .post(None, "/api/auth/local/register", &RegisterBody::from(request))
            .await?;
        Ok(response.into_outcome()?)
    }

    #[instrument(skip_all)]
    async fn current_user(&self, token: &str) -> Result<UserAccount, PortError> {
        let record: UserRecord = self.client.get(Some(token), "/api/users/me", &[]).await?;
        Ok(record.into_account()?)
    }

    #[instrument(skip_all)]
    async fn list_users(&self, session: &SessionContext) -> Result<Vec<UserAccount>, PortError> {
        let records: Vec<UserRecord> = self.client.get(Some(session.token()), USERS_PATH, &[]).await?;
        records
            .into_iter()
            .map(|r| r.into_account().map_err(PortError::from))
            .collect()
    }

    #[instrument(skip_all, fields(user_id = %id))]
    async fn get_user(&self, session: &SessionContext, id: UserId) -> Result<UserAccount, PortError> {
        let path = format!("{USERS_PATH}/{}", id.get());
        let record: UserRecord = self
            .client
            .get(Some(session.token()), &path, &[])
            .await
            .map_err(|e| e.into_port_error("User", id))?;
        Ok(record.into_account()?)
    }

    #[instrument(skip_all, fields(user_id = %id, blocked = blocked))]
    async fn set_blocked(&self, session: &SessionContext, id: UserId, blocked: bool) -> Result<UserAccount, PortError> {
        let path = format!("{USERS_PATH}/{}", id.get());
        let record: UserRecord = self
            .client
            .put(Some(session.token()), &path, &BlockedUpdate { blocked })
            .await
            .map_err(|e| e.into_port_error("User", id))?;
        Ok(record.into_account()?)
    }
}
