//! Strapi Policy Adapter
//!
//! Held policies live in the `policies` JSON field of the owner's user
//! record. The owner is found by username, then the field is replaced with
//! `PUT /api/users/:id`. The catalog is the paginated `policies` content
//! type.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{DomainPort, HealthCheckResult, HealthCheckable, PortError, SessionContext, Username};
use domain_policy::{CatalogEntry, CatalogPort, Policy, PolicyHolderPort};

use crate::client::StrapiClient;
use crate::envelope::{CatalogAttributes, Collection, PoliciesUpdate, UserRecord, WirePolicy};
use crate::pagination::{fetch_all, page_query};

const CATALOG_PATH: &str = "/api/policies";
const USERS_PATH: &str = "/api/users";

#[derive(Debug, Clone)]
pub struct StrapiPolicyAdapter {
    client: Arc<StrapiClient>,
}

impl StrapiPolicyAdapter {
    pub fn new(client: Arc<StrapiClient>) -> Self {
        Self { client }
    }

    /// Finds the user record carrying `holder`
    async fn find_holder(&self, session: &SessionContext, holder: &Username) -> Result<UserRecord, PortError> {
        let query = [("filters[username][$eq]", holder.to_string())];
        let users: Vec<UserRecord> = self
            .client
            .get(Some(session.token()), USERS_PATH, &query)
            .await?;

        users
            .into_iter()
            .find(|u| u.username == holder.as_str())
            .ok_or_else(|| PortError::not_found("User", holder))
    }
}

impl DomainPort for StrapiPolicyAdapter {}

#[async_trait]
impl HealthCheckable for StrapiPolicyAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.health_check().await
    }
}

#[async_trait]
impl PolicyHolderPort for StrapiPolicyAdapter {
    #[instrument(skip_all, fields(policyholder = %holder))]
    async fn get_policies(&self, session: &SessionContext, holder: &Username) -> Result<Vec<Policy>, PortError> {
        let record = self.find_holder(session, holder).await?;
        Ok(record
            .policies
            .unwrap_or_default()
            .into_iter()
            .map(Policy::from)
            .collect())
    }

    #[instrument(skip_all, fields(policyholder = %holder, count = policies.len()))]
    async fn set_policies(
        &self,
        session: &SessionContext,
        holder: &Username,
        policies: &[Policy],
    ) -> Result<(), PortError> {
        let record = self.find_holder(session, holder).await?;
        let path = format!("{USERS_PATH}/{}", record.id);
        let body = PoliciesUpdate {
            policies: policies.iter().map(WirePolicy::from).collect(),
        };

        let _: serde_json::Value = self
            .client
            .put(Some(session.token()), &path, &body)
            .await
            .map_err(|e| e.into_port_error("User", record.id))?;
        debug!(user_id = record.id, "Policies replaced");
        Ok(())
    }
}

#[async_trait]
impl CatalogPort for StrapiPolicyAdapter {
    #[instrument(skip_all)]
    async fn list_catalog(&self, session: &SessionContext) -> Result<Vec<CatalogEntry>, PortError> {
        let page_size = self.client.config().page_size;
        let entries = fetch_all(|page| {
            let query = page_query(page, page_size);
            async move {
                self.client
                    .get::<Collection<CatalogAttributes>>(Some(session.token()), CATALOG_PATH, &query)
                    .await
            }
        })
        .await?;

        Ok(entries.into_iter().map(|e| e.into_catalog_entry()).collect())
    }
}
