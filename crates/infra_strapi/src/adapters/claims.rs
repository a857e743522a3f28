//! Strapi Claims Adapter
//!
//! Claims are the `claims` content type:
//!
//! | operation | request |
//! |---|---|
//! | list | `GET /api/claims?pagination[page]=n&pagination[pageSize]=s` |
//! | read | `GET /api/claims/:id` |
//! | file | `POST /api/claims { data: { policyholder_id, policy_id, amount, status } }` |
//! | decide | `PUT /api/claims/:id { data: { status } }` |

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{instrument, warn};

use core_kernel::{ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError, SessionContext};
use domain_claims::{Claim, ClaimStatus, ClaimsPort, NewClaim};

use crate::client::StrapiClient;
use crate::envelope::{ClaimAttributes, Collection, DataBody, NewClaimAttributes, Single, StatusUpdate};
use crate::pagination::{fetch_all, page_query};

const CLAIMS_PATH: &str = "/api/claims";

#[derive(Debug, Clone)]
pub struct StrapiClaimsAdapter {
    client: Arc<StrapiClient>,
}

impl StrapiClaimsAdapter {
    pub fn new(client: Arc<StrapiClient>) -> Self {
        Self { client }
    }
}

impl DomainPort for StrapiClaimsAdapter {}

#[async_trait]
impl HealthCheckable for StrapiClaimsAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        self.client.health_check().await
    }
}

#[async_trait]
impl ClaimsPort for StrapiClaimsAdapter {
    #[instrument(skip_all, fields(request_id = %session.request_id()))]
    async fn list_claims(&self, session: &SessionContext) -> Result<Vec<Claim>, PortError> {
        let page_size = self.client.config().page_size;
        let entries = fetch_all(|page| {
            let query = page_query(page, page_size);
            async move {
                self.client
                    .get::<Collection<Value>>(Some(session.token()), CLAIMS_PATH, &query)
                    .await
            }
        })
        .await?;

        // Malformed records are skipped; the CMS accepts anything.
        let claims = entries
            .into_iter()
            .filter_map(|entry| {
                let id = entry.id;
                match entry.decode_claim() {
                    Ok(claim) => Some(claim),
                    Err(e) => {
                        warn!(claim_id = id, error = %e, "Skipping unreadable claim record");
                        None
                    }
                }
            })
            .collect();
        Ok(claims)
    }

    #[instrument(skip_all, fields(claim_id = %id))]
    async fn get_claim(&self, session: &SessionContext, id: ClaimId) -> Result<Claim, PortError> {
        let path = format!("{CLAIMS_PATH}/{}", id.get());
        let single: Single<ClaimAttributes> = self
            .client
            .get(Some(session.token()), &path, &[])
            .await
            .map_err(|e| e.into_port_error("Claim", id))?;
        Ok(single.data.into_claim()?)
    }

    #[instrument(skip_all, fields(policyholder = %claim.policyholder_id, policy_id = %claim.policy_id))]
    async fn create_claim(&self, session: &SessionContext, claim: &NewClaim) -> Result<Claim, PortError> {
        let body = DataBody { data: NewClaimAttributes::from(claim) };
        let single: Single<ClaimAttributes> = self
            .client
            .post(Some(session.token()), CLAIMS_PATH, &body)
            .await?;
        Ok(single.data.into_claim()?)
    }

    #[instrument(skip_all, fields(claim_id = %id, status = %status))]
    async fn set_claim_status(
        &self,
        session: &SessionContext,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, PortError> {
        let path = format!("{CLAIMS_PATH}/{}", id.get());
        let body = DataBody { data: StatusUpdate { status } };
        let single: Single<ClaimAttributes> = self
            .client
            .put(Some(session.token()), &path, &body)
            .await
            .map_err(|e| e.into_port_error("Claim", id))?;
        Ok(single.data.into_claim()?)
    }
}
