//! Claims Domain Ports

use async_trait::async_trait;

use core_kernel::{ClaimId, DomainPort, PortError, SessionContext};

use crate::claim::{Claim, ClaimStatus, NewClaim};

/// Access to claim records in the system of record
#[async_trait]
pub trait ClaimsPort: DomainPort {
    /// Returns every claim, across all pages, in backend order
    async fn list_claims(&self, session: &SessionContext) -> Result<Vec<Claim>, PortError>;

    /// Reads one claim
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when no claim has `id`.
    async fn get_claim(&self, session: &SessionContext, id: ClaimId) -> Result<Claim, PortError>;

    /// Files a claim in pending status
    async fn create_claim(&self, session: &SessionContext, claim: &NewClaim) -> Result<Claim, PortError>;

    /// Overwrites the status of a claim and returns the stored record
    async fn set_claim_status(
        &self,
        session: &SessionContext,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, PortError>;
}
