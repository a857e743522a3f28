//! Policy Domain Ports
//!
//! The policy domain needs two things from the system of record: the
//! policies embedded in an account, and the catalog they are bought from.
//!
//! ```rust,ignore
//! pub struct PolicyService {
//!     holders: Arc<dyn PolicyHolderPort>,
//!     catalog: Arc<dyn CatalogPort>,
//! }
//! ```

use async_trait::async_trait;

use core_kernel::{DomainPort, PortError, SessionContext, Username};

use crate::catalog::CatalogEntry;
use crate::policy::Policy;

/// Access to the policy collection embedded in an account
#[async_trait]
pub trait PolicyHolderPort: DomainPort {
    /// Reads the holder's policies in stored order
    ///
    /// # Errors
    ///
    /// `PortError::NotFound` when no account carries the username.
    async fn get_policies(
        &self,
        session: &SessionContext,
        holder: &Username,
    ) -> Result<Vec<Policy>, PortError>;

    /// Replaces the holder's whole policy collection
    async fn set_policies(
        &self,
        session: &SessionContext,
        holder: &Username,
        policies: &[Policy],
    ) -> Result<(), PortError>;
}

/// Read access to the policy catalog
#[async_trait]
pub trait CatalogPort: DomainPort {
    /// Returns every catalog entry, across all pages
    async fn list_catalog(&self, session: &SessionContext) -> Result<Vec<CatalogEntry>, PortError>;
}
