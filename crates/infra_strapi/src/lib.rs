//! Strapi Infrastructure Layer
//!
//! Every domain port is backed by a Strapi v4 instance reached over REST.
//! The CMS owns authentication: the bearer token carried by a
//! [`SessionContext`](core_kernel::SessionContext) is forwarded unchanged on
//! each request.
//!
//! # Wire shapes
//!
//! Content-type collections (`claims`, `policies`) use the v4 envelope:
//!
//! ```text
//! { "data": [ { "id": 1, "attributes": { ... } } ],
//!   "meta": { "pagination": { "page": 1, "pageSize": 100, "pageCount": 3, "total": 250 } } }
//! ```
//!
//! The users-permissions endpoints (`users`, `auth/local`) return plain
//! records. Held policies are a JSON field on the user record and can only
//! be replaced as a whole.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_strapi::{StrapiBackend, StrapiConfig};
//!
//! let backend = StrapiBackend::connect(StrapiConfig::new("http://localhost:1337"))?;
//! let controller = ClaimLifecycleController::new(backend.claims(), backend.policies(), locks);
//! ```

pub mod config;
pub mod error;
pub mod envelope;
pub mod pagination;
pub mod client;
pub mod adapters;

use std::sync::Arc;

pub use config::StrapiConfig;
pub use error::StrapiError;
pub use client::StrapiClient;
pub use adapters::{StrapiClaimsAdapter, StrapiPartyAdapter, StrapiPolicyAdapter};

/// The three adapters over one shared HTTP client
#[derive(Debug, Clone)]
pub struct StrapiBackend {
    client: Arc<StrapiClient>,
}

impl StrapiBackend {
    /// Builds the HTTP client; no request is made
    pub fn connect(config: StrapiConfig) -> Result<Self, StrapiError> {
        Ok(Self {
            client: Arc::new(StrapiClient::new(config)?),
        })
    }

    pub fn client(&self) -> Arc<StrapiClient> {
        self.client.clone()
    }

    pub fn claims(&self) -> Arc<StrapiClaimsAdapter> {
        Arc::new(StrapiClaimsAdapter::new(self.client.clone()))
    }

    pub fn policies(&self) -> Arc<StrapiPolicyAdapter> {
        Arc::new(StrapiPolicyAdapter::new(self.client.clone()))
    }

    pub fn party(&self) -> Arc<StrapiPartyAdapter> {
        Arc::new(StrapiPartyAdapter::new(self.client.clone()))
    }
}
