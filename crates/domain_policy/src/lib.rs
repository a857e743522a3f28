//! Policy Domain
//!
//! This crate holds the rules for the policies a user owns and the catalog
//! they are bought from. Held policies are not independent records: they are
//! embedded, in order, in the owning account, and the CMS only supports
//! replacing that collection as a whole. Every mutation therefore follows
//! the same shape:
//!
//! ```text
//! re-read collection -> mutate PolicyPortfolio -> write collection back
//! ```
//!
//! Writes for one policyholder are serialised through [`HolderLocks`] so the
//! claims controller and the policy service never interleave their
//! read-modify-write cycles inside one process.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_policy::{PolicyService, PremiumPlan};
//!
//! let service = PolicyService::new(holders, catalog, locks);
//! let policy = service.purchase(&session, catalog_id, plan).await?;
//! assert_eq!(policy.left_amount, policy.sum_assured);
//! ```

pub mod policy;
pub mod portfolio;
pub mod catalog;
pub mod locks;
pub mod ports;
pub mod services;
pub mod error;

pub use policy::{Policy, PremiumPlan};
pub use portfolio::PolicyPortfolio;
pub use catalog::{CatalogEntry, CatalogPolicy, PolicyCatalog, UNKNOWN_POLICY_NAME};
pub use locks::HolderLocks;
pub use ports::{CatalogPort, PolicyHolderPort};
pub use services::PolicyService;
pub use error::PolicyError;
