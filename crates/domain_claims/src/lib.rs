//! Claims Management Domain
//!
//! This crate implements claim filing and settlement. A claim draws down the
//! remaining balance of one policy held by the claimant.
//!
//! # Claim Lifecycle
//!
//! ```text
//! Pending -(approve)-> Approved
//!         -(reject)--> Rejected
//! ```
//!
//! Approval runs the [`settlement`] evaluator against the claimant's policy
//! and, on success, writes the reduced balance and the new claim status.
//! Rejection never touches a policy.

pub mod claim;
pub mod listing;
pub mod settlement;
pub mod filing;
pub mod lifecycle;
pub mod ports;
pub mod error;

pub use claim::{Claim, ClaimStatus, NewClaim};
pub use listing::{ClaimSummary, sort_by_status};
pub use settlement::Settlement;
pub use filing::FileClaimRequest;
pub use lifecycle::{Approval, ClaimLifecycleController};
pub use ports::ClaimsPort;
pub use error::ClaimError;
