//! Policy domain errors
//!
//! This module defines all error types that can occur within the
//! policy domain.

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{PolicyId, PortError};

/// Errors that can occur in the policy domain
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The user already holds a policy for this catalog entry
    #[error("Policy {0} is already held")]
    DuplicatePolicy(PolicyId),

    /// The user does not hold the referenced policy
    #[error("Policy {0} is not held by this policyholder")]
    PolicyNotHeld(PolicyId),

    /// No catalog entry carries the referenced id
    #[error("Catalog entry not found: {0}")]
    CatalogEntryNotFound(PolicyId),

    /// The premium plan is not one the catalog offers for the policy
    #[error("Premium plan ({premium} for {duration_months} months) is not offered for policy {policy_id}")]
    PlanNotOffered {
        policy_id: PolicyId,
        premium: Decimal,
        duration_months: u32,
    },

    /// A balance update would leave the policy outside 0..=sum_assured
    #[error("Balance {requested} outside 0..={sum_assured} for policy {policy_id}")]
    BalanceOutOfRange {
        policy_id: PolicyId,
        requested: Decimal,
        sum_assured: Decimal,
    },

    /// Policy data violates a record invariant
    #[error("Invalid policy: {0}")]
    InvalidPolicy(String),

    /// Persistence layer failure
    #[error("Persistence failure: {0}")]
    Persistence(#[from] PortError),
}

impl PolicyError {
    /// Creates an invalid policy error
    pub fn invalid(message: impl Into<String>) -> Self {
        PolicyError::InvalidPolicy(message.into())
    }
}
