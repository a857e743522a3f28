//! Claims domain errors

use rust_decimal::Decimal;
use thiserror::Error;

use core_kernel::{ClaimId, PolicyId, PortError, Username};
use domain_policy::PolicyError;

use crate::claim::ClaimStatus;

/// Errors that can occur in the claims domain
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(ClaimId),

    /// The claimant holds no policy with the referenced id
    #[error("Policy {policy_id} not found for policyholder {policyholder}")]
    PolicyNotFound {
        policyholder: Username,
        policy_id: PolicyId,
    },

    /// Business-rule rejection; nothing was written
    #[error("Claim amount ({requested}) exceeds the remaining balance ({available})")]
    InsufficientBalance {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Invalid status transition for claim {claim_id} from {from} to {to}")]
    InvalidStatusTransition {
        claim_id: ClaimId,
        from: ClaimStatus,
        to: ClaimStatus,
    },

    #[error("Invalid claim amount: {0}")]
    InvalidAmount(String),

    /// Policy record rejected a balance update
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Transport or storage failure; the operation's writes did not happen
    /// or were compensated
    #[error("Persistence failure: {0}")]
    PersistenceFailure(#[from] PortError),

    /// The policy balance was written but neither the claim status write nor
    /// the balance compensation succeeded
    #[error("Settlement of claim {claim_id} incomplete: policy {policy_id} of {policyholder} was debited {amount} but the claim is still pending")]
    SettlementIncomplete {
        claim_id: ClaimId,
        policyholder: Username,
        policy_id: PolicyId,
        amount: Decimal,
        #[source]
        source: PortError,
    },
}

impl ClaimError {
    /// Whether the error is a user-facing warning rather than a failure
    pub fn is_warning(&self) -> bool {
        matches!(self, ClaimError::InsufficientBalance { .. } | ClaimError::InvalidAmount(_))
    }
}
