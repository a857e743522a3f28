//! Claim filing rules

use rust_decimal::Decimal;
use serde::Deserialize;

use core_kernel::{PolicyId, Username};
use domain_policy::Policy;

use crate::claim::NewClaim;
use crate::error::ClaimError;

/// A policyholder's request to claim against one of their policies
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileClaimRequest {
    pub policy_id: PolicyId,
    pub amount: Decimal,
}

impl FileClaimRequest {
    /// Checks the request against the holder's current policies
    ///
    /// The balance check is advisory: the backend does not enforce it and
    /// approval evaluates the balance again.
    pub fn validate(&self, holder: &Username, policies: &[Policy]) -> Result<NewClaim, ClaimError> {
        if self.amount <= Decimal::ZERO {
            return Err(ClaimError::InvalidAmount(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }

        let policy = policies
            .iter()
            .find(|p| p.policy_id == self.policy_id)
            .ok_or_else(|| ClaimError::PolicyNotFound {
                policyholder: holder.clone(),
                policy_id: self.policy_id,
            })?;

        if !policy.covers(self.amount) {
            return Err(ClaimError::InsufficientBalance {
                requested: self.amount,
                available: policy.left_amount,
            });
        }

        Ok(NewClaim {
            policyholder_id: holder.clone(),
            policy_id: self.policy_id,
            amount: self.amount,
        })
    }
}
