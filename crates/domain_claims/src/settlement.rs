//! Settlement evaluation
//!
//! Decides whether a pending claim can be approved against the claimant's
//! policy and computes the balance the policy is left with. Evaluation is
//! pure; [`crate::lifecycle`] performs the writes.

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ClaimId, PolicyId, Username};
use domain_policy::{Policy, PolicyPortfolio};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;

/// Outcome of a successful evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settlement {
    pub claim_id: ClaimId,
    pub policyholder: Username,
    pub policy_id: PolicyId,
    /// Settled amount
    pub amount: Decimal,
    pub previous_left_amount: Decimal,
    pub new_left_amount: Decimal,
    /// Version of the policy the settlement was computed from
    pub policy_version: u64,
}

/// Evaluates a pending claim against the claimant's policies
///
/// # Errors
///
/// * `InvalidStatusTransition` - the claim is not pending
/// * `InvalidAmount` - the stored amount is zero or negative
/// * `PolicyNotFound` - no policy in `policies` has the claim's policy id
/// * `InsufficientBalance` - the amount exceeds the remaining balance
pub fn evaluate(claim: &Claim, policies: &[Policy]) -> Result<Settlement, ClaimError> {
    claim.ensure_transition(ClaimStatus::Approved)?;

    // The CMS accepts any amount, so a record may never have passed filing.
    if claim.amount <= Decimal::ZERO {
        return Err(ClaimError::InvalidAmount(format!(
            "claim {} has non-positive amount {}",
            claim.id, claim.amount
        )));
    }

    let policy = policies
        .iter()
        .find(|p| p.policy_id == claim.policy_id)
        .ok_or_else(|| ClaimError::PolicyNotFound {
            policyholder: claim.policyholder_id.clone(),
            policy_id: claim.policy_id,
        })?;

    if claim.amount > policy.left_amount {
        return Err(ClaimError::InsufficientBalance {
            requested: claim.amount,
            available: policy.left_amount,
        });
    }

    Ok(Settlement {
        claim_id: claim.id,
        policyholder: claim.policyholder_id.clone(),
        policy_id: policy.policy_id,
        amount: claim.amount,
        previous_left_amount: policy.left_amount,
        new_left_amount: (policy.left_amount - claim.amount).max(Decimal::ZERO),
        policy_version: policy.version,
    })
}

impl Settlement {
    /// Writes the new balance into the portfolio
    pub fn apply(&self, portfolio: &mut PolicyPortfolio) -> Result<(), ClaimError> {
        let policy = self.target(portfolio)?;
        policy.set_left_amount(self.new_left_amount)?;
        Ok(())
    }

    /// Gives the settled amount back to the policy
    ///
    /// Used when the claim could not be marked approved after the balance
    /// was already written.
    pub fn reverse(&self, portfolio: &mut PolicyPortfolio) -> Result<Decimal, ClaimError> {
        let policy = self.target(portfolio)?;
        Ok(policy.credit(self.previous_left_amount - self.new_left_amount))
    }

    fn target<'a>(&self, portfolio: &'a mut PolicyPortfolio) -> Result<&'a mut Policy, ClaimError> {
        portfolio
            .get_mut(self.policy_id)
            .ok_or_else(|| ClaimError::PolicyNotFound {
                policyholder: self.policyholder.clone(),
                policy_id: self.policy_id,
            })
    }
}
