//! Claims DTOs

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ClaimId, PolicyId, Username};
use domain_claims::{Approval, Claim, ClaimStatus};

pub use domain_claims::FileClaimRequest;

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub id: ClaimId,
    pub policyholder_id: Username,
    pub policy_id: PolicyId,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl From<Claim> for ClaimResponse {
    fn from(claim: Claim) -> Self {
        Self {
            id: claim.id,
            policyholder_id: claim.policyholder_id,
            policy_id: claim.policy_id,
            amount: claim.amount,
            status: claim.status,
        }
    }
}

/// An approved claim and the balance change written for it
#[derive(Debug, Serialize)]
pub struct ApprovalResponse {
    pub claim: ClaimResponse,
    pub policy_id: PolicyId,
    pub previous_left_amount: Decimal,
    pub new_left_amount: Decimal,
}

impl From<Approval> for ApprovalResponse {
    fn from(approval: Approval) -> Self {
        Self {
            claim: approval.claim.into(),
            policy_id: approval.settlement.policy_id,
            previous_left_amount: approval.settlement.previous_left_amount,
            new_left_amount: approval.settlement.new_left_amount,
        }
    }
}
