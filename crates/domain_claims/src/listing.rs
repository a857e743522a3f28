//! Claim listings

use rust_decimal::Decimal;
use serde::Serialize;

use core_kernel::{ClaimId, PolicyId, Username};
use domain_policy::PolicyCatalog;

use crate::claim::{Claim, ClaimStatus};

/// Orders claims pending first, then approved, then rejected
///
/// The sort is stable: claims with the same status keep their relative
/// order.
pub fn sort_by_status(claims: &mut [Claim]) {
    claims.sort_by_key(|c| c.status.rank());
}

/// Claims filed by one policyholder, in input order
pub fn filed_by(claims: Vec<Claim>, holder: &Username) -> Vec<Claim> {
    claims.into_iter().filter(|c| &c.policyholder_id == holder).collect()
}

/// A claim as shown to its policyholder
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimSummary {
    pub claim_id: ClaimId,
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl ClaimSummary {
    /// Annotates claims with the catalog name of their policy
    pub fn from_claims(claims: &[Claim], catalog: &PolicyCatalog) -> Vec<Self> {
        claims
            .iter()
            .map(|c| ClaimSummary {
                claim_id: c.id,
                policy_id: c.policy_id,
                policy_name: catalog.display_name(c.policy_id).to_string(),
                amount: c.amount,
                status: c.status,
            })
            .collect()
    }
}
