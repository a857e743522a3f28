//! Claim record

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, PolicyId, Username};
use crate::error::ClaimError;

/// Claim status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Filed, awaiting an administrator
    Pending,
    /// Settled against the policy balance
    Approved,
    /// Declined; no balance change
    Rejected,
}

impl ClaimStatus {
    /// Position in listings: pending, then approved, then rejected
    pub fn rank(self) -> u8 {
        match self {
            ClaimStatus::Pending => 0,
            ClaimStatus::Approved => 1,
            ClaimStatus::Rejected => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
        }
    }

    /// Checks if transition is valid
    pub fn can_transition_to(self, target: ClaimStatus) -> bool {
        use ClaimStatus::*;
        matches!((self, target), (Pending, Approved) | (Pending, Rejected))
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ClaimStatus::Pending),
            "approved" => Ok(ClaimStatus::Approved),
            "rejected" => Ok(ClaimStatus::Rejected),
            other => Err(format!("unknown claim status '{other}'")),
        }
    }
}

/// A claim against a held policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique identifier
    pub id: ClaimId,
    /// Username of the claimant
    pub policyholder_id: Username,
    /// Held policy the claim draws on
    pub policy_id: PolicyId,
    /// Requested amount
    pub amount: Decimal,
    /// Status
    pub status: ClaimStatus,
}

impl Claim {
    pub fn is_pending(&self) -> bool {
        self.status == ClaimStatus::Pending
    }

    /// Fails unless the claim may move to `target`
    pub fn ensure_transition(&self, target: ClaimStatus) -> Result<(), ClaimError> {
        if self.status.can_transition_to(target) {
            Ok(())
        } else {
            Err(ClaimError::InvalidStatusTransition {
                claim_id: self.id,
                from: self.status,
                to: target,
            })
        }
    }
}

/// A claim about to be filed; the backend assigns the id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClaim {
    pub policyholder_id: Username,
    pub policy_id: PolicyId,
    pub amount: Decimal,
}

impl NewClaim {
    /// Status every new claim is filed with
    pub fn status(&self) -> ClaimStatus {
        ClaimStatus::Pending
    }
}
