//! Policy DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use domain_policy::{Policy, PremiumPlan};

/// Purchase of a catalog policy on one of its plans
#[derive(Debug, Deserialize)]
pub struct PurchaseRequest {
    pub policy_id: PolicyId,
    pub premium: Decimal,
    pub duration_months: u32,
}

impl PurchaseRequest {
    pub fn plan(&self) -> PremiumPlan {
        PremiumPlan::new(self.premium, self.duration_months)
    }
}

#[derive(Debug, Deserialize)]
pub struct ChangePlanRequest {
    pub premium: Decimal,
    pub duration_months: u32,
}

impl ChangePlanRequest {
    pub fn plan(&self) -> PremiumPlan {
        PremiumPlan::new(self.premium, self.duration_months)
    }
}

/// A held policy
#[derive(Debug, Serialize)]
pub struct PolicyResponse {
    pub policy_id: PolicyId,
    pub policy_name: String,
    pub sum_assured: Decimal,
    pub premium: Decimal,
    pub duration_months: u32,
    pub left_amount: Decimal,
}

impl From<Policy> for PolicyResponse {
    fn from(policy: Policy) -> Self {
        Self {
            policy_id: policy.policy_id,
            policy_name: policy.policy_name,
            sum_assured: policy.sum_assured,
            premium: policy.premium,
            duration_months: policy.duration_months,
            left_amount: policy.left_amount,
        }
    }
}
