//! Held policy record

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use crate::error::PolicyError;

/// Premium and duration pairing offered for a catalog policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PremiumPlan {
    /// Premium payable for the plan
    pub premium: Decimal,
    /// Term of the plan in months
    pub duration_months: u32,
}

impl PremiumPlan {
    pub fn new(premium: Decimal, duration_months: u32) -> Self {
        Self { premium, duration_months }
    }

    /// Checks the plan invariants: non-negative premium, positive duration
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.premium.is_sign_negative() {
            return Err(PolicyError::invalid("premium must not be negative"));
        }
        if self.duration_months == 0 {
            return Err(PolicyError::invalid("duration must be at least one month"));
        }
        Ok(())
    }
}

/// A purchased policy and its remaining claimable balance
///
/// Held policies live inside the owner's account, so `policy_id` is the id
/// of the catalog entry the policy was bought from rather than an id of its
/// own. `version` increases on every mutation and lets writers detect that
/// the collection moved underneath them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Catalog entry the policy was bought from
    pub policy_id: PolicyId,
    /// Display name
    pub policy_name: String,
    /// Coverage ceiling
    pub sum_assured: Decimal,
    /// Premium of the selected plan
    pub premium: Decimal,
    /// Term of the selected plan in months
    pub duration_months: u32,
    /// Remaining claimable balance
    pub left_amount: Decimal,
    /// Mutation counter
    #[serde(default)]
    pub version: u64,
}

impl Policy {
    /// Creates a freshly purchased policy with its full balance available
    pub fn purchase(
        policy_id: PolicyId,
        policy_name: impl Into<String>,
        sum_assured: Decimal,
        plan: PremiumPlan,
    ) -> Result<Self, PolicyError> {
        plan.validate()?;
        let policy = Self {
            policy_id,
            policy_name: policy_name.into(),
            sum_assured,
            premium: plan.premium,
            duration_months: plan.duration_months,
            left_amount: sum_assured,
            version: 0,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Checks the record invariants
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.sum_assured.is_sign_negative() {
            return Err(PolicyError::invalid("sum assured must not be negative"));
        }
        self.plan().validate()?;
        if self.left_amount.is_sign_negative() || self.left_amount > self.sum_assured {
            return Err(PolicyError::BalanceOutOfRange {
                policy_id: self.policy_id,
                requested: self.left_amount,
                sum_assured: self.sum_assured,
            });
        }
        Ok(())
    }

    /// Returns the plan the policy is currently on
    pub fn plan(&self) -> PremiumPlan {
        PremiumPlan::new(self.premium, self.duration_months)
    }

    /// Whether the remaining balance covers the amount
    pub fn covers(&self, amount: Decimal) -> bool {
        amount <= self.left_amount
    }

    /// Replaces the remaining balance
    pub fn set_left_amount(&mut self, left_amount: Decimal) -> Result<(), PolicyError> {
        if left_amount.is_sign_negative() || left_amount > self.sum_assured {
            return Err(PolicyError::BalanceOutOfRange {
                policy_id: self.policy_id,
                requested: left_amount,
                sum_assured: self.sum_assured,
            });
        }
        self.left_amount = left_amount;
        self.version += 1;
        Ok(())
    }

    /// Adds an amount back to the balance, capped at the sum assured
    ///
    /// Returns the balance after the credit.
    pub fn credit(&mut self, amount: Decimal) -> Decimal {
        self.left_amount = (self.left_amount + amount).min(self.sum_assured);
        self.version += 1;
        self.left_amount
    }

    /// Switches to another premium plan; the balance is untouched
    pub fn change_plan(&mut self, plan: PremiumPlan) -> Result<(), PolicyError> {
        plan.validate()?;
        self.premium = plan.premium;
        self.duration_months = plan.duration_months;
        self.version += 1;
        Ok(())
    }
}
