//! Test Data Builders
//!
//! Provides builder patterns for constructing test data with sensible defaults.
//! These builders allow tests to specify only the relevant fields while using
//! defaults for everything else.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{ClaimId, PolicyId, Username};
use domain_claims::{Claim, ClaimStatus};
use domain_policy::{Policy, PremiumPlan};

use crate::fixtures::CatalogFixtures;

/// Builder for held policies
///
/// Defaults to a fresh Family Health policy on its 12-month plan.
pub struct PolicyBuilder {
    policy_id: PolicyId,
    policy_name: String,
    sum_assured: Decimal,
    plan: PremiumPlan,
    left_amount: Option<Decimal>,
}

impl Default for PolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyBuilder {
    pub fn new() -> Self {
        Self {
            policy_id: CatalogFixtures::FAMILY_HEALTH,
            policy_name: "Family Health".to_string(),
            sum_assured: dec!(10000),
            plan: PremiumPlan::new(dec!(100), 12),
            left_amount: None,
        }
    }

    pub fn with_policy_id(mut self, id: PolicyId) -> Self {
        self.policy_id = id;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.policy_name = name.into();
        self
    }

    pub fn with_sum_assured(mut self, sum_assured: Decimal) -> Self {
        self.sum_assured = sum_assured;
        self
    }

    pub fn with_plan(mut self, plan: PremiumPlan) -> Self {
        self.plan = plan;
        self
    }

    /// Sets the remaining balance; defaults to the sum assured
    pub fn with_left_amount(mut self, left_amount: Decimal) -> Self {
        self.left_amount = Some(left_amount);
        self
    }

    /// Builds the policy
    ///
    /// # Panics
    ///
    /// Panics when the fields break a policy invariant.
    pub fn build(self) -> Policy {
        let mut policy = Policy::purchase(self.policy_id, self.policy_name, self.sum_assured, self.plan)
            .expect("builder fields form a valid policy");
        if let Some(left) = self.left_amount {
            policy.left_amount = left;
            policy.validate().expect("left amount within bounds");
        }
        policy
    }
}

/// Builder for claims
pub struct ClaimBuilder {
    id: ClaimId,
    policyholder_id: String,
    policy_id: PolicyId,
    amount: Decimal,
    status: ClaimStatus,
}

impl Default for ClaimBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ClaimBuilder {
    /// A pending claim of 1000 against Family Health
    pub fn new() -> Self {
        Self {
            id: ClaimId::new(1),
            policyholder_id: "alice".to_string(),
            policy_id: CatalogFixtures::FAMILY_HEALTH,
            amount: dec!(1000),
            status: ClaimStatus::Pending,
        }
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = ClaimId::new(id);
        self
    }

    pub fn with_policyholder(mut self, username: impl Into<String>) -> Self {
        self.policyholder_id = username.into();
        self
    }

    pub fn with_policy_id(mut self, id: PolicyId) -> Self {
        self.policy_id = id;
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = amount;
        self
    }

    pub fn with_status(mut self, status: ClaimStatus) -> Self {
        self.status = status;
        self
    }

    pub fn approved(self) -> Self {
        self.with_status(ClaimStatus::Approved)
    }

    pub fn rejected(self) -> Self {
        self.with_status(ClaimStatus::Rejected)
    }

    pub fn build(self) -> Claim {
        Claim {
            id: self.id,
            policyholder_id: Username::new(self.policyholder_id).expect("builder username is not blank"),
            policy_id: self.policy_id,
            amount: self.amount,
            status: self.status,
        }
    }
}
