//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating random test data
//! that maintains domain invariants.

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::{ClaimId, PolicyId, Username};
use domain_claims::{Claim, ClaimStatus};
use domain_policy::{Policy, PremiumPlan};

/// Strategy for non-negative amounts with two decimal places, up to `max_cents / 100`
pub fn amount_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (0..=max_cents).prop_map(|c| Decimal::new(c, 2))
}

/// Strategy for strictly positive amounts
pub fn positive_amount_strategy(max_cents: i64) -> impl Strategy<Value = Decimal> {
    (1..=max_cents).prop_map(|c| Decimal::new(c, 2))
}

pub fn claim_status_strategy() -> impl Strategy<Value = ClaimStatus> {
    prop_oneof![
        Just(ClaimStatus::Pending),
        Just(ClaimStatus::Approved),
        Just(ClaimStatus::Rejected),
    ]
}

pub fn premium_plan_strategy() -> impl Strategy<Value = PremiumPlan> {
    (amount_strategy(100_000), 1u32..=240).prop_map(|(premium, months)| PremiumPlan::new(premium, months))
}

/// Strategy for held policies with `0 <= left_amount <= sum_assured`
pub fn policy_strategy() -> impl Strategy<Value = Policy> {
    (1u64..1000, positive_amount_strategy(100_000_000), 0u32..=100, premium_plan_strategy()).prop_map(
        |(id, sum_assured, left_pct, plan)| {
            let left = (sum_assured * Decimal::from(left_pct) / Decimal::from(100)).round_dp(2);
            Policy {
                policy_id: PolicyId::new(id),
                policy_name: format!("Policy {id}"),
                sum_assured,
                premium: plan.premium,
                duration_months: plan.duration_months,
                left_amount: left.min(sum_assured),
                version: 0,
            }
        },
    )
}

/// Strategy for claim lists with arbitrary statuses and distinct ids
pub fn claims_strategy(max_len: usize) -> impl Strategy<Value = Vec<Claim>> {
    proptest::collection::vec((claim_status_strategy(), positive_amount_strategy(1_000_000)), 0..max_len).prop_map(
        |items| {
            items
                .into_iter()
                .enumerate()
                .map(|(i, (status, amount))| Claim {
                    id: ClaimId::new(i as u64 + 1),
                    policyholder_id: Username::new(format!("holder{}", i % 3)).expect("generated username"),
                    policy_id: PolicyId::new(1),
                    amount,
                    status,
                })
                .collect()
        },
    )
}
