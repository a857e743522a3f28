//! Custom Test Assertions
//!
//! Provides specialized assertion helpers for domain types that give
//! more meaningful error messages than standard assertions.

use rust_decimal::Decimal;

use domain_claims::Claim;
use domain_policy::Policy;

/// Asserts that claims are ordered pending, approved, rejected
pub fn assert_sorted_by_status(claims: &[Claim]) {
    for pair in claims.windows(2) {
        assert!(
            pair[0].status.rank() <= pair[1].status.rank(),
            "Claims out of order: {} ({}) before {} ({})",
            pair[0].id,
            pair[0].status,
            pair[1].id,
            pair[1].status
        );
    }
}

/// Asserts that a policy's balance lies within `[0, sum_assured]`
pub fn assert_balance_in_bounds(policy: &Policy) {
    assert!(
        policy.left_amount >= Decimal::ZERO && policy.left_amount <= policy.sum_assured,
        "Balance of {} out of bounds: left={}, sum_assured={}",
        policy.policy_id,
        policy.left_amount,
        policy.sum_assured
    );
}

/// Asserts the remaining balance of one held policy
///
/// # Panics
///
/// Panics when no policy in `policies` has `policy_id` or the balance differs.
pub fn assert_left_amount(policies: &[Policy], policy_id: core_kernel::PolicyId, expected: Decimal) {
    let policy = policies
        .iter()
        .find(|p| p.policy_id == policy_id)
        .unwrap_or_else(|| panic!("Policy {policy_id} not held"));
    assert_eq!(
        policy.left_amount, expected,
        "Unexpected balance for {}: actual={}, expected={}",
        policy_id, policy.left_amount, expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{ClaimBuilder, PolicyBuilder};
    use crate::generators::policy_strategy;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    #[should_panic(expected = "out of order")]
    fn test_detects_unsorted_claims() {
        let claims = vec![ClaimBuilder::new().rejected().build(), ClaimBuilder::new().with_id(2).build()];
        assert_sorted_by_status(&claims);
    }

    #[test]
    fn test_left_amount() {
        let policies = vec![PolicyBuilder::new().with_left_amount(dec!(250)).build()];
        assert_left_amount(&policies, policies[0].policy_id, dec!(250));
    }

    proptest! {
        #[test]
        fn generated_policies_are_valid(policy in policy_strategy()) {
            assert_balance_in_bounds(&policy);
            prop_assert!(policy.validate().is_ok());
        }
    }
}
