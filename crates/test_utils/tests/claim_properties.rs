//! Property tests over claim approval and listing
//!
//! Approvals run through the lifecycle controller against the in-memory
//! backend, so every balance checked here is the one actually stored.

use std::sync::Arc;

use proptest::prelude::*;
use rust_decimal::Decimal;

use core_kernel::ClaimId;
use domain_claims::{sort_by_status, ClaimError, ClaimLifecycleController};
use domain_policy::{HolderLocks, Policy};
use test_utils::{
    amount_strategy, assert_balance_in_bounds, assert_sorted_by_status, claims_strategy, policy_strategy,
    positive_amount_strategy, AccountFixtures, ClaimBuilder, InMemoryBackend, FIXTURE_PASSWORD,
};

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime builds")
}

/// Mostly positive amounts, with some zero or negative records the CMS
/// would accept
fn stored_amount_strategy() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        4 => positive_amount_strategy(50_000_000),
        1 => amount_strategy(100_000).prop_map(|a| -a),
    ]
}

async fn approve_in_order(policy: Policy, amounts: Vec<Decimal>) -> Result<(), TestCaseError> {
    let backend = Arc::new(InMemoryBackend::new());
    let mut holder = AccountFixtures::account("alice", false);
    holder.policies = vec![policy.clone()];
    backend.add_account(holder, FIXTURE_PASSWORD).await;
    let (admin, token) = backend
        .add_account(AccountFixtures::account("admin", true), FIXTURE_PASSWORD)
        .await;
    let session = admin.open_session(token).expect("admin is not blocked");

    for (i, amount) in amounts.iter().enumerate() {
        backend
            .add_claim(
                ClaimBuilder::new()
                    .with_id(i as u64 + 1)
                    .with_policy_id(policy.policy_id)
                    .with_amount(*amount)
                    .build(),
            )
            .await;
    }

    let controller = ClaimLifecycleController::new(backend.clone(), backend.clone(), Arc::new(HolderLocks::new()));
    let mut expected = policy.left_amount;

    for (i, amount) in amounts.into_iter().enumerate() {
        match controller.approve(&session, ClaimId::new(i as u64 + 1)).await {
            Ok(approval) => {
                prop_assert!(amount > Decimal::ZERO);
                prop_assert_eq!(approval.settlement.previous_left_amount, expected);
                expected -= amount;
            }
            Err(ClaimError::InsufficientBalance { requested, available }) => {
                prop_assert_eq!(requested, amount);
                prop_assert_eq!(available, expected);
                prop_assert!(amount > expected);
            }
            Err(ClaimError::InvalidAmount(_)) => prop_assert!(amount <= Decimal::ZERO),
            Err(other) => prop_assert!(false, "unexpected error: {other}"),
        }

        let held = backend.policies_of("alice").await;
        prop_assert_eq!(held.len(), 1);
        assert_balance_in_bounds(&held[0]);
        prop_assert_eq!(held[0].left_amount, expected);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn approvals_never_leave_balance_out_of_bounds(
        policy in policy_strategy(),
        amounts in proptest::collection::vec(stored_amount_strategy(), 1..12),
    ) {
        runtime().block_on(approve_in_order(policy, amounts))?;
    }

    #[test]
    fn status_sort_is_stable(mut claims in claims_strategy(40)) {
        let original = claims.clone();
        sort_by_status(&mut claims);

        prop_assert_eq!(claims.len(), original.len());
        assert_sorted_by_status(&claims);

        // Generated ids ascend, so equal statuses must keep ascending ids.
        for pair in claims.windows(2) {
            if pair[0].status == pair[1].status {
                prop_assert!(pair[0].id.get() < pair[1].id.get());
            }
        }
        for claim in &original {
            prop_assert!(claims.contains(claim));
        }
    }
}
