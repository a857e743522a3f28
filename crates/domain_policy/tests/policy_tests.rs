//! Tests for held policies, portfolios and the catalog view

use core_kernel::PolicyId;
use rust_decimal_macros::dec;

use domain_policy::{
    CatalogEntry, Policy, PolicyCatalog, PolicyError, PolicyPortfolio, PremiumPlan,
    UNKNOWN_POLICY_NAME,
};

fn plan(premium: rust_decimal::Decimal, months: u32) -> PremiumPlan {
    PremiumPlan::new(premium, months)
}

fn entry(id: u64, name: &str, category: &str, plans: Vec<PremiumPlan>) -> CatalogEntry {
    CatalogEntry {
        id: PolicyId::new(id),
        name: name.to_string(),
        category: category.to_string(),
        sum_assured: dec!(10000),
        premium_plans: plans,
    }
}

// ============================================================================
// Policy Tests
// ============================================================================

mod policy_record_tests {
    use super::*;

    #[test]
    fn test_purchase_starts_with_full_balance() {
        let policy = Policy::purchase(PolicyId::new(1), "Family Health", dec!(10000), plan(dec!(120), 12)).unwrap();

        assert_eq!(policy.left_amount, dec!(10000));
        assert_eq!(policy.premium, dec!(120));
        assert_eq!(policy.duration_months, 12);
        assert_eq!(policy.version, 0);
    }

    #[test]
    fn test_purchase_rejects_zero_duration() {
        let result = Policy::purchase(PolicyId::new(1), "Family Health", dec!(10000), plan(dec!(120), 0));
        assert!(matches!(result, Err(PolicyError::InvalidPolicy(_))));
    }

    #[test]
    fn test_purchase_rejects_negative_premium() {
        let result = Policy::purchase(PolicyId::new(1), "Family Health", dec!(10000), plan(dec!(-1), 12));
        assert!(matches!(result, Err(PolicyError::InvalidPolicy(_))));
    }

    #[test]
    fn test_set_left_amount_bumps_version() {
        let mut policy = Policy::purchase(PolicyId::new(1), "Motor", dec!(5000), plan(dec!(50), 6)).unwrap();
        policy.set_left_amount(dec!(2000)).unwrap();

        assert_eq!(policy.left_amount, dec!(2000));
        assert_eq!(policy.version, 1);
    }

    #[test]
    fn test_set_left_amount_outside_range_is_rejected() {
        let mut policy = Policy::purchase(PolicyId::new(1), "Motor", dec!(5000), plan(dec!(50), 6)).unwrap();

        assert!(matches!(
            policy.set_left_amount(dec!(-0.01)),
            Err(PolicyError::BalanceOutOfRange { .. })
        ));
        assert!(matches!(
            policy.set_left_amount(dec!(5000.01)),
            Err(PolicyError::BalanceOutOfRange { .. })
        ));
        assert_eq!(policy.left_amount, dec!(5000));
        assert_eq!(policy.version, 0);
    }

    #[test]
    fn test_credit_caps_at_sum_assured() {
        let mut policy = Policy::purchase(PolicyId::new(1), "Motor", dec!(5000), plan(dec!(50), 6)).unwrap();
        policy.set_left_amount(dec!(4000)).unwrap();

        assert_eq!(policy.credit(dec!(3000)), dec!(5000));
    }

    #[test]
    fn test_change_plan_keeps_balance() {
        let mut policy = Policy::purchase(PolicyId::new(1), "Motor", dec!(5000), plan(dec!(50), 6)).unwrap();
        policy.set_left_amount(dec!(1234)).unwrap();
        policy.change_plan(plan(dec!(90), 12)).unwrap();

        assert_eq!(policy.left_amount, dec!(1234));
        assert_eq!(policy.plan(), plan(dec!(90), 12));
        assert_eq!(policy.version, 2);
    }

    #[test]
    fn test_covers_is_inclusive() {
        let policy = Policy::purchase(PolicyId::new(1), "Motor", dec!(5000), plan(dec!(50), 6)).unwrap();
        assert!(policy.covers(dec!(5000)));
        assert!(!policy.covers(dec!(5000.01)));
    }

    #[test]
    fn test_version_defaults_when_absent() {
        let json = r#"{
            "policy_id": 3,
            "policy_name": "Travel",
            "sum_assured": "800",
            "premium": "20",
            "duration_months": 1,
            "left_amount": "800"
        }"#;
        let policy: Policy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.version, 0);
        assert!(policy.validate().is_ok());
    }
}

// ============================================================================
// Portfolio Tests
// ============================================================================

mod portfolio_tests {
    use super::*;

    fn held(id: u64) -> Policy {
        Policy::purchase(PolicyId::new(id), format!("Policy {id}"), dec!(1000), plan(dec!(10), 12)).unwrap()
    }

    #[test]
    fn test_add_rejects_duplicate() {
        let mut portfolio = PolicyPortfolio::new(vec![held(1)]);
        let result = portfolio.add(held(1));

        assert!(matches!(result, Err(PolicyError::DuplicatePolicy(id)) if id == PolicyId::new(1)));
        assert_eq!(portfolio.len(), 1);
    }

    #[test]
    fn test_remove_preserves_order() {
        let mut portfolio = PolicyPortfolio::new(vec![held(1), held(2), held(3)]);
        let removed = portfolio.remove(PolicyId::new(2)).unwrap();

        assert_eq!(removed.policy_id, PolicyId::new(2));
        let ids: Vec<u64> = portfolio.policies().iter().map(|p| p.policy_id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_remove_missing_policy() {
        let mut portfolio = PolicyPortfolio::default();
        assert!(portfolio.is_empty());
        assert!(matches!(
            portfolio.remove(PolicyId::new(9)),
            Err(PolicyError::PolicyNotHeld(_))
        ));
    }
}

// ============================================================================
// Catalog Tests
// ============================================================================

mod catalog_tests {
    use super::*;

    fn catalog() -> PolicyCatalog {
        PolicyCatalog::new(vec![
            entry(1, "Family Health", "Health", vec![plan(dec!(100), 12)]),
            entry(2, "Comprehensive", "Motor", vec![plan(dec!(60), 6)]),
            entry(3, "Family Health", "Health", vec![plan(dec!(180), 24)]),
            entry(4, "Solo Health", "Health", vec![plan(dec!(70), 12)]),
            entry(5, "Family Health", "Travel", vec![plan(dec!(15), 1)]),
        ])
    }

    #[test]
    fn test_categories_first_seen_order() {
        assert_eq!(catalog().categories(), vec!["Health", "Motor", "Travel"]);
    }

    #[test]
    fn test_policies_in_category_are_distinct_by_name() {
        let policies = catalog().policies_in("Health");
        let names: Vec<&str> = policies.iter().map(|p| p.name.as_str()).collect();

        assert_eq!(names, vec!["Family Health", "Solo Health"]);
        assert_eq!(policies[0].id, PolicyId::new(1));
    }

    #[test]
    fn test_premium_plans_collects_same_name_and_category() {
        let plans = catalog().premium_plans(PolicyId::new(3));
        assert_eq!(plans, vec![plan(dec!(100), 12), plan(dec!(180), 24)]);
    }

    #[test]
    fn test_premium_plans_unknown_id_is_empty() {
        assert!(catalog().premium_plans(PolicyId::new(99)).is_empty());
    }

    #[test]
    fn test_plans_named_spans_categories() {
        let plans = catalog().plans_named("Family Health");
        assert_eq!(plans, vec![plan(dec!(100), 12), plan(dec!(180), 24), plan(dec!(15), 1)]);
        assert!(catalog().plans_named("Pet Cover").is_empty());
    }

    #[test]
    fn test_offers_plan() {
        let catalog = catalog();
        assert!(catalog.offers_plan(PolicyId::new(1), &plan(dec!(180), 24)));
        assert!(!catalog.offers_plan(PolicyId::new(1), &plan(dec!(15), 1)));
    }

    #[test]
    fn test_display_name_falls_back() {
        let catalog = catalog();
        assert_eq!(catalog.display_name(PolicyId::new(2)), "Comprehensive");
        assert_eq!(catalog.display_name(PolicyId::new(42)), UNKNOWN_POLICY_NAME);
    }
}
