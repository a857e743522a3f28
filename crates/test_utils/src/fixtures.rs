//! Pre-built Test Fixtures
//!
//! Provides ready-to-use catalog and account data. Catalog fixtures are
//! fixed so tests can name ids; account fixtures use generated usernames
//! and emails so tests cannot depend on them by accident.

use fake::faker::internet::en::{SafeEmail, Username as FakeUsername};
use fake::Fake;
use rust_decimal_macros::dec;

use core_kernel::{PolicyId, UserId, Username};
use domain_party::{RegistrationRequest, UserAccount};
use domain_policy::{CatalogEntry, PremiumPlan};

/// Password given to every fixture account
pub const FIXTURE_PASSWORD: &str = "secret123";

/// Fixture for catalog test data
pub struct CatalogFixtures;

impl CatalogFixtures {
    /// Catalog id of "Family Health", sum assured 10000
    pub const FAMILY_HEALTH: PolicyId = PolicyId::new(1);
    /// Catalog id of the second "Family Health" entry, which only adds a plan
    pub const FAMILY_HEALTH_EXTRA_PLAN: PolicyId = PolicyId::new(2);
    /// Catalog id of "Comprehensive" motor cover, sum assured 4000
    pub const COMPREHENSIVE: PolicyId = PolicyId::new(3);
    /// Catalog id of "Term Life", sum assured 50000
    pub const TERM_LIFE: PolicyId = PolicyId::new(4);

    /// Plans offered for Family Health across its two entries
    pub fn family_health_plans() -> Vec<PremiumPlan> {
        vec![
            PremiumPlan::new(dec!(100), 12),
            PremiumPlan::new(dec!(180), 24),
            PremiumPlan::new(dec!(250), 36),
        ]
    }

    /// Health, Motor and Life entries; Family Health appears twice
    pub fn standard() -> Vec<CatalogEntry> {
        let plans = Self::family_health_plans();
        vec![
            CatalogEntry {
                id: Self::FAMILY_HEALTH,
                name: "Family Health".to_string(),
                category: "Health".to_string(),
                sum_assured: dec!(10000),
                premium_plans: plans[..2].to_vec(),
            },
            CatalogEntry {
                id: Self::FAMILY_HEALTH_EXTRA_PLAN,
                name: "Family Health".to_string(),
                category: "Health".to_string(),
                sum_assured: dec!(10000),
                premium_plans: plans[2..].to_vec(),
            },
            CatalogEntry {
                id: Self::COMPREHENSIVE,
                name: "Comprehensive".to_string(),
                category: "Motor".to_string(),
                sum_assured: dec!(4000),
                premium_plans: vec![PremiumPlan::new(dec!(60), 6)],
            },
            CatalogEntry {
                id: Self::TERM_LIFE,
                name: "Term Life".to_string(),
                category: "Life".to_string(),
                sum_assured: dec!(50000),
                premium_plans: vec![PremiumPlan::new(dec!(40), 120)],
            },
        ]
    }
}

/// Fixture for account test data
pub struct AccountFixtures;

impl AccountFixtures {
    /// A generated username of at least three characters
    pub fn username() -> String {
        let name: String = FakeUsername().fake();
        format!("u_{name}")
    }

    pub fn email() -> String {
        SafeEmail().fake()
    }

    /// Regular, unblocked account with no policies
    pub fn policyholder() -> UserAccount {
        Self::account(&Self::username(), false)
    }

    pub fn admin() -> UserAccount {
        Self::account(&Self::username(), true)
    }

    /// Account with a fixed username; the id is assigned by the backend
    pub fn account(username: &str, is_admin: bool) -> UserAccount {
        UserAccount {
            id: UserId::new(0),
            username: Username::new(username).expect("fixture username is not blank"),
            email: format!("{username}@example.com"),
            age: Some(35),
            blocked: false,
            is_admin,
            policies: Vec::new(),
        }
    }

    /// Registration form that passes validation
    pub fn registration() -> RegistrationRequest {
        RegistrationRequest {
            username: Self::username(),
            email: Self::email(),
            password: FIXTURE_PASSWORD.to_string(),
            age: Some(29),
        }
    }
}
