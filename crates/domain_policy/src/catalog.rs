//! Policy catalog
//!
//! The catalog is a flat list of entries. Several entries may share a name
//! and category, each contributing its own premium plans; browsing collapses
//! them into one policy per name.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::PolicyId;
use crate::policy::PremiumPlan;

/// Name shown for claims whose policy no longer exists in the catalog
pub const UNKNOWN_POLICY_NAME: &str = "Unknown Policy";

/// One catalog record as stored in the CMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: PolicyId,
    pub name: String,
    pub category: String,
    pub sum_assured: Decimal,
    pub premium_plans: Vec<PremiumPlan>,
}

/// A distinct policy within a category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogPolicy {
    pub id: PolicyId,
    pub name: String,
    pub sum_assured: Decimal,
}

/// Read-only view over the full catalog
#[derive(Debug, Clone, Default)]
pub struct PolicyCatalog {
    entries: Vec<CatalogEntry>,
}

impl PolicyCatalog {
    pub fn new(entries: Vec<CatalogEntry>) -> Self {
        Self { entries }
    }

    pub fn entry(&self, id: PolicyId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !categories.contains(&entry.category.as_str()) {
                categories.push(&entry.category);
            }
        }
        categories
    }

    /// Distinct policies of a category; the first entry of each name wins
    pub fn policies_in(&self, category: &str) -> Vec<CatalogPolicy> {
        let mut policies: Vec<CatalogPolicy> = Vec::new();
        for entry in self.entries.iter().filter(|e| e.category == category) {
            if policies.iter().all(|p| p.name != entry.name) {
                policies.push(CatalogPolicy {
                    id: entry.id,
                    name: entry.name.clone(),
                    sum_assured: entry.sum_assured,
                });
            }
        }
        policies
    }

    /// Plans of every entry sharing the name and category of `id`
    ///
    /// An unknown id yields no plans.
    pub fn premium_plans(&self, id: PolicyId) -> Vec<PremiumPlan> {
        let Some(anchor) = self.entry(id) else {
            return Vec::new();
        };
        self.entries
            .iter()
            .filter(|e| e.name == anchor.name && e.category == anchor.category)
            .flat_map(|e| e.premium_plans.iter().copied())
            .collect()
    }

    /// Plans of every entry with the given name, whatever its category
    pub fn plans_named(&self, name: &str) -> Vec<PremiumPlan> {
        self.entries
            .iter()
            .filter(|e| e.name == name)
            .flat_map(|e| e.premium_plans.iter().copied())
            .collect()
    }

    pub fn offers_plan(&self, id: PolicyId, plan: &PremiumPlan) -> bool {
        self.premium_plans(id).contains(plan)
    }

    pub fn policy_name(&self, id: PolicyId) -> Option<&str> {
        self.entry(id).map(|e| e.name.as_str())
    }

    /// Policy name for display, falling back to [`UNKNOWN_POLICY_NAME`]
    pub fn display_name(&self, id: PolicyId) -> &str {
        self.policy_name(id).unwrap_or(UNKNOWN_POLICY_NAME)
    }
}

impl From<Vec<CatalogEntry>> for PolicyCatalog {
    fn from(entries: Vec<CatalogEntry>) -> Self {
        Self::new(entries)
    }
}
