//! Policy domain services
//!
//! `PolicyService` covers what a policyholder does with their own policies:
//! browse the catalog, buy a policy on a premium plan, switch plans and drop
//! a policy. Every mutation re-reads the holder's collection under the
//! holder's lock, applies the change to a [`PolicyPortfolio`] and writes the
//! whole collection back.

use std::sync::Arc;

use tracing::{debug, info};

use core_kernel::{PolicyId, SessionContext};

use crate::catalog::PolicyCatalog;
use crate::error::PolicyError;
use crate::locks::HolderLocks;
use crate::policy::{Policy, PremiumPlan};
use crate::portfolio::PolicyPortfolio;
use crate::ports::{CatalogPort, PolicyHolderPort};

/// Service for the session user's own policies
#[derive(Clone)]
pub struct PolicyService {
    holders: Arc<dyn PolicyHolderPort>,
    catalog: Arc<dyn CatalogPort>,
    locks: Arc<HolderLocks>,
}

impl PolicyService {
    /// Creates a new policy service
    ///
    /// # Arguments
    ///
    /// * `holders` - Port to the policies embedded in accounts
    /// * `catalog` - Port to the policy catalog
    /// * `locks` - Holder locks shared with every other policy writer
    pub fn new(
        holders: Arc<dyn PolicyHolderPort>,
        catalog: Arc<dyn CatalogPort>,
        locks: Arc<HolderLocks>,
    ) -> Self {
        Self { holders, catalog, locks }
    }

    /// Loads the full catalog
    pub async fn catalog(&self, session: &SessionContext) -> Result<PolicyCatalog, PolicyError> {
        let entries = self.catalog.list_catalog(session).await?;
        debug!(entries = entries.len(), "Catalog loaded");
        Ok(PolicyCatalog::new(entries))
    }

    /// Lists the session user's policies in purchase order
    pub async fn held_policies(&self, session: &SessionContext) -> Result<Vec<Policy>, PolicyError> {
        Ok(self.holders.get_policies(session, session.username()).await?)
    }

    /// Buys a catalog policy on one of its premium plans
    ///
    /// The new policy starts with its whole sum assured available.
    ///
    /// # Errors
    ///
    /// * `CatalogEntryNotFound` - no catalog entry has `catalog_id`
    /// * `PlanNotOffered` - the plan is not among the entry's premium plans
    /// * `DuplicatePolicy` - the user already holds this policy
    pub async fn purchase(
        &self,
        session: &SessionContext,
        catalog_id: PolicyId,
        plan: PremiumPlan,
    ) -> Result<Policy, PolicyError> {
        let catalog = self.catalog(session).await?;
        let entry = catalog
            .entry(catalog_id)
            .ok_or(PolicyError::CatalogEntryNotFound(catalog_id))?;
        ensure_offered(&catalog, catalog_id, &plan)?;

        let holder = session.username();
        let _guard = self.locks.acquire(holder).await;

        let mut portfolio = PolicyPortfolio::new(self.holders.get_policies(session, holder).await?);
        let policy = Policy::purchase(entry.id, entry.name.clone(), entry.sum_assured, plan)?;
        portfolio.add(policy.clone())?;
        self.holders.set_policies(session, holder, portfolio.policies()).await?;

        info!(
            policyholder = %holder,
            policy_id = %policy.policy_id,
            sum_assured = %policy.sum_assured,
            "Policy purchased"
        );
        Ok(policy)
    }

    /// Moves a held policy to another premium plan
    ///
    /// Only premium and duration change; the remaining balance is kept. Any
    /// plan offered under the policy's name is accepted.
    ///
    /// # Errors
    ///
    /// * `PolicyNotHeld` - the user does not hold `policy_id`
    /// * `PlanNotOffered` - no catalog entry with the policy's name offers `plan`
    pub async fn change_plan(
        &self,
        session: &SessionContext,
        policy_id: PolicyId,
        plan: PremiumPlan,
    ) -> Result<Policy, PolicyError> {
        let holder = session.username();
        let _guard = self.locks.acquire(holder).await;

        let mut portfolio = PolicyPortfolio::new(self.holders.get_policies(session, holder).await?);
        let policy = portfolio
            .get_mut(policy_id)
            .ok_or(PolicyError::PolicyNotHeld(policy_id))?;

        let catalog = self.catalog(session).await?;
        if !catalog.plans_named(&policy.policy_name).contains(&plan) {
            return Err(not_offered(policy_id, &plan));
        }

        policy.change_plan(plan)?;
        let updated = policy.clone();
        self.holders.set_policies(session, holder, portfolio.policies()).await?;

        info!(
            policyholder = %holder,
            policy_id = %policy_id,
            premium = %plan.premium,
            duration_months = plan.duration_months,
            "Premium plan changed"
        );
        Ok(updated)
    }

    /// Drops a held policy
    ///
    /// Returns the removed policy.
    pub async fn remove(
        &self,
        session: &SessionContext,
        policy_id: PolicyId,
    ) -> Result<Policy, PolicyError> {
        let holder = session.username();
        let _guard = self.locks.acquire(holder).await;

        let mut portfolio = PolicyPortfolio::new(self.holders.get_policies(session, holder).await?);
        let removed = portfolio.remove(policy_id)?;
        self.holders.set_policies(session, holder, portfolio.policies()).await?;

        info!(policyholder = %holder, policy_id = %policy_id, "Policy removed");
        Ok(removed)
    }
}

fn ensure_offered(
    catalog: &PolicyCatalog,
    policy_id: PolicyId,
    plan: &PremiumPlan,
) -> Result<(), PolicyError> {
    if catalog.offers_plan(policy_id, plan) {
        Ok(())
    } else {
        Err(not_offered(policy_id, plan))
    }
}

fn not_offered(policy_id: PolicyId, plan: &PremiumPlan) -> PolicyError {
    PolicyError::PlanNotOffered {
        policy_id,
        premium: plan.premium,
        duration_months: plan.duration_months,
    }
}
