//! Ordered collection of policies held by one account

use core_kernel::PolicyId;

use crate::error::PolicyError;
use crate::policy::Policy;

/// The policies embedded in one account, in purchase order
///
/// The CMS replaces this collection as a whole, so every mutation is made
/// here and the full vector is written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyPortfolio {
    policies: Vec<Policy>,
}

impl PolicyPortfolio {
    pub fn new(policies: Vec<Policy>) -> Self {
        Self { policies }
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }

    pub fn holds(&self, policy_id: PolicyId) -> bool {
        self.get(policy_id).is_some()
    }

    pub fn get(&self, policy_id: PolicyId) -> Option<&Policy> {
        self.policies.iter().find(|p| p.policy_id == policy_id)
    }

    pub fn get_mut(&mut self, policy_id: PolicyId) -> Option<&mut Policy> {
        self.policies.iter_mut().find(|p| p.policy_id == policy_id)
    }

    /// Appends a policy; one policy per catalog entry
    pub fn add(&mut self, policy: Policy) -> Result<(), PolicyError> {
        if self.holds(policy.policy_id) {
            return Err(PolicyError::DuplicatePolicy(policy.policy_id));
        }
        self.policies.push(policy);
        Ok(())
    }

    /// Removes a policy, keeping the order of the rest
    pub fn remove(&mut self, policy_id: PolicyId) -> Result<Policy, PolicyError> {
        let index = self
            .policies
            .iter()
            .position(|p| p.policy_id == policy_id)
            .ok_or(PolicyError::PolicyNotHeld(policy_id))?;
        Ok(self.policies.remove(index))
    }
}

impl From<Vec<Policy>> for PolicyPortfolio {
    fn from(policies: Vec<Policy>) -> Self {
        Self::new(policies)
    }
}
