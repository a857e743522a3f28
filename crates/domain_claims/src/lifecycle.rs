//! Claim lifecycle controller
//!
//! Owns every status change of a claim and the balance write that comes
//! with an approval.
//!
//! # Approval sequence
//!
//! ```text
//! read claim ─► lock holder ─► re-read claim ─► read policies ─► evaluate
//!     ─► write policies (debit) ─► write claim status
//!                                      │ fails
//!                                      ▼
//!                     re-read policies ─► credit ─► write policies
//! ```
//!
//! The balance is written before the status, so a failed status write can
//! be undone by crediting the amount back. Only when that compensation also
//! fails does the caller see [`ClaimError::SettlementIncomplete`].

use std::sync::Arc;

use tracing::{error, info, warn};

use core_kernel::{ClaimId, PortError, SessionContext, Username};
use domain_policy::{HolderLocks, PolicyHolderPort, PolicyPortfolio};

use crate::claim::{Claim, ClaimStatus};
use crate::error::ClaimError;
use crate::filing::FileClaimRequest;
use crate::listing::{filed_by, sort_by_status};
use crate::ports::ClaimsPort;
use crate::settlement::{self, Settlement};

/// Result of a successful approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Approval {
    /// The claim as stored after the status write
    pub claim: Claim,
    /// The balance change that was written
    pub settlement: Settlement,
}

/// Orchestrates claim filing, listing, approval and rejection
#[derive(Clone)]
pub struct ClaimLifecycleController {
    claims: Arc<dyn ClaimsPort>,
    holders: Arc<dyn PolicyHolderPort>,
    locks: Arc<HolderLocks>,
}

impl ClaimLifecycleController {
    /// Creates a new controller
    ///
    /// # Arguments
    ///
    /// * `claims` - Port to claim records
    /// * `holders` - Port to the policies embedded in accounts
    /// * `locks` - Holder locks shared with every other policy writer
    pub fn new(
        claims: Arc<dyn ClaimsPort>,
        holders: Arc<dyn PolicyHolderPort>,
        locks: Arc<HolderLocks>,
    ) -> Self {
        Self { claims, holders, locks }
    }

    /// All claims, pending first, then approved, then rejected
    pub async fn list_claims(&self, session: &SessionContext) -> Result<Vec<Claim>, ClaimError> {
        let mut claims = self.claims.list_claims(session).await?;
        sort_by_status(&mut claims);
        Ok(claims)
    }

    /// Claims filed by the session user, in listing order
    pub async fn my_claims(&self, session: &SessionContext) -> Result<Vec<Claim>, ClaimError> {
        let mut claims = filed_by(self.claims.list_claims(session).await?, session.username());
        sort_by_status(&mut claims);
        Ok(claims)
    }

    pub async fn get_claim(&self, session: &SessionContext, id: ClaimId) -> Result<Claim, ClaimError> {
        self.claims.get_claim(session, id).await.map_err(|e| {
            if e.is_not_found() {
                ClaimError::ClaimNotFound(id)
            } else {
                ClaimError::PersistenceFailure(e)
            }
        })
    }

    /// Files a pending claim for the session user
    ///
    /// # Errors
    ///
    /// * `InvalidAmount` - amount is zero or negative
    /// * `PolicyNotFound` - the user does not hold the policy
    /// * `InsufficientBalance` - amount exceeds the policy's remaining balance
    pub async fn file_claim(
        &self,
        session: &SessionContext,
        request: FileClaimRequest,
    ) -> Result<Claim, ClaimError> {
        let holder = session.username();
        let policies = self.holders.get_policies(session, holder).await?;
        let new_claim = request.validate(holder, &policies)?;

        let claim = self.claims.create_claim(session, &new_claim).await?;
        info!(
            claim_id = %claim.id,
            policyholder = %holder,
            policy_id = %claim.policy_id,
            amount = %claim.amount,
            "Claim filed"
        );
        Ok(claim)
    }

    /// Approves a pending claim and debits the claimant's policy
    ///
    /// # Errors
    ///
    /// * `ClaimNotFound` - no claim has `id`
    /// * `InvalidStatusTransition` - the claim is not pending; nothing is written
    /// * `PolicyNotFound` - the claimant does not hold the policy; nothing is written
    /// * `InsufficientBalance` - the balance does not cover the amount; nothing is written
    /// * `PersistenceFailure` - a write failed; state is unchanged or was compensated
    /// * `SettlementIncomplete` - balance debited, claim still pending
    pub async fn approve(&self, session: &SessionContext, id: ClaimId) -> Result<Approval, ClaimError> {
        let claim = self.get_claim(session, id).await?;
        claim.ensure_transition(ClaimStatus::Approved)?;

        let holder = claim.policyholder_id.clone();
        let _guard = self.locks.acquire(&holder).await;

        // The claim may have been settled while waiting for the lock.
        let claim = self.get_claim(session, id).await?;
        let mut portfolio = self.load_portfolio(session, &claim).await?;

        let settlement = match settlement::evaluate(&claim, portfolio.policies()) {
            Ok(settlement) => settlement,
            Err(err) => {
                if err.is_warning() {
                    warn!(claim_id = %id, policyholder = %holder, error = %err, "Claim cannot be approved");
                } else {
                    error!(claim_id = %id, policyholder = %holder, error = %err, "Claim evaluation failed");
                }
                return Err(err);
            }
        };

        settlement.apply(&mut portfolio)?;
        self.holders.set_policies(session, &holder, portfolio.policies()).await?;

        match self.claims.set_claim_status(session, id, ClaimStatus::Approved).await {
            Ok(claim) => {
                info!(
                    claim_id = %id,
                    policyholder = %holder,
                    policy_id = %settlement.policy_id,
                    amount = %settlement.amount,
                    left_amount = %settlement.new_left_amount,
                    "Claim approved"
                );
                Ok(Approval { claim, settlement })
            }
            Err(write_err) => Err(self.compensate(session, &settlement, write_err).await),
        }
    }

    /// Rejects a pending claim; no policy is touched
    pub async fn reject(&self, session: &SessionContext, id: ClaimId) -> Result<Claim, ClaimError> {
        let claim = self.get_claim(session, id).await?;
        claim.ensure_transition(ClaimStatus::Rejected)?;

        let _guard = self.locks.acquire(&claim.policyholder_id).await;
        let claim = self.get_claim(session, id).await?;
        claim.ensure_transition(ClaimStatus::Rejected)?;

        let claim = self.claims.set_claim_status(session, id, ClaimStatus::Rejected).await?;
        info!(claim_id = %id, policyholder = %claim.policyholder_id, "Claim rejected");
        Ok(claim)
    }

    async fn load_portfolio(
        &self,
        session: &SessionContext,
        claim: &Claim,
    ) -> Result<PolicyPortfolio, ClaimError> {
        match self.holders.get_policies(session, &claim.policyholder_id).await {
            Ok(policies) => Ok(PolicyPortfolio::new(policies)),
            // No account means no policy either.
            Err(e) if e.is_not_found() => Err(ClaimError::PolicyNotFound {
                policyholder: claim.policyholder_id.clone(),
                policy_id: claim.policy_id,
            }),
            Err(e) => Err(e.into()),
        }
    }

    /// Credits a debited balance back after the status write failed
    async fn compensate(
        &self,
        session: &SessionContext,
        settlement: &Settlement,
        write_err: PortError,
    ) -> ClaimError {
        warn!(
            claim_id = %settlement.claim_id,
            policyholder = %settlement.policyholder,
            error = %write_err,
            "Claim status write failed after debit, restoring balance"
        );

        match self.restore_balance(session, &settlement.policyholder, settlement).await {
            Ok(()) => ClaimError::PersistenceFailure(write_err),
            Err(restore_err) => {
                error!(
                    claim_id = %settlement.claim_id,
                    policyholder = %settlement.policyholder,
                    policy_id = %settlement.policy_id,
                    amount = %settlement.amount,
                    error = %restore_err,
                    "Balance restore failed, settlement needs reconciliation"
                );
                ClaimError::SettlementIncomplete {
                    claim_id: settlement.claim_id,
                    policyholder: settlement.policyholder.clone(),
                    policy_id: settlement.policy_id,
                    amount: settlement.amount,
                    source: write_err,
                }
            }
        }
    }

    async fn restore_balance(
        &self,
        session: &SessionContext,
        holder: &Username,
        settlement: &Settlement,
    ) -> Result<(), ClaimError> {
        let mut portfolio = PolicyPortfolio::new(self.holders.get_policies(session, holder).await?);
        let restored = settlement.reverse(&mut portfolio)?;
        self.holders.set_policies(session, holder, portfolio.policies()).await?;
        info!(
            claim_id = %settlement.claim_id,
            policy_id = %settlement.policy_id,
            left_amount = %restored,
            "Balance restored"
        );
        Ok(())
    }
}
