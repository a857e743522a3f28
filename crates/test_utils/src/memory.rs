//! In-memory backend
//!
//! Stands in for the CMS in service and HTTP tests. It implements every
//! domain port over plain collections, issues opaque tokens at login and
//! registration, and can be told to fail specific writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use core_kernel::{
    AdapterHealth, ClaimId, DomainPort, HealthCheckResult, HealthCheckable, PortError, SessionContext,
    UserId, Username,
};
use domain_claims::{Claim, ClaimStatus, ClaimsPort, NewClaim};
use domain_party::{LoginOutcome, LoginRequest, PartyPort, RegistrationRequest, UserAccount};
use domain_policy::{CatalogEntry, CatalogPort, Policy, PolicyHolderPort};

#[derive(Debug, Clone)]
struct StoredUser {
    account: UserAccount,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    users: Vec<StoredUser>,
    tokens: HashMap<String, UserId>,
    claims: Vec<Claim>,
    catalog: Vec<CatalogEntry>,
}

/// Every domain port over in-process collections
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    state: RwLock<State>,
    next_user_id: AtomicU64,
    next_claim_id: AtomicU64,
    fail_claim_status_writes: AtomicBool,
    fail_policy_writes: AtomicBool,
    unavailable: AtomicBool,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend serving the given catalog
    pub fn with_catalog(catalog: Vec<CatalogEntry>) -> Self {
        Self {
            state: RwLock::new(State {
                catalog,
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    /// Stores an account and returns a token that resolves to it
    ///
    /// The account id is reassigned.
    pub async fn add_account(&self, mut account: UserAccount, password: impl Into<String>) -> (UserAccount, String) {
        account.id = UserId::new(self.next_user_id.fetch_add(1, Ordering::SeqCst) + 1);
        let token = Self::issue_token();

        let mut state = self.state.write().await;
        state.tokens.insert(token.clone(), account.id);
        state.users.push(StoredUser {
            account: account.clone(),
            password: password.into(),
        });
        (account, token)
    }

    /// Stores a claim as-is, keeping its id
    pub async fn add_claim(&self, claim: Claim) {
        self.next_claim_id.fetch_max(claim.id.get(), Ordering::SeqCst);
        self.state.write().await.claims.push(claim);
    }

    pub async fn claims(&self) -> Vec<Claim> {
        self.state.read().await.claims.clone()
    }

    pub async fn claim(&self, id: ClaimId) -> Option<Claim> {
        self.state.read().await.claims.iter().find(|c| c.id == id).cloned()
    }

    /// Policies currently stored for `username`, empty when unknown
    pub async fn policies_of(&self, username: &str) -> Vec<Policy> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.account.username.as_str() == username)
            .map(|u| u.account.policies.clone())
            .unwrap_or_default()
    }

    pub async fn account(&self, id: UserId) -> Option<UserAccount> {
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| u.account.id == id)
            .map(|u| u.account.clone())
    }

    /// Makes every claim status write fail with a connection error
    pub fn fail_claim_status_writes(&self, fail: bool) {
        self.fail_claim_status_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every policy collection write fail with a connection error
    pub fn fail_policy_writes(&self, fail: bool) {
        self.fail_policy_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every operation fail as if the CMS were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn issue_token() -> String {
        format!("mem-{}", Uuid::new_v4().simple())
    }

    fn check_available(&self) -> Result<(), PortError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::ServiceUnavailable {
                service: "in-memory backend".to_string(),
            });
        }
        Ok(())
    }

    /// Refuses sessions whose token was never issued
    async fn authorize(&self, token: &str) -> Result<UserId, PortError> {
        self.check_available()?;
        self.state
            .read()
            .await
            .tokens
            .get(token)
            .copied()
            .ok_or_else(|| PortError::unauthorized("Missing or invalid credentials"))
    }

    fn write_failure(operation: &str) -> PortError {
        PortError::connection(format!("injected failure: {operation}"))
    }
}

impl DomainPort for InMemoryBackend {}

#[async_trait]
impl HealthCheckable for InMemoryBackend {
    async fn health_check(&self) -> HealthCheckResult {
        let (status, message) = if self.unavailable.load(Ordering::SeqCst) {
            (AdapterHealth::Unhealthy, Some("marked unavailable".to_string()))
        } else {
            (AdapterHealth::Healthy, None)
        };
        HealthCheckResult {
            adapter_id: "in-memory".to_string(),
            status,
            latency_ms: 0,
            message,
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl ClaimsPort for InMemoryBackend {
    async fn list_claims(&self, session: &SessionContext) -> Result<Vec<Claim>, PortError> {
        self.authorize(session.token()).await?;
        Ok(self.claims().await)
    }

    async fn get_claim(&self, session: &SessionContext, id: ClaimId) -> Result<Claim, PortError> {
        self.authorize(session.token()).await?;
        self.claim(id).await.ok_or_else(|| PortError::not_found("Claim", id))
    }

    async fn create_claim(&self, session: &SessionContext, claim: &NewClaim) -> Result<Claim, PortError> {
        self.authorize(session.token()).await?;
        let created = Claim {
            id: ClaimId::new(self.next_claim_id.fetch_add(1, Ordering::SeqCst) + 1),
            policyholder_id: claim.policyholder_id.clone(),
            policy_id: claim.policy_id,
            amount: claim.amount,
            status: claim.status(),
        };
        self.state.write().await.claims.push(created.clone());
        Ok(created)
    }

    async fn set_claim_status(
        &self,
        session: &SessionContext,
        id: ClaimId,
        status: ClaimStatus,
    ) -> Result<Claim, PortError> {
        self.authorize(session.token()).await?;
        if self.fail_claim_status_writes.load(Ordering::SeqCst) {
            return Err(Self::write_failure("set_claim_status"));
        }
        let mut state = self.state.write().await;
        let claim = state
            .claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PortError::not_found("Claim", id))?;
        claim.status = status;
        Ok(claim.clone())
    }
}

#[async_trait]
impl PolicyHolderPort for InMemoryBackend {
    async fn get_policies(&self, session: &SessionContext, holder: &Username) -> Result<Vec<Policy>, PortError> {
        self.authorize(session.token()).await?;
        self.state
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.account.username == holder)
            .map(|u| u.account.policies.clone())
            .ok_or_else(|| PortError::not_found("User", holder))
    }

    async fn set_policies(
        &self,
        session: &SessionContext,
        holder: &Username,
        policies: &[Policy],
    ) -> Result<(), PortError> {
        self.authorize(session.token()).await?;
        if self.fail_policy_writes.load(Ordering::SeqCst) {
            return Err(Self::write_failure("set_policies"));
        }
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| &u.account.username == holder)
            .ok_or_else(|| PortError::not_found("User", holder))?;
        user.account.policies = policies.to_vec();
        Ok(())
    }
}

#[async_trait]
impl CatalogPort for InMemoryBackend {
    async fn list_catalog(&self, session: &SessionContext) -> Result<Vec<CatalogEntry>, PortError> {
        self.authorize(session.token()).await?;
        Ok(self.state.read().await.catalog.clone())
    }
}

#[async_trait]
impl PartyPort for InMemoryBackend {
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome, PortError> {
        self.check_available()?;
        let user = {
            let state = self.state.read().await;
            state
                .users
                .iter()
                .find(|u| {
                    (u.account.username.as_str() == request.identifier || u.account.email == request.identifier)
                        && u.password == request.password
                })
                .map(|u| u.account.clone())
                .ok_or_else(|| PortError::validation("Invalid identifier or password"))?
        };

        let token = Self::issue_token();
        self.state.write().await.tokens.insert(token.clone(), user.id);
        Ok(LoginOutcome { token, user })
    }

    async fn register(&self, request: &RegistrationRequest) -> Result<LoginOutcome, PortError> {
        self.check_available()?;
        {
            let state = self.state.read().await;
            if state
                .users
                .iter()
                .any(|u| u.account.username.as_str() == request.username || u.account.email == request.email)
            {
                return Err(PortError::validation("Email or Username are already taken"));
            }
        }

        let account = UserAccount {
            id: UserId::new(0),
            username: Username::new(request.username.clone()).map_err(|e| PortError::validation(e.to_string()))?,
            email: request.email.clone(),
            age: request.age,
            blocked: false,
            is_admin: false,
            policies: Vec::new(),
        };
        let (user, token) = self.add_account(account, request.password.clone()).await;
        Ok(LoginOutcome { token, user })
    }

    async fn current_user(&self, token: &str) -> Result<UserAccount, PortError> {
        let id = self.authorize(token).await?;
        self.account(id)
            .await
            .ok_or_else(|| PortError::unauthorized("Missing or invalid credentials"))
    }

    async fn list_users(&self, session: &SessionContext) -> Result<Vec<UserAccount>, PortError> {
        self.authorize(session.token()).await?;
        Ok(self.state.read().await.users.iter().map(|u| u.account.clone()).collect())
    }

    async fn get_user(&self, session: &SessionContext, id: UserId) -> Result<UserAccount, PortError> {
        self.authorize(session.token()).await?;
        self.account(id).await.ok_or_else(|| PortError::not_found("User", id))
    }

    async fn set_blocked(&self, session: &SessionContext, id: UserId, blocked: bool) -> Result<UserAccount, PortError> {
        self.authorize(session.token()).await?;
        let mut state = self.state.write().await;
        let user = state
            .users
            .iter_mut()
            .find(|u| u.account.id == id)
            .ok_or_else(|| PortError::not_found("User", id))?;
        user.account.blocked = blocked;
        Ok(user.account.clone())
    }
}
