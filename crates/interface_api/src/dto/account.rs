//! Account DTOs

use serde::Serialize;

use core_kernel::{UserId, Username};
use domain_party::{LoginOutcome, UserAccount};

use crate::dto::policy::PolicyResponse;

/// An account without its embedded policies
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub username: Username,
    pub email: String,
    pub age: Option<u32>,
    pub blocked: bool,
    pub is_admin: bool,
}

impl From<UserAccount> for UserResponse {
    fn from(account: UserAccount) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            age: account.age,
            blocked: account.blocked,
            is_admin: account.is_admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<LoginOutcome> for LoginResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            user: outcome.user.into(),
        }
    }
}

/// The session user and the policies they hold
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub policies: Vec<PolicyResponse>,
}

impl From<UserAccount> for ProfileResponse {
    fn from(mut account: UserAccount) -> Self {
        let policies = std::mem::take(&mut account.policies)
            .into_iter()
            .map(PolicyResponse::from)
            .collect();
        Self {
            user: account.into(),
            policies,
        }
    }
}
