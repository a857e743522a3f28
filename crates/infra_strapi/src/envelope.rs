//! Wire types for the Strapi REST API
//!
//! Decimal amounts are sent as JSON numbers, the way the CMS stores them,
//! and accepted back as numbers or numeric strings. Numeric ids stored in
//! string fields are accepted in either form.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{ClaimId, PolicyId, UserId, Username};
use domain_claims::{Claim, ClaimStatus, NewClaim};
use domain_party::{LoginOutcome, RegistrationRequest, UserAccount};
use domain_policy::{CatalogEntry, Policy, PremiumPlan};

use crate::error::StrapiError;

/// Collection entry: `{ id, attributes }`
#[derive(Debug, Clone, Deserialize)]
pub struct Entry<A> {
    pub id: u64,
    pub attributes: A,
}

/// Single-entry response: `{ data: { id, attributes } }`
#[derive(Debug, Clone, Deserialize)]
pub struct Single<A> {
    pub data: Entry<A>,
}

/// Collection response: `{ data: [...], meta: { pagination } }`
#[derive(Debug, Clone, Deserialize)]
pub struct Collection<A> {
    pub data: Vec<Entry<A>>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub page_count: u32,
    pub total: u64,
}

/// Request body wrapper for content-type writes: `{ data: ... }`
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ClaimAttributes {
    pub policyholder_id: String,
    #[serde(deserialize_with = "lenient::id")]
    pub policy_id: u64,
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl Entry<ClaimAttributes> {
    pub fn into_claim(self) -> Result<Claim, StrapiError> {
        let policyholder_id = Username::new(self.attributes.policyholder_id)
            .map_err(|e| StrapiError::decode(format!("claim {}", self.id), e.to_string()))?;
        Ok(Claim {
            id: ClaimId::new(self.id),
            policyholder_id,
            policy_id: PolicyId::new(self.attributes.policy_id),
            amount: self.attributes.amount,
            status: self.attributes.status,
        })
    }
}

impl Entry<serde_json::Value> {
    /// Decodes one claim record of a listing on its own
    pub fn decode_claim(self) -> Result<Claim, StrapiError> {
        let attributes: ClaimAttributes = serde_json::from_value(self.attributes)
            .map_err(|e| StrapiError::decode(format!("claim {}", self.id), e.to_string()))?;
        Entry { id: self.id, attributes }.into_claim()
    }
}

/// Claim as written by the desk; the CMS stores `policy_id` as a string
#[derive(Debug, Serialize)]
pub struct NewClaimAttributes {
    pub policyholder_id: String,
    pub policy_id: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub status: ClaimStatus,
}

impl From<&NewClaim> for NewClaimAttributes {
    fn from(claim: &NewClaim) -> Self {
        Self {
            policyholder_id: claim.policyholder_id.to_string(),
            policy_id: claim.policy_id.get().to_string(),
            amount: claim.amount,
            status: claim.status(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatusUpdate {
    pub status: ClaimStatus,
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WirePlan {
    pub premium: Decimal,
    #[serde(deserialize_with = "lenient::months")]
    pub duration: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CatalogAttributes {
    pub name: String,
    pub category: String,
    pub sum_assured: Decimal,
    #[serde(default)]
    pub premium_plans: Option<OneOrMany<WirePlan>>,
}

impl Entry<CatalogAttributes> {
    pub fn into_catalog_entry(self) -> CatalogEntry {
        let premium_plans = self
            .attributes
            .premium_plans
            .map(OneOrMany::into_vec)
            .unwrap_or_default()
            .into_iter()
            .map(|p| PremiumPlan::new(p.premium, p.duration))
            .collect();
        CatalogEntry {
            id: PolicyId::new(self.id),
            name: self.attributes.name,
            category: self.attributes.category,
            sum_assured: self.attributes.sum_assured,
            premium_plans,
        }
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Held policy as embedded in the user record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WirePolicy {
    #[serde(deserialize_with = "lenient::id")]
    pub policy_id: u64,
    pub policy_name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub sum_assured: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub premium: Decimal,
    #[serde(deserialize_with = "lenient::months")]
    pub duration: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub left_amount: Decimal,
    #[serde(default)]
    pub version: u64,
}

impl From<&Policy> for WirePolicy {
    fn from(policy: &Policy) -> Self {
        Self {
            policy_id: policy.policy_id.get(),
            policy_name: policy.policy_name.clone(),
            sum_assured: policy.sum_assured,
            premium: policy.premium,
            duration: policy.duration_months,
            left_amount: policy.left_amount,
            version: policy.version,
        }
    }
}

impl From<WirePolicy> for Policy {
    fn from(wire: WirePolicy) -> Self {
        Policy {
            policy_id: PolicyId::new(wire.policy_id),
            policy_name: wire.policy_name,
            sum_assured: wire.sum_assured,
            premium: wire.premium,
            duration_months: wire.duration,
            left_amount: wire.left_amount,
            version: wire.version,
        }
    }
}

/// users-permissions user record
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, deserialize_with = "lenient::opt_u32")]
    pub age: Option<u32>,
    #[serde(default)]
    pub blocked: Option<bool>,
    #[serde(rename = "isAdmin", default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub policies: Option<Vec<WirePolicy>>,
}

impl UserRecord {
    pub fn into_account(self) -> Result<UserAccount, StrapiError> {
        let username = Username::new(self.username)
            .map_err(|e| StrapiError::decode(format!("user {}", self.id), e.to_string()))?;
        Ok(UserAccount {
            id: UserId::new(self.id),
            username,
            email: self.email,
            age: self.age,
            blocked: self.blocked.unwrap_or(false),
            is_admin: self.is_admin.unwrap_or(false),
            policies: self
                .policies
                .unwrap_or_default()
                .into_iter()
                .map(Policy::from)
                .collect(),
        })
    }
}

#[derive(Debug, Serialize)]
pub struct PoliciesUpdate {
    pub policies: Vec<WirePolicy>,
}

#[derive(Debug, Serialize)]
pub struct BlockedUpdate {
    pub blocked: bool,
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct LoginBody<'a> {
    pub identifier: &'a str,
    pub password: &'a str,
}

/// New accounts start unblocked, without admin rights and without policies
#[derive(Debug, Serialize)]
pub struct RegisterBody<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub blocked: bool,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub policies: Vec<WirePolicy>,
}

impl<'a> From<&'a RegistrationRequest> for RegisterBody<'a> {
    fn from(request: &'a RegistrationRequest) -> Self {
        Self {
            username: &request.username,
            email: &request.email,
            password: &request.password,
            age: request.age,
            blocked: false,
            is_admin: false,
            policies: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub jwt: String,
    pub user: UserRecord,
}

impl AuthResponse {
    pub fn into_outcome(self) -> Result<LoginOutcome, StrapiError> {
        Ok(LoginOutcome {
            token: self.jwt,
            user: self.user.into_account()?,
        })
    }
}

mod lenient {
    use serde::de::{Deserializer, Error};
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(u64),
        String(String),
    }

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => s
                .trim()
                .parse()
                .map_err(|_| D::Error::custom(format!("'{s}' is not a numeric id"))),
        }
    }

    pub fn months<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let value = id(deserializer)?;
        u32::try_from(value).map_err(|_| D::Error::custom(format!("duration {value} out of range")))
    }

    /// Null, empty string and missing all read as `None`
    pub fn opt_u32<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumberOrString::String(s)) if s.trim().is_empty() => Ok(None),
            Some(NumberOrString::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("'{s}' is not a number"))),
            Some(NumberOrString::Number(n)) => u32::try_from(n)
                .map(Some)
                .map_err(|_| D::Error::custom(format!("{n} out of range"))),
        }
    }
}
