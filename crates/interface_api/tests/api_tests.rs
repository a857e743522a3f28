//! HTTP API tests
//!
//! The router runs over the in-memory backend. Every desk starts with one
//! policyholder, `alice`, holding Family Health with 5000 left, and one
//! administrator.

use std::sync::Arc;

use axum::http::{header, HeaderValue, StatusCode};
use axum_test::{TestRequest, TestServer};
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{ClaimId, UserId};
use domain_claims::ClaimStatus;
use interface_api::{config::ApiConfig, create_router, AppState, Ports};
use test_utils::{
    assert_left_amount, AccountFixtures, CatalogFixtures, ClaimBuilder, InMemoryBackend, PolicyBuilder,
    FIXTURE_PASSWORD,
};

struct Desk {
    server: TestServer,
    backend: Arc<InMemoryBackend>,
    holder_id: UserId,
    holder_token: String,
    admin_id: UserId,
    admin_token: String,
}

impl Desk {
    async fn new() -> Self {
        let backend = Arc::new(InMemoryBackend::with_catalog(CatalogFixtures::standard()));

        let mut holder = AccountFixtures::account("alice", false);
        holder.policies = vec![PolicyBuilder::new().with_left_amount(dec!(5000)).build()];
        let (holder, holder_token) = backend.add_account(holder, FIXTURE_PASSWORD).await;
        let (admin, admin_token) = backend
            .add_account(AccountFixtures::account("admin", true), FIXTURE_PASSWORD)
            .await;

        let state = AppState::new(Ports::single(backend.clone()), ApiConfig::default());
        let server = TestServer::new(create_router(state)).expect("test server starts");

        Self {
            server,
            backend,
            holder_id: holder.id,
            holder_token,
            admin_id: admin.id,
            admin_token,
        }
    }

    fn as_holder(&self, request: TestRequest) -> TestRequest {
        authorized(request, &self.holder_token)
    }

    fn as_admin(&self, request: TestRequest) -> TestRequest {
        authorized(request, &self.admin_token)
    }

    async fn add_claim(&self, id: u64, amount: rust_decimal::Decimal) {
        self.backend
            .add_claim(ClaimBuilder::new().with_id(id).with_amount(amount).build())
            .await;
    }
}

fn authorized(request: TestRequest, token: &str) -> TestRequest {
    let value = HeaderValue::from_str(&format!("Bearer {token}")).expect("token is a valid header value");
    request.add_header(header::AUTHORIZATION, value)
}

mod health {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let desk = Desk::new().await;
        let response = desk.server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_ready_reports_cms_state() {
        let desk = Desk::new().await;
        let response = desk.server.get("/health/ready").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["cms"]["status"], "healthy");

        desk.backend.set_unavailable(true);
        let response = desk.server.get("/health/ready").await;
        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(response.json::<Value>()["status"], "unavailable");
    }
}

mod auth {
    use super::*;

    #[tokio::test]
    async fn test_login_returns_token_and_role() {
        let desk = Desk::new().await;
        let response = desk
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "identifier": "alice", "password": FIXTURE_PASSWORD }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
        assert_eq!(body["user"]["username"], "alice");
        assert_eq!(body["user"]["is_admin"], false);
    }

    #[tokio::test]
    async fn test_login_with_wrong_password() {
        let desk = Desk::new().await;
        let response = desk
            .server
            .post("/api/v1/auth/login")
            .json(&json!({ "identifier": "alice", "password": "wrong-password" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.json::<Value>()["error"], "unauthorized");
    }

    #[tokio::test]
    async fn test_register_then_use_token() {
        let desk = Desk::new().await;
        let form = AccountFixtures::registration();
        let response = desk
            .server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": form.username,
                "email": form.email,
                "password": form.password,
                "age": form.age,
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        let token = body["token"].as_str().expect("token issued").to_string();

        let profile = authorized(desk.server.get("/api/v1/me"), &token).await;
        profile.assert_status_ok();
        let profile = profile.json::<Value>();
        assert_eq!(profile["username"], form.username.as_str());
        assert_eq!(profile["is_admin"], false);
        assert_eq!(profile["policies"], json!([]));
    }

    #[tokio::test]
    async fn test_register_taken_username() {
        let desk = Desk::new().await;
        let response = desk
            .server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": "alice",
                "email": "another@example.com",
                "password": FIXTURE_PASSWORD,
            }))
            .await;

        response.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_form() {
        let desk = Desk::new().await;
        let response = desk
            .server
            .post("/api/v1/auth/register")
            .json(&json!({
                "username": "al",
                "email": "not-an-email",
                "password": "123",
                "age": 12,
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let message = response.json::<Value>()["message"].as_str().unwrap_or_default().to_string();
        for field in ["age", "email", "password", "username"] {
            assert!(message.contains(field), "{field} missing from {message}");
        }
    }

    #[tokio::test]
    async fn test_missing_token() {
        let desk = Desk::new().await;
        desk.server.get("/api/v1/me").await.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let desk = Desk::new().await;
        authorized(desk.server.get("/api/v1/me"), "forged")
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_cms_outage_is_a_bad_gateway() {
        let desk = Desk::new().await;
        desk.backend.set_unavailable(true);
        desk.as_holder(desk.server.get("/api/v1/me"))
            .await
            .assert_status(StatusCode::BAD_GATEWAY);
    }
}

mod catalog {
    use super::*;

    #[tokio::test]
    async fn test_categories_in_catalog_order() {
        let desk = Desk::new().await;
        let response = desk.as_holder(desk.server.get("/api/v1/catalog/categories")).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>(), json!(["Health", "Motor", "Life"]));
    }

    #[tokio::test]
    async fn test_policies_collapse_by_name() {
        let desk = Desk::new().await;
        let response = desk
            .as_holder(desk.server.get("/api/v1/catalog/categories/Health/policies"))
            .await;
        response.assert_status_ok();

        let policies = response.json::<Value>();
        let policies = policies.as_array().expect("array");
        assert_eq!(policies.len(), 1);
        assert_eq!(policies[0]["name"], "Family Health");
    }

    #[tokio::test]
    async fn test_plans_merge_entries_with_the_same_name() {
        let desk = Desk::new().await;
        let path = format!(
            "/api/v1/catalog/policies/{}/plans",
            CatalogFixtures::FAMILY_HEALTH.get()
        );
        let response = desk.as_holder(desk.server.get(&path)).await;
        response.assert_status_ok();

        let durations: Vec<u64> = response
            .json::<Value>()
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|p| p["duration_months"].as_u64())
            .collect();
        assert_eq!(durations, vec![12, 24, 36]);
    }

    #[tokio::test]
    async fn test_plans_of_unknown_policy() {
        let desk = Desk::new().await;
        desk.as_holder(desk.server.get("/api/v1/catalog/policies/99/plans"))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod policies {
    use super::*;

    fn comprehensive(premium: u32, months: u32) -> Value {
        json!({
            "policy_id": CatalogFixtures::COMPREHENSIVE.get(),
            "premium": premium,
            "duration_months": months,
        })
    }

    #[tokio::test]
    async fn test_held_policies() {
        let desk = Desk::new().await;
        let response = desk.as_holder(desk.server.get("/api/v1/me/policies")).await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body[0]["policy_name"], "Family Health");
        assert_eq!(body[0]["left_amount"], "5000");
    }

    #[tokio::test]
    async fn test_purchase_starts_with_full_balance() {
        let desk = Desk::new().await;
        let response = desk
            .as_holder(desk.server.post("/api/v1/me/policies"))
            .json(&comprehensive(60, 6))
            .await;

        response.assert_status(StatusCode::CREATED);
        assert_eq!(response.json::<Value>()["left_amount"], "4000");

        let held = desk.backend.policies_of("alice").await;
        assert_eq!(held.len(), 2);
        assert_left_amount(&held, CatalogFixtures::COMPREHENSIVE, dec!(4000));
    }

    #[tokio::test]
    async fn test_purchase_twice_conflicts() {
        let desk = Desk::new().await;
        desk.as_holder(desk.server.post("/api/v1/me/policies"))
            .json(&comprehensive(60, 6))
            .await
            .assert_status(StatusCode::CREATED);

        desk.as_holder(desk.server.post("/api/v1/me/policies"))
            .json(&comprehensive(60, 6))
            .await
            .assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_purchase_with_plan_not_offered() {
        let desk = Desk::new().await;
        desk.as_holder(desk.server.post("/api/v1/me/policies"))
            .json(&comprehensive(10, 6))
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(desk.backend.policies_of("alice").await.len(), 1);
    }

    #[tokio::test]
    async fn test_change_plan_keeps_balance() {
        let desk = Desk::new().await;
        let path = format!("/api/v1/me/policies/{}/plan", CatalogFixtures::FAMILY_HEALTH.get());
        let response = desk
            .as_holder(desk.server.put(&path))
            .json(&json!({ "premium": 250, "duration_months": 36 }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["duration_months"], 36);
        assert_eq!(body["left_amount"], "5000");
    }

    #[tokio::test]
    async fn test_remove_policy() {
        let desk = Desk::new().await;
        let path = format!("/api/v1/me/policies/{}", CatalogFixtures::FAMILY_HEALTH.get());

        desk.as_holder(desk.server.delete(&path))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert!(desk.backend.policies_of("alice").await.is_empty());

        desk.as_holder(desk.server.delete(&path))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}

mod claims {
    use super::*;

    fn approve_path(id: u64) -> String {
        format!("/api/v1/claims/{id}/approve")
    }

    #[tokio::test]
    async fn test_file_claim() {
        let desk = Desk::new().await;
        let response = desk
            .as_holder(desk.server.post("/api/v1/me/claims"))
            .json(&json!({ "policy_id": CatalogFixtures::FAMILY_HEALTH.get(), "amount": 1200 }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["status"], "pending");
        assert_eq!(body["policyholder_id"], "alice");
        assert_eq!(desk.backend.claims().await.len(), 1);
    }

    #[tokio::test]
    async fn test_file_claim_over_balance() {
        let desk = Desk::new().await;
        let response = desk
            .as_holder(desk.server.post("/api/v1/me/claims"))
            .json(&json!({ "policy_id": CatalogFixtures::FAMILY_HEALTH.get(), "amount": 6000 }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "insufficient_balance");
        assert_eq!(body["details"], json!({ "requested": "6000", "available": "5000" }));
        assert!(desk.backend.claims().await.is_empty());
    }

    #[tokio::test]
    async fn test_file_claim_on_policy_not_held() {
        let desk = Desk::new().await;
        desk.as_holder(desk.server.post("/api/v1/me/claims"))
            .json(&json!({ "policy_id": CatalogFixtures::TERM_LIFE.get(), "amount": 100 }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_my_claims_carry_policy_names() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(300)).await;
        desk.backend
            .add_claim(
                ClaimBuilder::new()
                    .with_id(2)
                    .with_policy_id(core_kernel::PolicyId::new(77))
                    .build(),
            )
            .await;
        desk.backend
            .add_claim(ClaimBuilder::new().with_id(3).with_policyholder("bob").build())
            .await;

        let response = desk.as_holder(desk.server.get("/api/v1/me/claims")).await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        let names: Vec<&str> = body
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|c| c["policy_name"].as_str())
            .collect();
        assert_eq!(names, vec!["Family Health", "Unknown Policy"]);
    }

    #[tokio::test]
    async fn test_admin_list_is_sorted_by_status() {
        let desk = Desk::new().await;
        for (id, status) in [
            (1, ClaimStatus::Rejected),
            (2, ClaimStatus::Pending),
            (3, ClaimStatus::Approved),
            (4, ClaimStatus::Pending),
        ] {
            desk.backend
                .add_claim(ClaimBuilder::new().with_id(id).with_status(status).build())
                .await;
        }

        let response = desk.as_admin(desk.server.get("/api/v1/claims")).await;
        response.assert_status_ok();

        let ids: Vec<u64> = response
            .json::<Value>()
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|c| c["id"].as_u64())
            .collect();
        assert_eq!(ids, vec![2, 4, 3, 1]);
    }

    #[tokio::test]
    async fn test_admin_routes_refuse_policyholders() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(3000)).await;

        desk.as_holder(desk.server.get("/api/v1/claims"))
            .await
            .assert_status(StatusCode::FORBIDDEN);
        desk.as_holder(desk.server.post(&approve_path(1)))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        assert_left_amount(&desk.backend.policies_of("alice").await, CatalogFixtures::FAMILY_HEALTH, dec!(5000));
    }

    #[tokio::test]
    async fn test_approve_debits_policy() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(3000)).await;

        let response = desk.as_admin(desk.server.post(&approve_path(1))).await;
        response.assert_status_ok();

        let body = response.json::<Value>();
        assert_eq!(body["claim"]["status"], "approved");
        assert_eq!(body["previous_left_amount"], "5000");
        assert_eq!(body["new_left_amount"], "2000");
        assert_left_amount(&desk.backend.policies_of("alice").await, CatalogFixtures::FAMILY_HEALTH, dec!(2000));
    }

    #[tokio::test]
    async fn test_approve_twice_conflicts() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(3000)).await;

        desk.as_admin(desk.server.post(&approve_path(1)))
            .await
            .assert_status_ok();
        desk.as_admin(desk.server.post(&approve_path(1)))
            .await
            .assert_status(StatusCode::CONFLICT);

        assert_left_amount(&desk.backend.policies_of("alice").await, CatalogFixtures::FAMILY_HEALTH, dec!(2000));
    }

    #[tokio::test]
    async fn test_approve_over_balance() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(6000)).await;

        let response = desk.as_admin(desk.server.post(&approve_path(1))).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            response.json::<Value>()["details"],
            json!({ "requested": "6000", "available": "5000" })
        );

        let claim = desk.backend.claim(ClaimId::new(1)).await.expect("claim kept");
        assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_negative_claim_keeps_balance() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(-1000)).await;

        let response = desk.as_admin(desk.server.post(&approve_path(1))).await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(response.json::<Value>()["error"], "validation_error");

        let policies = desk.backend.policies_of("alice").await;
        assert_left_amount(&policies, policies[0].policy_id, dec!(5000));
        let claim = desk.backend.claim(ClaimId::new(1)).await.expect("claim kept");
        assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_approve_unknown_claim() {
        let desk = Desk::new().await;
        desk.as_admin(desk.server.post(&approve_path(42)))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_failed_status_write_restores_balance() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(3000)).await;
        desk.backend.fail_claim_status_writes(true);

        desk.as_admin(desk.server.post(&approve_path(1)))
            .await
            .assert_status(StatusCode::BAD_GATEWAY);

        assert_left_amount(&desk.backend.policies_of("alice").await, CatalogFixtures::FAMILY_HEALTH, dec!(5000));
        let claim = desk.backend.claim(ClaimId::new(1)).await.expect("claim kept");
        assert_eq!(claim.status, ClaimStatus::Pending);
    }

    #[tokio::test]
    async fn test_reject_leaves_balance() {
        let desk = Desk::new().await;
        desk.add_claim(1, dec!(3000)).await;

        let response = desk.as_admin(desk.server.post("/api/v1/claims/1/reject")).await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "rejected");

        assert_left_amount(&desk.backend.policies_of("alice").await, CatalogFixtures::FAMILY_HEALTH, dec!(5000));
        desk.as_admin(desk.server.post(&approve_path(1)))
            .await
            .assert_status(StatusCode::CONFLICT);
    }
}

mod users {
    use super::*;

    fn blocked_path(id: UserId) -> String {
        format!("/api/v1/users/{}/blocked", id.get())
    }

    #[tokio::test]
    async fn test_list_excludes_admins() {
        let desk = Desk::new().await;
        let response = desk.as_admin(desk.server.get("/api/v1/users")).await;
        response.assert_status_ok();

        let names: Vec<String> = response
            .json::<Value>()
            .as_array()
            .expect("array")
            .iter()
            .filter_map(|u| u["username"].as_str().map(str::to_string))
            .collect();
        assert_eq!(names, vec!["alice".to_string()]);
    }

    #[tokio::test]
    async fn test_blocked_user_loses_access() {
        let desk = Desk::new().await;
        let response = desk
            .as_admin(desk.server.put(&blocked_path(desk.holder_id)))
            .json(&json!({ "blocked": true }))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["blocked"], true);

        desk.as_holder(desk.server.get("/api/v1/me"))
            .await
            .assert_status(StatusCode::FORBIDDEN);

        desk.as_admin(desk.server.put(&blocked_path(desk.holder_id)))
            .json(&json!({ "blocked": false }))
            .await
            .assert_status_ok();
        desk.as_holder(desk.server.get("/api/v1/me"))
            .await
            .assert_status_ok();
    }

    #[tokio::test]
    async fn test_admins_cannot_be_blocked() {
        let desk = Desk::new().await;
        desk.as_admin(desk.server.put(&blocked_path(desk.admin_id)))
            .json(&json!({ "blocked": true }))
            .await
            .assert_status(StatusCode::CONFLICT);

        let admin = desk.backend.account(desk.admin_id).await.expect("admin kept");
        assert!(!admin.blocked);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let desk = Desk::new().await;
        desk.as_admin(desk.server.put(&blocked_path(UserId::new(404))))
            .json(&json!({ "blocked": true }))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_policyholders_cannot_manage_users() {
        let desk = Desk::new().await;
        desk.as_holder(desk.server.get("/api/v1/users"))
            .await
            .assert_status(StatusCode::FORBIDDEN);
    }
}
