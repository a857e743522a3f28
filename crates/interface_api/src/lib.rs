//! HTTP API Layer
//!
//! This crate provides the REST API of the claims desk using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for each resource
//! - **Middleware**: Session resolution, admin authorization, audit logging
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Domain errors mapped to consistent responses
//!
//! Every request under `/api/v1`, apart from login and registration,
//! carries a CMS bearer token. The session middleware turns it into a
//! [`SessionContext`](core_kernel::SessionContext) that handlers pass
//! explicitly to each service call.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState, Ports};
//!
//! let state = AppState::new(ports, config);
//! let app = create_router(state);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::sync::Arc;

use axum::{
    Router,
    routing::{delete, get, post, put},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use core_kernel::HealthCheckable;
use domain_claims::{ClaimLifecycleController, ClaimsPort};
use domain_party::{AccountService, PartyPort};
use domain_policy::{CatalogPort, HolderLocks, PolicyHolderPort, PolicyService};
use infra_strapi::StrapiBackend;

use crate::auth::admin_middleware;
use crate::config::ApiConfig;
use crate::middleware::{audit_middleware, session_middleware};
use crate::handlers::{account, catalog, claims, health, policy, users};

/// The ports the desk runs on
#[derive(Clone)]
pub struct Ports {
    pub claims: Arc<dyn ClaimsPort>,
    pub holders: Arc<dyn PolicyHolderPort>,
    pub catalog: Arc<dyn CatalogPort>,
    pub party: Arc<dyn PartyPort>,
    /// Probed by the readiness check
    pub health: Arc<dyn HealthCheckable>,
}

impl Ports {
    /// Ports backed by one Strapi instance
    pub fn strapi(backend: &StrapiBackend) -> Self {
        let policies = backend.policies();
        Self {
            claims: backend.claims(),
            holders: policies.clone(),
            catalog: policies,
            party: backend.party(),
            health: backend.client(),
        }
    }

    /// Every port served by one backend value
    pub fn single<B>(backend: Arc<B>) -> Self
    where
        B: ClaimsPort + PolicyHolderPort + CatalogPort + PartyPort + HealthCheckable,
    {
        Self {
            claims: backend.clone(),
            holders: backend.clone(),
            catalog: backend.clone(),
            party: backend.clone(),
            health: backend,
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub policies: PolicyService,
    pub claims: ClaimLifecycleController,
    pub health: Arc<dyn HealthCheckable>,
    pub config: ApiConfig,
}

impl AppState {
    /// Wires the services over `ports`
    ///
    /// The policy service and the claims controller share one set of
    /// holder locks, so their writes to a holder's policies never overlap.
    pub fn new(ports: Ports, config: ApiConfig) -> Self {
        let locks = Arc::new(HolderLocks::new());
        Self {
            accounts: AccountService::new(ports.party),
            policies: PolicyService::new(ports.holders.clone(), ports.catalog, locks.clone()),
            claims: ClaimLifecycleController::new(ports.claims, ports.holders, locks),
            health: ports.health,
            config,
        }
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Services and configuration shared by the handlers
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let auth_routes = Router::new()
        .route("/login", post(account::login))
        .route("/register", post(account::register));

    let catalog_routes = Router::new()
        .route("/categories", get(catalog::categories))
        .route("/categories/:category/policies", get(catalog::policies_in_category))
        .route("/policies/:id/plans", get(catalog::premium_plans));

    let me_routes = Router::new()
        .route("/", get(account::profile))
        .route("/policies", get(policy::held_policies).post(policy::purchase))
        .route("/policies/:id", delete(policy::remove))
        .route("/policies/:id/plan", put(policy::change_plan))
        .route("/claims", get(claims::my_claims).post(claims::file_claim));

    // Admin routes
    let admin_routes = Router::new()
        .route("/claims", get(claims::list_claims))
        .route("/claims/:id/approve", post(claims::approve))
        .route("/claims/:id/reject", post(claims::reject))
        .route("/users", get(users::list_users))
        .route("/users/:id/blocked", put(users::set_blocked))
        .route_layer(axum_middleware::from_fn(admin_middleware));

    // Session-protected API routes
    let protected_routes = Router::new()
        .nest("/catalog", catalog_routes)
        .nest("/me", me_routes)
        .merge(admin_routes)
        .layer(axum_middleware::from_fn(audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), session_middleware));

    let api_routes = Router::new()
        .nest("/auth", auth_routes)
        .merge(protected_routes);

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
