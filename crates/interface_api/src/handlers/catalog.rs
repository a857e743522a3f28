//! Catalog browsing handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use core_kernel::{PolicyId, SessionContext};
use domain_policy::{CatalogPolicy, PremiumPlan};

use crate::{error::ApiError, AppState};

/// Distinct categories, in catalog order
pub async fn categories(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<Vec<String>>, ApiError> {
    let catalog = state.policies.catalog(&session).await?;
    Ok(Json(catalog.categories().into_iter().map(str::to_string).collect()))
}

/// One entry per policy name within the category
pub async fn policies_in_category(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CatalogPolicy>>, ApiError> {
    let catalog = state.policies.catalog(&session).await?;
    Ok(Json(catalog.policies_in(&category)))
}

/// Every plan offered under the policy's name
pub async fn premium_plans(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<PremiumPlan>>, ApiError> {
    let id = PolicyId::new(id);
    let catalog = state.policies.catalog(&session).await?;
    if catalog.entry(id).is_none() {
        return Err(ApiError::NotFound(format!("Catalog entry not found: {id}")));
    }
    Ok(Json(catalog.premium_plans(id)))
}
