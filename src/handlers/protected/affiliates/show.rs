use axum::extract::State;
use serde::Deserialize;

use crate::database::models::Affiliate;
use crate::middleware::{resolve_scope, ApiResponse, ApiResult, CurrentUser, ScopePolicy, ValidPath, ValidQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateQuery {
    pub organization_id: Option<String>,
}

/// GET /api/affiliates/:id - affiliate details.
///
/// An affiliate belonging to another tenant is reported as not found.
pub async fn affiliate_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<String>,
    ValidQuery(query): ValidQuery<AffiliateQuery>,
) -> ApiResult<Affiliate> {
    let scope = resolve_scope(&user, ScopePolicy::CrossTenant, query.organization_id.as_deref())?;
    let affiliate = state.store.find_affiliate(&scope, &id).await?;

    state.audit(&user, "affiliate.view", &scope);
    Ok(ApiResponse::success(affiliate))
}
