// handlers/elevated/root/tenant/list.rs - GET /api/root/tenant handler

use axum::extract::State;
use serde::Deserialize;

use crate::database::models::Organization;
use crate::middleware::{resolve_scope, ApiResponse, ApiResult, CurrentUser, ScopePolicy, ValidQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TenantListQuery {
    pub organization_id: Option<String>,
}

pub async fn tenant_list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidQuery(query): ValidQuery<TenantListQuery>,
) -> ApiResult<Vec<Organization>> {
    let scope = resolve_scope(&user, ScopePolicy::CrossTenant, query.organization_id.as_deref())?;
    let organizations = state.store.list_organizations(&scope).await?;

    state.audit(&user, "tenant.list", &scope);
    Ok(ApiResponse::success(organizations))
}
