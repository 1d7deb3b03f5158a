use axum::extract::State;

use crate::database::models::Organization;
use crate::error::ApiError;
use crate::middleware::{resolve_scope, ApiResponse, ApiResult, CurrentUser, ScopePolicy};
use crate::state::AppState;

/// GET /api/organization - the caller's own organization.
///
/// Tenant-only for every role, including SUPER_ADMIN.
pub async fn organization_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> ApiResult<Organization> {
    let scope = resolve_scope(&user, ScopePolicy::TenantOnly, None)?;
    let id = scope
        .organization_id()
        .ok_or_else(|| ApiError::internal("tenant-only scope resolved to unscoped"))?;

    let organization = state.store.find_organization(&scope, id).await?;
    Ok(ApiResponse::success(organization))
}
