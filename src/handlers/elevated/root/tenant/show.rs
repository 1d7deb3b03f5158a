// handlers/elevated/root/tenant/show.rs - GET /api/root/tenant/:id handler

use axum::extract::State;

use crate::database::models::Organization;
use crate::middleware::{resolve_scope, ApiResponse, ApiResult, CurrentUser, ScopePolicy, ValidPath};
use crate::state::AppState;

pub async fn tenant_show(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ValidPath(id): ValidPath<String>,
) -> ApiResult<Organization> {
    let scope = resolve_scope(&user, ScopePolicy::CrossTenant, Some(&id))?;
    let organization = state.store.find_organization(&scope, &id).await?;

    state.audit(&user, "tenant.show", &scope);
    Ok(ApiResponse::success(organization))
}
