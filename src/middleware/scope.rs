//! Organization scoping.
//!
//! Every store call takes an [`OrganizationScope`]. Tenant-scoped roles always
//! resolve to their own organization; only a super admin on a cross-tenant
//! route can be unscoped or target another tenant.

use serde::Serialize;

use crate::auth::UserContext;
use crate::error::ApiError;

/// Tenant filter applied to data access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "organizationId", rename_all = "snake_case")]
pub enum OrganizationScope {
    Tenant(String),
    Unscoped,
}

impl OrganizationScope {
    /// Organization id to filter by, `None` when unscoped.
    pub fn organization_id(&self) -> Option<&str> {
        match self {
            OrganizationScope::Tenant(id) => Some(id),
            OrganizationScope::Unscoped => None,
        }
    }

    /// Whether a row owned by `organization_id` is visible in this scope.
    pub fn permits(&self, organization_id: &str) -> bool {
        match self {
            OrganizationScope::Tenant(id) => id == organization_id,
            OrganizationScope::Unscoped => true,
        }
    }
}

/// Per-route declaration of whether cross-tenant access is allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopePolicy {
    TenantOnly,
    CrossTenant,
}

/// Resolve the scope a handler must filter by.
///
/// `requested` is the client-supplied target organization (e.g. an
/// `organizationId` query parameter). It is honored only for a super admin on
/// a cross-tenant route.
pub fn resolve_scope(
    user: &UserContext,
    policy: ScopePolicy,
    requested: Option<&str>,
) -> Result<OrganizationScope, ApiError> {
    let requested = requested.map(str::trim).filter(|id| !id.is_empty());

    if user.is_super_admin() && policy == ScopePolicy::CrossTenant {
        return Ok(match requested {
            Some(target) => OrganizationScope::Tenant(target.to_string()),
            None => OrganizationScope::Unscoped,
        });
    }

    let own = user.organization_id.as_deref().ok_or_else(|| {
        tracing::warn!(user_id = %user.id, role = %user.role, "user has no organization");
        ApiError::validation_error("User is not associated with an organization")
    })?;

    if let Some(target) = requested.filter(|target| *target != own) {
        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            requested_organization = target,
            organization_id = own,
            "ignoring requested organization outside caller scope"
        );
    }

    Ok(OrganizationScope::Tenant(own.to_string()))
}
