//! Declarative authorization rules.
//!
//! A route is gated by an [`AuthorizationRule`] evaluated by the guard
//! middleware. Finer distinctions on a role's sub-tag are expressed as
//! [`TagRequirement`]s and enforced inside the handler against the resolved
//! [`UserContext`].

use crate::error::ApiError;

use super::{Role, UserContext};

/// Allow-list attached to a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationRule {
    /// Any caller with a valid session.
    Authenticated,
    /// Caller's role must be one of these.
    AnyOf(Vec<Role>),
}

impl AuthorizationRule {
    pub fn authenticated() -> Self {
        AuthorizationRule::Authenticated
    }

    pub fn role(role: Role) -> Self {
        AuthorizationRule::AnyOf(vec![role])
    }

    pub fn any_of(roles: impl IntoIterator<Item = Role>) -> Self {
        AuthorizationRule::AnyOf(roles.into_iter().collect())
    }

    pub fn permits(&self, user: &UserContext) -> bool {
        match self {
            AuthorizationRule::Authenticated => true,
            AuthorizationRule::AnyOf(roles) => roles.contains(&user.role),
        }
    }
}

impl std::fmt::Display for AuthorizationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthorizationRule::Authenticated => f.write_str("authenticated"),
            AuthorizationRule::AnyOf(roles) => {
                let names: Vec<&str> = roles.iter().map(Role::as_str).collect();
                write!(f, "any_of[{}]", names.join(","))
            }
        }
    }
}

/// Secondary predicate: callers holding `role` must also carry `tag`.
/// Callers with any other role are unaffected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagRequirement {
    pub role: Role,
    pub tag: &'static str,
    pub message: &'static str,
}

impl TagRequirement {
    pub const fn new(role: Role, tag: &'static str, message: &'static str) -> Self {
        Self { role, tag, message }
    }

    pub fn enforce(&self, user: &UserContext) -> Result<(), ApiError> {
        if user.role != self.role || user.has_tag(self.tag) {
            return Ok(());
        }

        tracing::warn!(
            user_id = %user.id,
            role = %user.role,
            role_tag = user.role_tag.as_deref().unwrap_or("-"),
            required_tag = self.tag,
            decision = "reject_tag",
            "authorization tag requirement failed"
        );
        Err(ApiError::validation_error(self.message))
    }
}

/// Staff reaching financial reports must be accountants.
pub const ACCOUNTANT_STAFF: TagRequirement = TagRequirement::new(
    Role::Staff,
    "accountant",
    "Only accountant staff can view financial reports",
);
