use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::auth::{AuthorizationRule, SessionResolver, UserContext};
use crate::error::ApiError;

/// Authentication then authorization for one route group.
///
/// Applied with `route_layer(from_fn_with_state(guard, require_rule))`. On
/// success the resolved [`UserContext`] is inserted into the request
/// extensions; handlers read it back with [`CurrentUser`].
#[derive(Clone)]
pub struct Guard {
    sessions: Arc<dyn SessionResolver>,
    rule: Arc<AuthorizationRule>,
}

impl Guard {
    pub fn new(sessions: Arc<dyn SessionResolver>, rule: AuthorizationRule) -> Self {
        Self {
            sessions,
            rule: Arc::new(rule),
        }
    }

    /// Decide whether the caller may reach the handler.
    ///
    /// Authentication is checked first, so a missing session is always a 401
    /// regardless of the rule.
    pub async fn check(&self, headers: &HeaderMap, path: &str) -> Result<UserContext, ApiError> {
        let Some(session) = self.sessions.resolve_session(headers).await else {
            tracing::warn!(path, rule = %self.rule, decision = "unauthenticated", "authorization denied");
            return Err(ApiError::unauthorized());
        };

        let user = session.user_context();

        if !self.rule.permits(&user) {
            tracing::warn!(
                path,
                user_id = %user.id,
                role = %user.role,
                rule = %self.rule,
                decision = "forbidden",
                "authorization denied"
            );
            return Err(ApiError::forbidden());
        }

        tracing::debug!(
            path,
            user_id = %user.id,
            role = %user.role,
            session_id = %session.id,
            decision = "allow",
            "authorization granted"
        );
        Ok(user)
    }
}

/// Guard middleware. Short-circuits with an error envelope without calling `next`.
pub async fn require_rule(State(guard): State<Guard>, mut request: Request, next: Next) -> Response {
    let path = request.uri().path().to_string();

    match guard.check(request.headers(), &path).await {
        Ok(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(err) => err.into_response(),
    }
}

/// The caller's context as resolved by the guard.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserContext);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Fails closed when a route was mounted without the guard
        parts.extensions.get::<UserContext>().cloned().map(CurrentUser).ok_or_else(|| {
            tracing::error!(path = parts.uri.path(), "handler reached without a resolved user context");
            ApiError::unauthorized()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{Role, Session, SessionClaims};
    use chrono::Duration;

    struct FixedSession(Option<Session>);

    #[async_trait]
    impl SessionResolver for FixedSession {
        async fn resolve_session(&self, _headers: &HeaderMap) -> Option<Session> {
            self.0.clone()
        }
    }

    fn guard(session: Option<Session>, rule: AuthorizationRule) -> Guard {
        Guard::new(Arc::new(FixedSession(session)), rule)
    }

    fn session(role: Role) -> Session {
        Session::from(SessionClaims::new("user_7", "u@shop.test", role, None, Some("org_1".into()), Duration::hours(1)).unwrap())
    }

    #[tokio::test]
    async fn missing_session_is_unauthorized_even_for_restricted_rules() {
        let guard = guard(None, AuthorizationRule::role(Role::SuperAdmin));
        let err = guard.check(&HeaderMap::new(), "/api/root/tenant").await.unwrap_err();
        assert_eq!(err, ApiError::unauthorized());
    }

    #[tokio::test]
    async fn role_outside_allow_list_is_forbidden() {
        let guard = guard(Some(session(Role::Staff)), AuthorizationRule::any_of([Role::SuperAdmin, Role::Admin]));
        let err = guard.check(&HeaderMap::new(), "/api/affiliates/a1").await.unwrap_err();
        assert_eq!(err, ApiError::forbidden());
    }

    #[tokio::test]
    async fn permitted_role_yields_matching_context() {
        let guard = guard(Some(session(Role::Admin)), AuthorizationRule::any_of([Role::Admin]));
        let user = guard.check(&HeaderMap::new(), "/api/affiliates/a1").await.unwrap();
        assert_eq!(user.id, "user_7");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.organization_id.as_deref(), Some("org_1"));
    }
}
