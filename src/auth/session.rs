use async_trait::async_trait;
use axum::http::{header, HeaderMap};
use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use super::{verify_session_token, SessionClaims, UserContext};

/// A verified session. Owned by the authentication provider; the guard only reads it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub claims: SessionClaims,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn user_id(&self) -> &str {
        &self.claims.sub
    }

    pub fn user_context(&self) -> UserContext {
        UserContext {
            id: self.claims.sub.clone(),
            email: self.claims.email.clone(),
            role: self.claims.role,
            role_tag: self.claims.role_tag.clone(),
            organization_id: self.claims.organization_id.clone(),
        }
    }
}

impl From<SessionClaims> for Session {
    fn from(claims: SessionClaims) -> Self {
        let issued_at = Utc.timestamp_opt(claims.iat, 0).single().unwrap_or_default();
        let expires_at = Utc.timestamp_opt(claims.exp, 0).single().unwrap_or_default();

        Self {
            id: claims.jti,
            claims,
            issued_at,
            expires_at,
        }
    }
}

/// Boundary to the authentication provider.
///
/// `None` means unauthenticated. Implementations must not log the raw credential.
#[async_trait]
pub trait SessionResolver: Send + Sync {
    async fn resolve_session(&self, headers: &HeaderMap) -> Option<Session>;
}

/// Verifies HS256 session tokens from the `Authorization` header or the session cookie.
#[derive(Clone)]
pub struct JwtSessionResolver {
    secret: String,
    cookie_name: String,
}

impl JwtSessionResolver {
    pub fn new(secret: impl Into<String>, cookie_name: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(config: &crate::config::AppConfig) -> Self {
        Self::new(&config.security.auth_secret, &config.security.session_cookie_name)
    }

    fn extract_token<'a>(&self, headers: &'a HeaderMap) -> Option<&'a str> {
        if let Some(value) = headers.get(header::AUTHORIZATION) {
            // A malformed Authorization header is not silently replaced by the cookie
            return value
                .to_str()
                .ok()
                .and_then(|v| v.strip_prefix("Bearer "))
                .map(str::trim)
                .filter(|t| !t.is_empty());
        }

        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .flat_map(|v| v.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.trim())
            .filter(|t| !t.is_empty())
    }
}

#[async_trait]
impl SessionResolver for JwtSessionResolver {
    async fn resolve_session(&self, headers: &HeaderMap) -> Option<Session> {
        let token = self.extract_token(headers)?;

        match verify_session_token(token, &self.secret) {
            Ok(claims) => Some(Session::from(claims)),
            Err(e) => {
                tracing::debug!(reason = %e, "session token rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{generate_session_token, Role};
    use axum::http::HeaderValue;
    use chrono::Duration;

    const SECRET: &str = "session-test-secret";

    fn token() -> String {
        let claims = SessionClaims::new("user_1", "a@shop.test", Role::Admin, None, Some("org_1".into()), Duration::hours(1)).unwrap();
        generate_session_token(&claims, SECRET).unwrap()
    }

    fn resolver() -> JwtSessionResolver {
        JwtSessionResolver::new(SECRET, "smartstore.session")
    }

    #[tokio::test]
    async fn resolves_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(&format!("Bearer {}", token())).unwrap());

        let session = resolver().resolve_session(&headers).await.unwrap();
        assert_eq!(session.user_id(), "user_1");
        assert!(session.expires_at > session.issued_at);
        assert_eq!(session.user_context().organization_id.as_deref(), Some("org_1"));
    }

    #[tokio::test]
    async fn resolves_session_cookie() {
        let mut headers = HeaderMap::new();
        let cookie = format!("theme=dark; smartstore.session={}; other=1", token());
        headers.insert(header::COOKIE, HeaderValue::from_str(&cookie).unwrap());

        assert!(resolver().resolve_session(&headers).await.is_some());
    }

    #[tokio::test]
    async fn missing_or_malformed_credentials_are_unauthenticated() {
        let resolver = resolver();
        assert!(resolver.resolve_session(&HeaderMap::new()).await.is_none());

        let mut basic = HeaderMap::new();
        basic.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert!(resolver.resolve_session(&basic).await.is_none());

        let mut garbage = HeaderMap::new();
        garbage.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer not-a-jwt"));
        assert!(resolver.resolve_session(&garbage).await.is_none());
    }
}
