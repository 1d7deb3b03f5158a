use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub mod role;
pub mod rule;
pub mod session;

pub use role::{Role, UserContext};
pub use rule::{AuthorizationRule, TagRequirement};
pub use session::{JwtSessionResolver, Session, SessionResolver};

/// Claims carried by a session token issued by the authentication provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_tag: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    pub jti: Uuid,
    pub exp: i64,
    pub iat: i64,
}

impl SessionClaims {
    pub fn new(
        user_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        role_tag: Option<String>,
        organization_id: Option<String>,
        ttl: Duration,
    ) -> Result<Self, JwtError> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(ttl).ok_or(JwtError::InvalidLifetime)?;

        Ok(Self {
            sub: user_id.into(),
            email: email.into(),
            role,
            role_tag,
            organization_id,
            jti: Uuid::new_v4(),
            exp: expires_at.timestamp(),
            iat: now.timestamp(),
        })
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("session secret not configured")]
    InvalidSecret,

    #[error("session lifetime out of range")]
    InvalidLifetime,

    #[error("token generation failed: {0}")]
    TokenGeneration(String),

    #[error("token rejected: {0}")]
    Rejected(String),
}

/// Sign session claims. Used by the `token` CLI command and by tests; in
/// production the authentication provider issues tokens.
pub fn generate_session_token(claims: &SessionClaims, secret: &str) -> Result<String, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::new(Algorithm::HS256), claims, &encoding_key)
        .map_err(|e| JwtError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the claims.
pub fn verify_session_token(token: &str, secret: &str) -> Result<SessionClaims, JwtError> {
    if secret.is_empty() {
        return Err(JwtError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::new(Algorithm::HS256);

    decode::<SessionClaims>(token, &decoding_key, &validation)
        .map(|data| data.claims)
        .map_err(|e| JwtError::Rejected(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(ttl: Duration) -> SessionClaims {
        SessionClaims::new("user_1", "a@shop.test", Role::Staff, Some("accountant".into()), Some("org_1".into()), ttl).unwrap()
    }

    #[test]
    fn signs_and_verifies_with_the_same_secret() {
        let original = claims(Duration::hours(1));
        let token = generate_session_token(&original, "secret").unwrap();
        let verified = verify_session_token(&token, "secret").unwrap();
        assert_eq!(verified, original);
    }

    #[test]
    fn rejects_wrong_secret_and_expired_tokens() {
        let token = generate_session_token(&claims(Duration::hours(1)), "secret").unwrap();
        assert!(matches!(verify_session_token(&token, "other"), Err(JwtError::Rejected(_))));

        let expired = generate_session_token(&claims(Duration::hours(-2)), "secret").unwrap();
        assert!(matches!(verify_session_token(&expired, "secret"), Err(JwtError::Rejected(_))));
    }

    #[test]
    fn empty_secret_fails_closed() {
        assert!(matches!(
            generate_session_token(&claims(Duration::hours(1)), ""),
            Err(JwtError::InvalidSecret)
        ));
        assert!(matches!(verify_session_token("abc.def.ghi", ""), Err(JwtError::InvalidSecret)));
    }

    #[test]
    fn lifetime_past_the_calendar_is_rejected() {
        let ttl = Duration::seconds(i64::MAX / 1000);
        let result = SessionClaims::new("user_1", "a@shop.test", Role::Admin, None, None, ttl);
        assert!(matches!(result, Err(JwtError::InvalidLifetime)));
    }

    #[test]
    fn claims_use_camel_case_keys() {
        let value = serde_json::to_value(claims(Duration::hours(1))).unwrap();
        assert_eq!(value["roleTag"], "accountant");
        assert_eq!(value["organizationId"], "org_1");
        assert_eq!(value["role"], "STAFF");
    }
}
