#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Duration;
use tower::ServiceExt;

use smartstore_api::auth::{generate_session_token, JwtSessionResolver, Role, SessionClaims};
use smartstore_api::config::AppConfig;
use smartstore_api::database::models::{Affiliate, FinancialReport, Organization, ReportPeriod};
use smartstore_api::database::{MemoryTenantStore, StoreError, TenantStore};
use smartstore_api::middleware::{Envelope, OrganizationScope};
use smartstore_api::AppState;

pub const SECRET: &str = "integration-test-secret";
pub const COOKIE: &str = "smartstore.session";

pub fn test_state(store: Arc<dyn TenantStore>) -> AppState {
    let config = AppConfig::for_tests(SECRET);
    let sessions = Arc::new(JwtSessionResolver::new(SECRET, COOKIE));
    AppState::new(config, sessions, store)
}

pub fn test_router(store: Arc<dyn TenantStore>) -> Router {
    smartstore_api::app(test_state(store))
}

pub fn token(user: &str, role: Role, tag: Option<&str>, org: Option<&str>) -> String {
    token_with_ttl(user, role, tag, org, Duration::hours(1))
}

pub fn token_with_ttl(user: &str, role: Role, tag: Option<&str>, org: Option<&str>, ttl: Duration) -> String {
    let claims = SessionClaims::new(
        user,
        format!("{}@shop.test", user),
        role,
        tag.map(String::from),
        org.map(String::from),
        ttl,
    )
    .unwrap();
    generate_session_token(&claims, SECRET).unwrap()
}

pub async fn get(app: Router, uri: &str, token: Option<&str>) -> (StatusCode, Envelope) {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    send(app, builder.body(Body::empty()).unwrap()).await
}

pub async fn send(app: Router, request: Request<Body>) -> (StatusCode, Envelope) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let envelope = Envelope::from_json(&bytes)
        .unwrap_or_else(|e| panic!("invalid envelope ({}): {}", e, String::from_utf8_lossy(&bytes)));
    (status, envelope)
}

/// Delegates to the seeded memory store and records every scope it is asked for.
#[derive(Default)]
pub struct RecordingStore {
    inner: MemoryTenantStore,
    scopes: Mutex<Vec<OrganizationScope>>,
}

impl RecordingStore {
    pub fn seeded() -> Self {
        Self {
            inner: MemoryTenantStore::seeded(),
            scopes: Mutex::new(Vec::new()),
        }
    }

    pub fn scopes(&self) -> Vec<OrganizationScope> {
        self.scopes.lock().unwrap().clone()
    }

    fn record(&self, scope: &OrganizationScope) {
        self.scopes.lock().unwrap().push(scope.clone());
    }
}

#[async_trait]
impl TenantStore for RecordingStore {
    async fn list_organizations(&self, scope: &OrganizationScope) -> Result<Vec<Organization>, StoreError> {
        self.record(scope);
        self.inner.list_organizations(scope).await
    }

    async fn find_organization(&self, scope: &OrganizationScope, id: &str) -> Result<Organization, StoreError> {
        self.record(scope);
        self.inner.find_organization(scope, id).await
    }

    async fn financial_report(
        &self,
        scope: &OrganizationScope,
        period: &ReportPeriod,
    ) -> Result<FinancialReport, StoreError> {
        self.record(scope);
        // Let concurrent requests interleave
        tokio::task::yield_now().await;
        self.inner.financial_report(scope, period).await
    }

    async fn find_affiliate(&self, scope: &OrganizationScope, id: &str) -> Result<Affiliate, StoreError> {
        self.record(scope);
        self.inner.find_affiliate(scope, id).await
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Every call fails as if the database connection dropped.
pub struct FailingStore;

#[async_trait]
impl TenantStore for FailingStore {
    async fn list_organizations(&self, _scope: &OrganizationScope) -> Result<Vec<Organization>, StoreError> {
        Err(StoreError::Unavailable("connection reset by 10.0.0.5:5432".into()))
    }

    async fn find_organization(&self, _scope: &OrganizationScope, _id: &str) -> Result<Organization, StoreError> {
        Err(StoreError::Unavailable("connection reset by 10.0.0.5:5432".into()))
    }

    async fn financial_report(
        &self,
        _scope: &OrganizationScope,
        _period: &ReportPeriod,
    ) -> Result<FinancialReport, StoreError> {
        Err(StoreError::Unavailable("connection reset by 10.0.0.5:5432".into()))
    }

    async fn find_affiliate(&self, _scope: &OrganizationScope, _id: &str) -> Result<Affiliate, StoreError> {
        Err(StoreError::Unavailable("connection reset by 10.0.0.5:5432".into()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("connection reset by 10.0.0.5:5432".into()))
    }
}
