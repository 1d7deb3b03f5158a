use async_trait::async_trait;
use thiserror::Error;

use crate::middleware::OrganizationScope;

use super::models::{Affiliate, FinancialReport, Organization, ReportPeriod};

#[derive(Debug, Error)]
pub enum StoreError {
    /// Missing, or present but outside the caller's scope.
    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl From<super::DatabaseError> for StoreError {
    fn from(err: super::DatabaseError) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Tenant data access. Every read is filtered by the scope it is given.
#[async_trait]
pub trait TenantStore: Send + Sync {
    async fn list_organizations(&self, scope: &OrganizationScope) -> Result<Vec<Organization>, StoreError>;

    async fn find_organization(&self, scope: &OrganizationScope, id: &str) -> Result<Organization, StoreError>;

    async fn financial_report(
        &self,
        scope: &OrganizationScope,
        period: &ReportPeriod,
    ) -> Result<FinancialReport, StoreError>;

    async fn find_affiliate(&self, scope: &OrganizationScope, id: &str) -> Result<Affiliate, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
