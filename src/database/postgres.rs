use async_trait::async_trait;
use sqlx::PgPool;

use crate::middleware::OrganizationScope;

use super::models::{Affiliate, FinancialReport, LedgerTotals, Organization, ReportPeriod};
use super::store::{StoreError, TenantStore};

/// Postgres-backed store. `$1` is always the scope filter; a NULL filter
/// means unscoped.
#[derive(Clone)]
pub struct PgTenantStore {
    pool: PgPool,
}

impl PgTenantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TenantStore for PgTenantStore {
    async fn list_organizations(&self, scope: &OrganizationScope) -> Result<Vec<Organization>, StoreError> {
        let rows = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, plan, is_active, created_at
            FROM organizations
            WHERE ($1::text IS NULL OR id = $1)
            ORDER BY created_at
            "#,
        )
        .bind(scope.organization_id())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_organization(&self, scope: &OrganizationScope, id: &str) -> Result<Organization, StoreError> {
        sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, slug, plan, is_active, created_at
            FROM organizations
            WHERE ($1::text IS NULL OR id = $1) AND id = $2
            "#,
        )
        .bind(scope.organization_id())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Organization"))
    }

    async fn financial_report(
        &self,
        scope: &OrganizationScope,
        period: &ReportPeriod,
    ) -> Result<FinancialReport, StoreError> {
        let totals = sqlx::query_as::<_, LedgerTotals>(
            r#"
            SELECT
                COALESCE((
                    SELECT SUM(total) FROM orders
                    WHERE ($1::text IS NULL OR organization_id = $1)
                      AND status = 'PAID'
                      AND ($2::date IS NULL OR created_at::date >= $2)
                      AND ($3::date IS NULL OR created_at::date <= $3)
                ), 0) AS revenue,
                COALESCE((
                    SELECT SUM(amount) FROM expenses
                    WHERE ($1::text IS NULL OR organization_id = $1)
                      AND ($2::date IS NULL OR incurred_on >= $2)
                      AND ($3::date IS NULL OR incurred_on <= $3)
                ), 0) AS expenses,
                (
                    SELECT COUNT(*) FROM orders
                    WHERE ($1::text IS NULL OR organization_id = $1)
                      AND status = 'PAID'
                      AND ($2::date IS NULL OR created_at::date >= $2)
                      AND ($3::date IS NULL OR created_at::date <= $3)
                ) AS order_count
            "#,
        )
        .bind(scope.organization_id())
        .bind(period.from)
        .bind(period.to)
        .fetch_one(&self.pool)
        .await?;

        Ok(FinancialReport::from_totals(
            scope.organization_id().map(String::from),
            *period,
            totals,
        ))
    }

    async fn find_affiliate(&self, scope: &OrganizationScope, id: &str) -> Result<Affiliate, StoreError> {
        sqlx::query_as::<_, Affiliate>(
            r#"
            SELECT id, organization_id, name, email, commission_rate, status
            FROM affiliates
            WHERE ($1::text IS NULL OR organization_id = $1) AND id = $2
            "#,
        )
        .bind(scope.organization_id())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound("Affiliate"))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
