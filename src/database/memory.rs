use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;

use crate::middleware::OrganizationScope;

use super::models::{Affiliate, FinancialReport, LedgerTotals, Organization, ReportPeriod};
use super::store::{StoreError, TenantStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerKind {
    PaidOrder,
    Expense,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub organization_id: String,
    pub kind: LedgerKind,
    pub amount: Decimal,
    pub date: NaiveDate,
}

/// In-process store for local development (`serve --memory`) and tests.
/// Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct MemoryTenantStore {
    organizations: Vec<Organization>,
    affiliates: Vec<Affiliate>,
    ledger: Vec<LedgerEntry>,
}

impl MemoryTenantStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_organization(mut self, organization: Organization) -> Self {
        self.organizations.push(organization);
        self
    }

    pub fn with_affiliate(mut self, affiliate: Affiliate) -> Self {
        self.affiliates.push(affiliate);
        self
    }

    pub fn with_entry(mut self, entry: LedgerEntry) -> Self {
        self.ledger.push(entry);
        self
    }

    /// Two tenants with a little data each.
    pub fn seeded() -> Self {
        let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 9, 0, 0).single().unwrap_or_default();
        let day = |d| NaiveDate::from_ymd_opt(2026, 3, d).unwrap_or_default();

        let org = |id: &str, name: &str, slug: &str, plan: &str| Organization {
            id: id.to_string(),
            name: name.to_string(),
            slug: slug.to_string(),
            plan: plan.to_string(),
            is_active: true,
            created_at,
        };
        let entry = |org: &str, kind, cents: i64, date| LedgerEntry {
            organization_id: org.to_string(),
            kind,
            amount: Decimal::new(cents, 2),
            date,
        };

        Self::new()
            .with_organization(org("org_1", "Colombo Mart", "colombo-mart", "PRO"))
            .with_organization(org("org_2", "Kandy Books", "kandy-books", "STARTER"))
            .with_affiliate(Affiliate {
                id: "aff_1".into(),
                organization_id: "org_1".into(),
                name: "Nimal Perera".into(),
                email: "nimal@partners.test".into(),
                commission_rate: Decimal::new(5, 2),
                status: "ACTIVE".into(),
            })
            .with_affiliate(Affiliate {
                id: "aff_2".into(),
                organization_id: "org_2".into(),
                name: "Ayesha Silva".into(),
                email: "ayesha@partners.test".into(),
                commission_rate: Decimal::new(8, 2),
                status: "ACTIVE".into(),
            })
            .with_entry(entry("org_1", LedgerKind::PaidOrder, 150_000, day(2)))
            .with_entry(entry("org_1", LedgerKind::PaidOrder, 50_000, day(20)))
            .with_entry(entry("org_1", LedgerKind::Expense, 30_000, day(10)))
            .with_entry(entry("org_2", LedgerKind::PaidOrder, 12_500, day(3)))
            .with_entry(entry("org_2", LedgerKind::Expense, 2_500, day(4)))
    }
}

#[async_trait]
impl TenantStore for MemoryTenantStore {
    async fn list_organizations(&self, scope: &OrganizationScope) -> Result<Vec<Organization>, StoreError> {
        Ok(self
            .organizations
            .iter()
            .filter(|org| scope.permits(&org.id))
            .cloned()
            .collect())
    }

    async fn find_organization(&self, scope: &OrganizationScope, id: &str) -> Result<Organization, StoreError> {
        self.organizations
            .iter()
            .find(|org| org.id == id && scope.permits(&org.id))
            .cloned()
            .ok_or(StoreError::NotFound("Organization"))
    }

    async fn financial_report(
        &self,
        scope: &OrganizationScope,
        period: &ReportPeriod,
    ) -> Result<FinancialReport, StoreError> {
        let totals = self
            .ledger
            .iter()
            .filter(|e| scope.permits(&e.organization_id) && period.contains(e.date))
            .fold(LedgerTotals::default(), |mut totals, e| {
                match e.kind {
                    LedgerKind::PaidOrder => {
                        totals.revenue += e.amount;
                        totals.order_count += 1;
                    }
                    LedgerKind::Expense => totals.expenses += e.amount,
                }
                totals
            });

        Ok(FinancialReport::from_totals(
            scope.organization_id().map(String::from),
            *period,
            totals,
        ))
    }

    async fn find_affiliate(&self, scope: &OrganizationScope, id: &str) -> Result<Affiliate, StoreError> {
        self.affiliates
            .iter()
            .find(|a| a.id == id && scope.permits(&a.organization_id))
            .cloned()
            .ok_or(StoreError::NotFound("Affiliate"))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
