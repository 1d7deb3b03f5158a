use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Inclusive date range for financial reports. Open ends are unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportPeriod {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.from.map_or(true, |from| date >= from) && self.to.map_or(true, |to| date <= to)
    }
}

/// Raw sums as read from the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, FromRow)]
pub struct LedgerTotals {
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub order_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialReport {
    /// `None` when the report aggregates every tenant.
    pub organization_id: Option<String>,
    pub period: ReportPeriod,
    pub revenue: Decimal,
    pub expenses: Decimal,
    pub net_income: Decimal,
    pub order_count: i64,
}

impl FinancialReport {
    pub fn from_totals(organization_id: Option<String>, period: ReportPeriod, totals: LedgerTotals) -> Self {
        Self {
            organization_id,
            period,
            net_income: totals.revenue - totals.expenses,
            revenue: totals.revenue,
            expenses: totals.expenses,
            order_count: totals.order_count,
        }
    }
}
