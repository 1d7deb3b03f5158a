use axum::extract::{rejection::QueryRejection, Query, State};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::auth::rule::ACCOUNTANT_STAFF;
use crate::database::models::{FinancialReport, ReportPeriod};
use crate::error::ApiError;
use crate::middleware::{resolve_scope, ApiResponse, ApiResult, CurrentUser, ScopePolicy};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Target tenant; only honored for SUPER_ADMIN.
    pub organization_id: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl ReportQuery {
    fn period(&self) -> Result<ReportPeriod, ApiError> {
        if let (Some(from), Some(to)) = (self.from, self.to) {
            if from > to {
                return Err(ApiError::validation_error("'from' must not be after 'to'"));
            }
        }

        Ok(ReportPeriod {
            from: self.from,
            to: self.to,
        })
    }
}

/// GET /api/accounting/reports - revenue, expenses and net income for the caller's scope
pub async fn report_get(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<FinancialReport> {
    ACCOUNTANT_STAFF.enforce(&user)?;

    let Query(query) = query.map_err(|e| {
        tracing::debug!(error = %e, "rejected report query");
        ApiError::validation_error("Invalid report query parameters")
    })?;
    let period = query.period()?;

    let scope = resolve_scope(&user, ScopePolicy::CrossTenant, query.organization_id.as_deref())?;
    let report = state.store.financial_report(&scope, &period).await?;

    state.audit(&user, "accounting.report.view", &scope);
    Ok(ApiResponse::success(report))
}
