use axum::extract::State;
use serde::Serialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub store: &'static str,
}

/// GET / - service description
pub async fn root() -> ApiResponse<Value> {
    ApiResponse::success(json!({
        "name": "SmartStore API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "whoami": "/api/auth/whoami (any session)",
            "organization": "/api/organization (any session)",
            "accounting": "/api/accounting/reports (SUPER_ADMIN, ADMIN, accountant STAFF)",
            "affiliates": "/api/affiliates/:id (SUPER_ADMIN, ADMIN)",
            "root": "/api/root/tenant[/:id] (SUPER_ADMIN)",
        }
    }))
}

/// GET /health - liveness plus store reachability
pub async fn health(State(state): State<AppState>) -> ApiResult<HealthStatus> {
    state.store.health_check().await?;

    Ok(ApiResponse::success(HealthStatus {
        status: "ok",
        timestamp: chrono::Utc::now(),
        store: "ok",
    }))
}

/// Unknown routes still answer with an envelope.
pub async fn fallback() -> ApiError {
    ApiError::not_found("Route")
}
