use std::sync::Arc;

use crate::auth::{AuthorizationRule, SessionResolver, UserContext};
use crate::config::AppConfig;
use crate::database::TenantStore;
use crate::middleware::{Guard, OrganizationScope};

/// Process-wide state, built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub sessions: Arc<dyn SessionResolver>,
    pub store: Arc<dyn TenantStore>,
}

impl AppState {
    pub fn new(config: AppConfig, sessions: Arc<dyn SessionResolver>, store: Arc<dyn TenantStore>) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            store,
        }
    }

    pub fn guard(&self, rule: AuthorizationRule) -> Guard {
        Guard::new(self.sessions.clone(), rule)
    }

    /// Audit record for a successful sensitive operation.
    pub fn audit(&self, user: &UserContext, action: &str, scope: &OrganizationScope) {
        if !self.config.security.enable_audit_logging {
            return;
        }

        tracing::info!(
            target: "audit",
            user_id = %user.id,
            role = %user.role,
            action,
            organization_id = scope.organization_id().unwrap_or("*"),
            decision = "allow",
            "sensitive operation"
        );
    }
}
