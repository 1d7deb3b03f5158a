use axum::{
    handler::Handler,
    http::{header, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, MethodRouter},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{AuthorizationRule, Role};
use crate::handlers::{elevated, protected, public};
use crate::middleware::require_rule;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/", get_only(public::root))
        .route("/health", get_only(public::health))
        // Guarded
        .merge(session_routes(&state))
        .merge(accounting_routes(&state))
        .merge(affiliate_routes(&state))
        .merge(root_routes(&state))
        .fallback(public::fallback)
        // Global middleware
        .layer(cors_layer(&state));

    let router = if state.config.server.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}

fn session_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/whoami", get_only(protected::auth::whoami))
        .route("/api/organization", get_only(protected::organization::organization_get))
        .route_layer(from_fn_with_state(state.guard(AuthorizationRule::authenticated()), require_rule))
}

fn accounting_routes(state: &AppState) -> Router<AppState> {
    let rule = AuthorizationRule::any_of([Role::SuperAdmin, Role::Admin, Role::Staff]);

    Router::new()
        .route("/api/accounting/reports", get_only(protected::accounting::report_get))
        .route_layer(from_fn_with_state(state.guard(rule), require_rule))
}

fn affiliate_routes(state: &AppState) -> Router<AppState> {
    let rule = AuthorizationRule::any_of([Role::SuperAdmin, Role::Admin]);

    Router::new()
        .route("/api/affiliates/:id", get_only(protected::affiliates::affiliate_get))
        .route_layer(from_fn_with_state(state.guard(rule), require_rule))
}

fn root_routes(state: &AppState) -> Router<AppState> {
    use elevated::root::tenant;

    Router::new()
        .route("/api/root/tenant", get_only(tenant::tenant_list))
        .route("/api/root/tenant/:id", get_only(tenant::tenant_show))
        .route_layer(from_fn_with_state(state.guard(AuthorizationRule::role(Role::SuperAdmin)), require_rule))
}

/// GET route whose other methods answer with the unknown-route envelope
/// instead of axum's empty 405.
fn get_only<H, T>(handler: H) -> MethodRouter<AppState>
where
    H: Handler<T, AppState>,
    T: 'static,
{
    get(handler).fallback(public::fallback)
}

fn cors_layer(state: &AppState) -> CorsLayer {
    let origins: Vec<HeaderValue> = state
        .config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
