use axum::{
    extract::{DefaultBodyLimit, State},
    http::{HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{elevated, public};
use crate::middleware::admin_key_middleware;
use crate::pages;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let api = &state.config.api;

    let mut router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Pages
        .route("/login", get(pages::sign_in_page))
        .route(pages::calendar::CALENDAR_ROUTE, get(pages::calendar_page))
        // API
        .merge(auth_routes())
        .merge(admin_routes(state.clone()))
        .layer(DefaultBodyLimit::max(api.max_request_size_bytes));

    if api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/signout", post(auth::sign_out))
        .route("/api/auth/session", get(auth::session))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use elevated::admin;

    Router::new()
        .route("/api/admin/fixes", get(admin::fix_list))
        .route("/api/admin/fixes/:fix", post(admin::fix_run))
        .route_layer(middleware::from_fn_with_state(state, admin_key_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    // A wildcard cannot be mixed into an origin list
    if origins.iter().any(|origin| origin.trim() == "*") {
        return CorsLayer::new().allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new().allow_origin(origins)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "ok": true,
        "name": "Recruiter Portal",
        "version": version,
        "endpoints": {
            "pages": "/login, /calendar (session required)",
            "auth": "/api/auth/register, /api/auth/login, /api/auth/signout, /api/auth/session",
            "admin": "/api/admin/fixes[/:fix] (x-admin-key required)",
            "health": "/health",
        }
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.gateway.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "ok": true,
                "status": "ok",
                "timestamp": now,
                "database": "ok"
            })),
        ),
        Err(e) => {
            tracing::warn!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "ok": false,
                    "error": "database unavailable",
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                })),
            )
        }
    }
}
