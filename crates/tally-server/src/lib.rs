//! Tally Web Server
//!
//! Axum-based REST API for the Tally personal finance tracker.
//!
//! Requests are authenticated by Cloudflare Access or a bearer API key unless
//! the server runs with `--no-auth`. Each request is resolved to a stored user
//! and only sees that user's records. Pagination and body sizes are capped,
//! every call is written to the audit log, and internal errors reach clients
//! as a generic message.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::CorsLayer, services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer,
};
use tracing::{error, info, warn};

use tally_core::{db::Database, Categorizer, CategorizerClient};

mod handlers;

/// Maximum pagination limit
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Maximum JSON request body size (10 KB)
pub const MAX_BODY_SIZE: usize = 1024 * 10;

/// Cloudflare Access header for authenticated user email
const CF_ACCESS_USER_HEADER: &str = "cf-access-authenticated-user-email";

/// Runtime options for the API server
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Reject requests without Cloudflare Access or API key credentials
    pub require_auth: bool,
    /// Cross-origin clients allowed to call the API; empty means same-origin only
    pub allowed_origins: Vec<String>,
    /// Accepted bearer keys (`TALLY_API_KEYS`)
    pub api_keys: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            require_auth: true,
            allowed_origins: vec![],
            api_keys: vec![],
        }
    }
}

/// State shared by every handler
pub struct AppState {
    pub db: Database,
    pub config: ServerConfig,
    pub categorizer: CategorizerClient,
}

/// Email asserted by Cloudflare Access, if present and non-blank
fn cf_access_email(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(CF_ACCESS_USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|email| !email.is_empty())
}

/// Token from an `Authorization: Bearer <token>` header
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
}

/// Gate `/api` behind Cloudflare Access or a configured API key
///
/// The Cloudflare header is trusted as-is. That holds behind a Cloudflare
/// Tunnel, which rewrites CF headers, but not on a directly exposed port.
async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    if !state.config.require_auth {
        return next.run(request).await;
    }

    let path = request.uri().path().to_string();
    let headers = request.headers();

    if let Some(email) = cf_access_email(headers) {
        info!(user = %email, path = %path, "Request authenticated by Cloudflare Access");
        return next.run(request).await;
    }

    let key_ok = bearer_token(headers)
        .map(|key| validate_api_key(key, &state.config.api_keys))
        .unwrap_or(false);
    if key_ok {
        info!(user = "api-key", path = %path, "Request authenticated by API key");
        return next.run(request).await;
    }

    warn!(path = %path, "Rejected request without valid credentials");
    AppError::new(StatusCode::UNAUTHORIZED, "Authentication required").into_response()
}

/// Check a bearer key against the configured keys in constant time
fn validate_api_key(provided: &str, valid_keys: &[String]) -> bool {
    use subtle::ConstantTimeEq;

    // Length mismatch short-circuits; equal lengths compare in constant time
    valid_keys.iter().any(|key| {
        key.len() == provided.len() && bool::from(key.as_bytes().ct_eq(provided.as_bytes()))
    })
}

/// Parse a comma-separated list (API keys, CORS origins), dropping blanks
pub fn parse_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Identity a request acts as: the Cloudflare Access email, `api-key` for
/// bearer-key requests, or `local-dev` when authentication is off
pub fn get_user_email(headers: &HeaderMap) -> String {
    match (cf_access_email(headers), bearer_token(headers)) {
        (Some(email), _) => email.to_string(),
        (None, Some(_)) => "api-key".to_string(),
        (None, None) => "local-dev".to_string(),
    }
}

/// The user a request acts on behalf of
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
}

/// Resolve the request identity to a stored user, creating it on first sight
pub fn current_user(db: &Database, headers: &HeaderMap) -> Result<CurrentUser, AppError> {
    let email = get_user_email(headers);
    let user = db.upsert_user(&email)?;
    Ok(CurrentUser { id: user.id, email })
}

/// Body returned by delete endpoints
#[derive(Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

/// Create the application router
pub fn create_router(db: Database, static_dir: Option<&str>, config: ServerConfig) -> Router {
    create_router_with_categorizer(db, static_dir, config, CategorizerClient::from_env())
}

/// Create the application router with an explicit categorizer (for testing)
pub fn create_router_with_categorizer(
    db: Database,
    static_dir: Option<&str>,
    config: ServerConfig,
    categorizer: CategorizerClient,
) -> Router {
    info!(categorizer = categorizer.name(), "Categorizer configured");

    let state = Arc::new(AppState {
        db,
        config: config.clone(),
        categorizer,
    });

    let api_routes = Router::new()
        // Auth
        .route("/me", get(handlers::get_me))
        // Accounts
        .route(
            "/accounts",
            get(handlers::list_accounts).post(handlers::create_account),
        )
        .route(
            "/accounts/:id",
            get(handlers::get_account)
                .put(handlers::update_account)
                .delete(handlers::delete_account),
        )
        // Transactions
        .route(
            "/transactions",
            get(handlers::list_transactions).post(handlers::create_transaction),
        )
        .route("/transactions/range", get(handlers::list_transactions_in_range))
        .route(
            "/transactions/:id",
            get(handlers::get_transaction)
                .put(handlers::update_transaction)
                .delete(handlers::delete_transaction),
        )
        .route(
            "/transactions/:id/category",
            put(handlers::update_transaction_category),
        )
        // Recurring transactions
        .route(
            "/recurring",
            get(handlers::list_recurring).post(handlers::create_recurring),
        )
        .route(
            "/recurring/:id",
            put(handlers::update_recurring).delete(handlers::delete_recurring),
        )
        // Budgets
        .route(
            "/budgets",
            get(handlers::list_budgets).post(handlers::create_budget),
        )
        .route(
            "/budgets/:id",
            put(handlers::update_budget).delete(handlers::delete_budget),
        )
        // Savings goals
        .route("/goals", get(handlers::list_goals).post(handlers::create_goal))
        .route(
            "/goals/:id",
            put(handlers::update_goal).delete(handlers::delete_goal),
        )
        .route("/goals/:id/progress", put(handlers::update_goal_progress))
        // Categorization preview
        .route("/categorize", post(handlers::categorize))
        // Analytics
        .route("/analytics/dashboard", get(handlers::get_dashboard))
        .route("/analytics/insights", get(handlers::get_insights))
        .route(
            "/analytics/category-spending",
            get(handlers::get_category_spending),
        )
        .route("/analytics/monthly-stats", get(handlers::get_monthly_stats))
        .route("/analytics/estimate", get(handlers::get_estimate))
        // Audit
        .route("/audit", get(handlers::list_audit_log));

    let mut app = Router::new()
        .nest("/api", api_routes)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.allowed_origins));
    app = with_security_headers(app);

    if let Some(dir) = static_dir {
        app = app.fallback_service(ServeDir::new(dir));
    }

    app
}

/// CORS policy: same-origin unless explicit origins are configured
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.is_empty() {
        return cors;
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    cors.allow_origin(origins)
}

/// Response headers applied to every route, static files included
fn with_security_headers(router: Router) -> Router {
    let headers = [
        (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
        (header::X_FRAME_OPTIONS, "DENY"),
        (header::X_XSS_PROTECTION, "1; mode=block"),
        (
            header::CONTENT_SECURITY_POLICY,
            "default-src 'self'; script-src 'self'; style-src 'self' 'unsafe-inline'; \
             img-src 'self' data:; font-src 'self'; connect-src 'self'; frame-ancestors 'none'",
        ),
    ];

    headers.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(
            name,
            HeaderValue::from_static(value),
        ))
    })
}

/// Serve the API with default (authenticated) configuration
pub async fn serve(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
) -> anyhow::Result<()> {
    serve_with_config(db, host, port, static_dir, ServerConfig::default()).await
}

/// Bind `host:port` and serve until the process exits
pub async fn serve_with_config(
    db: Database,
    host: &str,
    port: u16,
    static_dir: Option<&str>,
    config: ServerConfig,
) -> anyhow::Result<()> {
    if !config.require_auth {
        warn!("⚠️  Authentication disabled - do not expose to network!");
    } else if config.api_keys.is_empty() {
        info!("ℹ️  No API keys configured; only Cloudflare Access requests will be accepted");
    }

    let app = create_router(db, static_dir, config);
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Tally API listening");

    axum::serve(listener, app).await?;

    Ok(())
}

// ----------------------------------------------------------------------------
// Errors
// ----------------------------------------------------------------------------

/// Handler error rendered as `{"error": message}` with a status code
///
/// Internal failures keep their source for logging and show clients a
/// generic message.
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    source: Option<anyhow::Error>,
}

impl AppError {
    pub fn new(status: StatusCode, msg: &str) -> Self {
        Self {
            status,
            message: msg.to_string(),
            source: None,
        }
    }

    pub fn bad_request(msg: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub fn not_found(msg: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub fn forbidden(msg: &str) -> Self {
        Self::new(StatusCode::FORBIDDEN, msg)
    }

    pub fn internal(msg: &str) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, msg)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(source) = &self.source {
            error!(error = %source, status = %self.status, "Request failed");
        }

        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        let err: anyhow::Error = err.into();

        match err.downcast_ref::<tally_core::Error>() {
            Some(tally_core::Error::Validation(msg)) => Self::bad_request(msg),
            Some(tally_core::Error::NotFound(msg)) => Self::not_found(msg),
            Some(tally_core::Error::Forbidden(msg)) => Self::forbidden(msg),
            _ => Self {
                source: Some(err),
                ..Self::internal("An internal error occurred")
            },
        }
    }
}
