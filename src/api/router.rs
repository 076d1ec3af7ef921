use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use super::state::AppState;
use super::types::MAX_UPLOAD_BYTES;
use super::{health, query, upload};

/// Room for multipart framing and form fields around a maximum-size file
const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES * 2;

/// Origin that allows every caller
const ANY_ORIGIN: &str = "*";

/// CORS for the configured front-end origins; invalid entries are skipped.
///
/// A `"*"` entry allows any origin. Credentials are then disabled, since
/// browsers refuse credentialed responses with a wildcard origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request());

    if origins.iter().any(|origin| origin.trim() == ANY_ORIGIN) {
        warn!("CORS allows any origin; credentials disabled");
        return base.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    base.allow_origin(origins).allow_credentials(true)
}

/// Create the router with application state
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config().server.allowed_origins);

    Router::new()
        .route("/", get(health::root))
        .route("/api/health", get(health::health_check))
        .route("/api/query", post(query::process_query))
        .route("/api/suggest", post(query::suggest))
        .route(
            "/api/upload",
            post(upload::upload_paper).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
