//! API routes.

pub mod contact_us;
pub mod health;

use axum::{http::Uri, middleware, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::middleware::auth::require_bearer;
use crate::response::ApiError;
use crate::state::AppState;

/// Creates the API router.
///
/// With an empty prefix the contact routes sit at the root, and `GET /`
/// lists records instead of answering `app-root`.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let contact_routes = contact_us::routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    let base = Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler));

    let app = if state.path_prefix.is_empty() {
        base.merge(contact_routes)
    } else {
        base.route("/", get(root_handler))
            .nest(&state.path_prefix, contact_routes)
    };

    app.fallback(fallback_handler)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// GET / - Root banner.
async fn root_handler() -> &'static str {
    "app-root"
}

async fn fallback_handler(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}
