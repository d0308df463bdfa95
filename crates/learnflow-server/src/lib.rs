//! HTTP surface for the relay: routes, CORS policy, and shared state.

mod handlers;
mod state;

pub use state::AppState;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::{get, post};
use learnflow_config::Environment;
use log::warn;
use std::sync::Arc;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Build the application router over shared state.
///
/// A catch-panic layer turns any uncaught internal fault into the 500
/// apology payload; that is the only path where the HTTP status itself
/// signals failure.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        .route("/api/chat", post(handlers::chat))
        .layer(CatchPanicLayer::custom(handlers::panic_response))
        .with_state(state)
}

/// CORS policy keyed by deployment environment: permissive in development,
/// an explicit origin list in production.
pub fn cors_layer(environment: Environment, allowed_origins: &[String]) -> CorsLayer {
    match environment {
        Environment::Development => CorsLayer::permissive(),
        Environment::Production => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("skipping unparsable CORS origin (origin={})", origin);
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE])
        }
    }
}
