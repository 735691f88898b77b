//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderName, Method,
    },
    routing::{get, post},
    Router,
};
use mcq_core::{GenerationBackend, GENERATE_PATH};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::server::routes::{generate_handler, health_handler, method_not_allowed, options_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// `None` when no model key is configured
    pub backend: Option<Arc<dyn GenerationBackend>>,
}

/// Build the Axum application router
pub fn build_app(backend: Option<Arc<dyn GenerationBackend>>, request_timeout: Duration) -> Router {
    let app_state = AppState { backend };

    // Browser front-ends call from any origin with the anon key
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        .route(
            GENERATE_PATH,
            post(generate_handler)
                .options(options_handler)
                .fallback(method_not_allowed),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
