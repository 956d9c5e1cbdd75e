//! Router setup

use axum::{
    routing::{get, post},
    Router,
};
use loadctl_config::ServerConfig;
use loadctl_engine::TestRegistry;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::{cors::cors_layer, handlers};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<TestRegistry>,
}

impl AppState {
    pub fn new(registry: Arc<TestRegistry>) -> Self {
        Self { registry }
    }
}

/// Build the API router with CORS and request tracing
pub fn create_app(state: AppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .route("/health", get(handlers::health_check))
        .route(
            "/load-tests",
            get(handlers::list_load_tests).post(handlers::create_load_test),
        )
        .route(
            "/load-tests/{id}",
            get(handlers::get_load_test).delete(handlers::delete_load_test),
        )
        .route("/load-tests/{id}/stop", post(handlers::stop_load_test));

    let prefix = config.api_prefix.trim_end_matches('/');
    let app = if prefix.is_empty() {
        api
    } else {
        Router::new().nest(prefix, api)
    };

    app.with_state(state)
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}
