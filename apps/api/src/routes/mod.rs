pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::report::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/plan", post(handlers::handle_plan))
        .route("/api/v1/documents/:format", post(handlers::handle_generate))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
