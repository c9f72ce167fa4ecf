pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::brochure::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/brochures/normalize",
            post(handlers::handle_normalize),
        )
        .route("/api/v1/brochures/layout", post(handlers::handle_layout))
        .with_state(state)
}
