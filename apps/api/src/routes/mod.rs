pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::history::handlers as history;
use crate::prediction::handlers as prediction;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/roles", get(prediction::handle_roles))
        .route("/api/v1/predict", post(prediction::handle_predict))
        .route(
            "/api/v1/predictions/history",
            get(prediction::handle_history),
        )
        .route("/api/v1/predictions/trends", get(history::handle_trends))
        .with_state(state)
}
