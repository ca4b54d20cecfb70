pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::listings;
use crate::state::AppState;
use crate::webhook;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/jobs", get(listings::handle_list_jobs))
        .route("/candidates", get(listings::handle_list_candidates))
        .route("/webhook", post(webhook::handle_webhook))
        .with_state(state)
}
