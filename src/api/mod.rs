//! HTTP API module
//! 
//! This module contains all HTTP endpoint handlers and response structures.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer", get(timer_handler))
        .route("/timer/input", put(timer_input_handler))
        .route("/timer/start", post(timer_start_handler))
        .route("/timer/pause", post(timer_pause_handler))
        .route("/timer/toggle", post(timer_toggle_handler))
        .route("/timer/reset", post(timer_reset_handler))
        .route("/counter", get(counter_handler))
        .route("/counter/:action", post(counter_action_handler))
        .route("/offer", get(offer_handler))
        .route("/offer/:action", post(offer_action_handler))
        .route("/status", get(status_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
