//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Calendar feeds, with and without the trailing slash
        .route(
            "/calendar/mrha/",
            get(handlers::get_calendar).delete(handlers::invalidate_calendar),
        )
        .route(
            "/calendar/mrha",
            get(handlers::get_calendar).delete(handlers::invalidate_calendar),
        )

        .with_state(state)
}
