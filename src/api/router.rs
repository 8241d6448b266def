//! HTTP route wiring

use axum::routing::{get, post};
use axum::Router;

use super::state::AppState;
use super::{birthdays, health};

/// Build the application router over the given state
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Form submission endpoint
        .route("/add-birthday", post(birthdays::register_form))
        // JSON API
        .nest("/api", create_api_router())
        .with_state(state)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

fn create_api_router() -> Router<AppState> {
    Router::new()
        .route(
            "/birthdays",
            get(birthdays::list_birthdays).post(birthdays::register),
        )
        .route("/birthdays/today", get(birthdays::todays_birthdays))
        .route("/check-birthdays", post(birthdays::trigger_scan))
}
