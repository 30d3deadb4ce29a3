//! Route handlers for the HTTP API.

pub mod completion;
pub mod dimensions;
pub mod entries;
pub mod health;
pub mod users;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(health::health))
        // Static configuration
        .route("/api/dimensions", get(dimensions::list_dimensions))
        // Caller-scoped API
        .route("/api/me", get(users::me))
        .route(
            "/api/entries",
            get(entries::list_entries).post(entries::create_entry),
        )
        .route(
            "/api/entries/:id",
            get(entries::get_entry).delete(entries::delete_entry),
        )
        .route("/api/completion", get(completion::counts))
        .route("/api/completion/weekly", get(completion::weekly))
        .route("/api/completion/summary", get(completion::summary))
        // Identity provider
        .route("/webhooks/identity", post(users::identity_webhook))
}
