//! # Reserva App
//!
//! HTTP surface for the reservation service. Exposes the core lifecycle
//! operations as JSON endpoints and wires configuration, database, and the
//! Google integrations together in [`context::AppContext`].

pub mod context;
pub mod error;
pub mod logging;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use context::AppContext;

/// Build the application router over a fully wired context.
pub fn build_router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/auth/google", post(routes::auth::sign_in))
        .route(
            "/api/reservations",
            post(routes::reservations::create),
        )
        .route(
            "/api/reservations/{id}",
            axum::routing::patch(routes::reservations::update)
                .delete(routes::reservations::delete),
        )
        .route("/api/availability", get(routes::reservations::availability))
        .route("/api/events", get(routes::events::list))
        .route("/api/events/remote", get(routes::events::list_remote))
        .with_state(context)
}
