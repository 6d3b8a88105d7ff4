//! Router configuration for the seating service.

use crate::handlers::{health_check, reservations};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

/// Build the complete Axum router.
///
/// # Routes
///
/// - `GET /health` - Liveness check
/// - `GET /state` - Venue state for rendering
/// - `GET /reservations` - List reservations
/// - `POST /reservations` - Seat a party
/// - `POST /reservations/:id/checkout` - Check a party out
/// - `DELETE /reservations/:id` - Remove a reservation
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/state", get(reservations::get_state))
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/:id/checkout",
            post(reservations::check_out_reservation),
        )
        .route("/reservations/:id", delete(reservations::delete_reservation))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
