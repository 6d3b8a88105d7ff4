//! Reservation endpoints.
//!
//! - `GET /state` - Capacity, chart data and reservation table
//! - `GET /reservations` - Reservations in insertion order
//! - `POST /reservations` - Seat a party
//! - `POST /reservations/:id/checkout` - Check a party out
//! - `DELETE /reservations/:id` - Remove a reservation
//!
//! Reservations are addressed by their stable id, never by position, so a
//! client holding an id from an earlier render cannot hit the wrong row
//! after another reservation is deleted.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use seating_core::{
    CapacityChart, LedgerError, LedgerSnapshot, ReservationId, ReservationStatus, ReservationView,
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to seat a new party.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreateReservationRequest {
    /// Guest's name
    pub name: String,
    /// Contact number
    pub phone: String,
    /// Party size. Signed so that negative input is reported as a
    /// validation error rather than a decode failure.
    pub guest_count: i64,
}

/// One reservation as rendered in the table.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReservationResponse {
    /// Stable reservation id
    pub id: ReservationId,
    /// Guest's name
    pub name: String,
    /// Contact number
    pub phone: String,
    /// Party size
    pub guest_count: u32,
    /// Check-in time (RFC 3339)
    pub check_in: DateTime<Utc>,
    /// Check-out time (RFC 3339), if checked out
    pub check_out: Option<DateTime<Utc>>,
    /// Check-out column text: the time, or "Not Checked Out"
    pub check_out_label: String,
    /// Lifecycle status
    pub status: ReservationStatus,
    /// Whether the check-out action applies
    pub can_check_out: bool,
}

impl From<ReservationView> for ReservationResponse {
    fn from(view: ReservationView) -> Self {
        let check_out_label = view.check_out_label(DateTime::to_rfc3339);
        Self {
            id: view.id,
            name: view.name,
            phone: view.phone,
            guest_count: view.guest_count,
            check_in: view.check_in,
            check_out: view.check_out,
            check_out_label,
            status: view.status,
            can_check_out: view.can_check_out,
        }
    }
}

/// Whole-venue state for rendering.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StateResponse {
    /// Venue display name
    pub venue_name: String,
    /// Fixed capacity
    pub total_seats: u32,
    /// Seats not held by active reservations
    pub seats_left: u32,
    /// Seats held by active reservations
    pub seats_taken: u32,
    /// Chart data (`taken` / `left`)
    pub chart: CapacityChart,
    /// Reservations in insertion order
    pub reservations: Vec<ReservationResponse>,
}

impl StateResponse {
    fn from_snapshot(venue_name: &str, snapshot: &LedgerSnapshot) -> Self {
        Self {
            venue_name: venue_name.to_string(),
            total_seats: snapshot.total_seats,
            seats_left: snapshot.seats_left,
            seats_taken: snapshot.seats_taken(),
            chart: snapshot.chart(),
            reservations: rows(snapshot),
        }
    }
}

/// Response after deleting a reservation.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DeleteReservationResponse {
    /// Id of the removed reservation
    pub id: ReservationId,
    /// Seats returned to the pool (0 if it had already checked out)
    pub seats_released: u32,
    /// Seats left after the deletion
    pub seats_left: u32,
}

fn rows(snapshot: &LedgerSnapshot) -> Vec<ReservationResponse> {
    snapshot
        .views()
        .into_iter()
        .map(ReservationResponse::from)
        .collect()
}

/// Narrows a wire guest count to the ledger's `u32`.
///
/// Negative counts are invalid input. Counts too large for `u32` can never
/// fit the venue, so they are reported as a capacity shortfall. Zero passes
/// through and is rejected by the ledger alongside the name and phone checks.
fn narrow_guest_count(requested: i64, seats_left: u32) -> Result<u32, LedgerError> {
    if requested < 0 {
        return Err(LedgerError::InvalidInput(
            "guest count must be at least 1".to_string(),
        ));
    }

    u32::try_from(requested).map_err(|_| LedgerError::InsufficientCapacity {
        requested: requested.unsigned_abs(),
        seats_left,
    })
}

fn parse_id(raw: &str) -> Result<ReservationId, AppError> {
    ReservationId::parse(raw)
        .map_err(|_| AppError::bad_request(format!("Invalid reservation id: {raw}")))
}

// ============================================================================
// Handlers
// ============================================================================

/// Current venue state.
///
/// ```bash
/// curl http://localhost:8080/state
/// ```
pub async fn get_state(State(state): State<AppState>) -> Json<StateResponse> {
    let snapshot = state.ledger.read().await.snapshot();
    Json(StateResponse::from_snapshot(&state.venue_name, &snapshot))
}

/// All reservations in insertion order.
pub async fn list_reservations(State(state): State<AppState>) -> Json<Vec<ReservationResponse>> {
    let snapshot = state.ledger.read().await.snapshot();
    Json(rows(&snapshot))
}

/// Seat a new party.
///
/// ```bash
/// curl -X POST http://localhost:8080/reservations \
///   -H "Content-Type: application/json" \
///   -d '{"name": "Alice", "phone": "555-1", "guest_count": 4}'
/// ```
///
/// # Errors
///
/// - 400/422 if the body is not a valid request
/// - 422 if the name or phone is blank or the guest count is not positive
/// - 409 if the party does not fit in the remaining seats
pub async fn create_reservation(
    State(state): State<AppState>,
    payload: Result<Json<CreateReservationRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ReservationResponse>), AppError> {
    let Json(request) = payload?;

    let mut ledger = state.ledger.write().await;
    let guest_count = narrow_guest_count(request.guest_count, ledger.seats_left())?;
    let reservation = ledger.reserve(&request.name, &request.phone, guest_count)?;
    drop(ledger);

    info!(reservation_id = %reservation.id, guest_count, "Party seated via API");
    Ok((
        StatusCode::CREATED,
        Json(ReservationView::from(&reservation).into()),
    ))
}

/// Check a party out. Repeating the call returns the same check-out time.
///
/// ```bash
/// curl -X POST http://localhost:8080/reservations/<id>/checkout
/// ```
///
/// # Errors
///
/// - 400 if the id is malformed
/// - 404 if no reservation has this id
pub async fn check_out_reservation(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ReservationResponse>, AppError> {
    let id = parse_id(&raw_id)?;

    let mut ledger = state.ledger.write().await;
    ledger.check_out_by_id(&id)?;
    let reservation = ledger.get(&id).ok_or(LedgerError::NotFound(id))?;

    Ok(Json(ReservationView::from(reservation).into()))
}

/// Remove a reservation, releasing its seats if it was still active.
///
/// ```bash
/// curl -X DELETE http://localhost:8080/reservations/<id>
/// ```
///
/// # Errors
///
/// - 400 if the id is malformed
/// - 404 if no reservation has this id
pub async fn delete_reservation(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteReservationResponse>, AppError> {
    let id = parse_id(&raw_id)?;

    let mut ledger = state.ledger.write().await;
    let deletion = ledger.delete_by_id(&id)?;

    Ok(Json(DeleteReservationResponse {
        id,
        seats_released: deletion.seats_released,
        seats_left: ledger.seats_left(),
    }))
}
