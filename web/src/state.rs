//! Application state for Axum handlers.
//!
//! The ledger's list and counter must change together, so the whole ledger
//! sits behind one `RwLock`. Mutating handlers hold the write guard for the
//! full command; readers take the read guard and copy a snapshot out.

use seating_core::ReservationLedger;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Application state shared across all HTTP handlers.
///
/// Cloned (cheaply via `Arc`) for each request.
#[derive(Clone)]
pub struct AppState {
    /// The venue's ledger, serialized behind a single lock
    pub ledger: Arc<RwLock<ReservationLedger>>,
    /// Display name of the venue
    pub venue_name: Arc<str>,
}

impl AppState {
    /// Create a new application state owning `ledger`.
    #[must_use]
    pub fn new(ledger: ReservationLedger, venue_name: impl Into<Arc<str>>) -> Self {
        Self {
            ledger: Arc::new(RwLock::new(ledger)),
            venue_name: venue_name.into(),
        }
    }
}
