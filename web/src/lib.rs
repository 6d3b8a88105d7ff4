//! HTTP shell for the seating ledger.
//!
//! The ledger in `seating-core` is a synchronous, single-owner value. This
//! crate hosts one ledger per process behind a single lock and exposes its
//! operations over JSON, following the "Functional Core, Imperative Shell"
//! split:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         Imperative Shell (Axum)         │  ← HTTP, JSON, config
//! │  - Request parsing                      │  ← Tracing
//! │  - Response serialization               │
//! ├─────────────────────────────────────────┤
//! │         Functional Core                 │
//! │  - ReservationLedger                    │  ← No I/O, deterministic
//! │  - Seat accounting invariants           │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Routes
//!
//! - `GET /health` - Liveness
//! - `GET /state` - Capacity, chart data and the reservation table
//! - `GET /reservations` - Reservations in insertion order
//! - `POST /reservations` - Seat a party
//! - `POST /reservations/:id/checkout` - Check a party out (idempotent)
//! - `DELETE /reservations/:id` - Remove a reservation

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod presentation;
pub mod router;
pub mod state;

// Re-export key types for convenience
pub use config::Config;
pub use error::AppError;
pub use router::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
