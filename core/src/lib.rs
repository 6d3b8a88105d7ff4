//! # Seating Core
//!
//! Seat accounting for a single venue with a fixed capacity.
//!
//! This crate is the functional core of the seating system. It owns one
//! capacity pool and one flat, insertion-ordered list of reservations, and
//! keeps the aggregate "seats left" counter consistent with that list after
//! every operation.
//!
//! ## Core Concepts
//!
//! - **Reservation**: One party's seating record (name, phone, guest count,
//!   check-in, optional check-out)
//! - **Active reservation**: A reservation without a check-out; it holds seats
//! - **Checked-out reservation**: Seats released, record kept for history
//! - **Seats left**: `total_seats - Σ guest_count of active reservations`
//!
//! ## Lifecycle
//!
//! ```text
//! reserve ──► Active ──check_out──► CheckedOut
//!               │                       │
//!               └────────delete─────────┴──► (removed)
//! ```
//!
//! Seats are released exactly once per reservation: at check-out, or at
//! deletion if the reservation was still active.
//!
//! ## Example
//!
//! ```
//! use seating_core::{LedgerError, ReservationLedger};
//!
//! # fn main() -> Result<(), LedgerError> {
//! let mut ledger = ReservationLedger::new(50)?;
//!
//! let alice = ledger.reserve("Alice", "555-1", 4)?;
//! assert_eq!(ledger.seats_left(), 46);
//!
//! ledger.check_out_by_id(&alice.id)?;
//! assert_eq!(ledger.seats_left(), 50);
//!
//! let err = ledger.reserve("Bob", "555-2", 51).unwrap_err();
//! assert!(matches!(err, LedgerError::InsufficientCapacity { .. }));
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod ledger;
pub mod types;

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use error::{LedgerError, Result};
pub use ledger::{CheckOutOutcome, Deletion, ReservationLedger};
pub use types::{
    CapacityChart, LedgerSnapshot, NOT_CHECKED_OUT_LABEL, Reservation, ReservationId,
    ReservationStatus, ReservationView,
};

/// Environment module - injected dependencies for the ledger
///
/// The ledger never reads the system time directly. Timestamps come from a
/// [`Clock`](environment::Clock) supplied at construction, so tests can pin
/// or step time deterministically.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by [`Utc::now`].
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
