//! Errors reported by the reservation ledger.
//!
//! Every error is local and recoverable. A rejected operation never leaves
//! the ledger partially mutated, so callers can surface the message and let
//! the user retry with corrected input.

use crate::types::ReservationId;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// The requested party does not fit in the remaining capacity.
    #[error("Not enough seats available: requested {requested}, {seats_left} left")]
    InsufficientCapacity {
        /// Guest count that was requested. Wider than a stored guest count so
        /// oversized requests from outside the ledger can be reported as-is.
        requested: u64,
        /// Seats left at the time of the request.
        seats_left: u32,
    },

    /// A positional address does not reference an existing reservation.
    #[error("No reservation at index {index} (ledger holds {len})")]
    InvalidIndex {
        /// Index that was requested.
        index: usize,
        /// Number of reservations in the ledger.
        len: usize,
    },

    /// An identifier does not reference an existing reservation.
    #[error("Reservation {0} not found")]
    NotFound(ReservationId),

    /// Input was rejected before any mutation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
