//! # Seating Testing
//!
//! Testing utilities for the seating ledger.
//!
//! This crate provides:
//! - Deterministic clocks for check-in/check-out timestamps
//! - A Given-When-Then builder for ledger commands
//! - Property-based testing strategies over ledger operations
//! - Consistency assertions for the seat accounting invariants
//!
//! ## Example
//!
//! ```
//! use seating_testing::{assertions, ledger_with_clock, test_clock};
//!
//! let mut ledger = ledger_with_clock(50, test_clock());
//! let _ = ledger.reserve("Alice", "555-1", 4);
//! assertions::assert_ledger_consistent(&ledger);
//! ```

use chrono::{DateTime, Utc};
use seating_core::ReservationLedger;
use seating_core::environment::Clock;
use std::sync::Arc;


/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use chrono::Duration;
    use std::sync::Mutex;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use seating_testing::mocks::FixedClock;
    /// use seating_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that moves forward by a fixed step on every read
    ///
    /// Lets a test tell a check-in time apart from the check-out time that
    /// followed it.
    #[derive(Debug)]
    pub struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
        step: Duration,
    }

    impl SteppingClock {
        /// Starts at `start`, advancing by `step` after each `now()`
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                next: Mutex::new(start),
                step,
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self
                .next
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            let current = *next;
            *next = current + self.step;
            current
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// The instant [`test_clock`] is pinned to
    ///
    /// # Panics
    ///
    /// Panics if the hardcoded timestamp fails to parse.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_epoch() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
            .expect("hardcoded timestamp should always parse")
            .with_timezone(&Utc)
    }
}

/// Property-based testing utilities using proptest.
pub mod properties {
    use proptest::prelude::*;
    use seating_core::ReservationLedger;

    /// One step of a randomly generated ledger session
    #[derive(Debug, Clone)]
    pub enum LedgerOp {
        /// Seat a party of this size (may exceed capacity or be zero)
        Reserve(u32),
        /// Check out the reservation at this index (may be out of range)
        CheckOut(usize),
        /// Delete the reservation at this index (may be out of range)
        Delete(usize),
    }

    /// Strategy for a single operation
    ///
    /// Guest counts and indices deliberately overshoot so rejected commands
    /// are exercised alongside accepted ones.
    pub fn ledger_op() -> impl Strategy<Value = LedgerOp> {
        prop_oneof![
            3 => (0u32..=20).prop_map(LedgerOp::Reserve),
            2 => (0usize..12).prop_map(LedgerOp::CheckOut),
            1 => (0usize..12).prop_map(LedgerOp::Delete),
        ]
    }

    /// Strategy for a session of up to `max_len` operations
    pub fn ledger_ops(max_len: usize) -> impl Strategy<Value = Vec<LedgerOp>> {
        prop::collection::vec(ledger_op(), 0..max_len)
    }

    /// Runs one operation, discarding its result
    ///
    /// Returns `true` if the ledger accepted the command.
    pub fn apply_op(ledger: &mut ReservationLedger, op: &LedgerOp) -> bool {
        match *op {
            LedgerOp::Reserve(guests) => ledger.reserve("Guest", "555-0000", guests).is_ok(),
            LedgerOp::CheckOut(index) => ledger.check_out(index).is_ok(),
            LedgerOp::Delete(index) => ledger.delete(index).is_ok(),
        }
    }
}

/// Assertion helpers for ledger state
pub mod assertions {
    use seating_core::ReservationLedger;

    /// Asserts the seat accounting invariants:
    /// - `seats_left == total − Σ active guest_count`
    /// - `0 ≤ seats_left ≤ total`
    /// - every reservation seats at least one guest
    ///
    /// # Panics
    ///
    /// Panics if any invariant is violated.
    #[allow(clippy::panic)] // Test assertion
    pub fn assert_ledger_consistent(ledger: &ReservationLedger) {
        assert_eq!(
            ledger.seats_left(),
            ledger.recompute_seats_left(),
            "seats_left drifted from the active reservations: {ledger:?}"
        );
        assert!(
            ledger.seats_left() <= ledger.total_seats(),
            "seats_left {} exceeds capacity {}",
            ledger.seats_left(),
            ledger.total_seats()
        );
        assert!(
            ledger.reservations().iter().all(|r| r.guest_count >= 1),
            "reservation with zero guests: {ledger:?}"
        );
    }
}

/// Builds a ledger with the given capacity and clock.
///
/// # Panics
///
/// Panics if `total_seats` is zero.
#[must_use]
#[allow(clippy::expect_used)]
pub fn ledger_with_clock<C: Clock + 'static>(total_seats: u32, clock: C) -> ReservationLedger {
    ReservationLedger::with_clock(total_seats, Arc::new(clock))
        .expect("test ledger needs a non-zero capacity")
}

// Re-export commonly used items
pub use ledger_test::LedgerTest;
pub use mocks::{FixedClock, SteppingClock, test_clock, test_epoch};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_stepping_clock_advances() {
        let clock = SteppingClock::new(test_epoch(), Duration::minutes(15));
        let first = clock.now();
        let second = clock.now();
        assert_eq!(second - first, Duration::minutes(15));
    }
}
