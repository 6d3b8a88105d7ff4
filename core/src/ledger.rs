//! The reservation ledger aggregate.
//!
//! Owns the venue capacity, the ordered reservation list and the derived
//! seats-left counter. Every mutating operation follows the same shape:
//! validate the command against current state, describe the change as a
//! ledger event, then apply the event. Validation never touches state, so
//! a rejected command leaves the ledger exactly as it was.
//!
//! # Seat conservation
//!
//! ```text
//! reserve    seats_left -= guest_count
//! check_out  seats_left += guest_count   (only if still active)
//! delete     seats_left += guest_count   (only if still active)
//! ```
//!
//! A reservation's seats are therefore released at most once, whichever of
//! check-out or deletion comes first.

use crate::environment::{Clock, SystemClock};
use crate::error::{LedgerError, Result};
use crate::types::{LedgerSnapshot, Reservation, ReservationId};
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ============================================================================
// Events and outcomes
// ============================================================================

/// State change produced by a validated ledger command
///
/// Logged at debug level as it is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LedgerEvent {
    /// A party was seated; appended at the end of the list
    Reserved { reservation: Reservation },

    /// The active party at `index` left at `at`
    CheckedOut {
        index: usize,
        at: DateTime<Utc>,
        seats_released: u32,
    },

    /// The reservation at `index` was removed
    Deleted { index: usize, seats_released: u32 },
}

/// Result of a check-out request
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckOutOutcome {
    /// The reservation transitioned to checked-out at this time
    CheckedOut(DateTime<Utc>),
    /// The reservation was already checked out at this time; nothing changed
    AlreadyCheckedOut(DateTime<Utc>),
}

impl CheckOutOutcome {
    /// The reservation's check-out time, whichever way it was reached
    #[must_use]
    pub const fn at(&self) -> DateTime<Utc> {
        match self {
            Self::CheckedOut(at) | Self::AlreadyCheckedOut(at) => *at,
        }
    }
}

/// Result of a delete request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deletion {
    /// The reservation as it was when removed
    pub reservation: Reservation,
    /// Seats returned to the pool by this deletion
    pub seats_released: u32,
}

// ============================================================================
// Ledger
// ============================================================================

/// Seat accounting for one venue
///
/// Operations are synchronous and assume serial invocation. A multi-client
/// host must put the whole ledger behind one lock so the reservation list
/// and `seats_left` are always observed together.
#[derive(Clone)]
pub struct ReservationLedger {
    total_seats: u32,
    seats_left: u32,
    reservations: Vec<Reservation>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for ReservationLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReservationLedger")
            .field("total_seats", &self.total_seats)
            .field("seats_left", &self.seats_left)
            .field("reservations", &self.reservations)
            .finish_non_exhaustive()
    }
}

impl ReservationLedger {
    /// Creates an empty ledger using the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidInput`] if `total_seats` is zero.
    pub fn new(total_seats: u32) -> Result<Self> {
        Self::with_clock(total_seats, Arc::new(SystemClock))
    }

    /// Creates an empty ledger that stamps check-in/check-out with `clock`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidInput`] if `total_seats` is zero.
    pub fn with_clock(total_seats: u32, clock: Arc<dyn Clock>) -> Result<Self> {
        if total_seats == 0 {
            return Err(LedgerError::InvalidInput(
                "total seats must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            total_seats,
            seats_left: total_seats,
            reservations: Vec::new(),
            clock,
        })
    }

    // ========== Queries ==========

    /// Fixed venue capacity
    #[must_use]
    pub const fn total_seats(&self) -> u32 {
        self.total_seats
    }

    /// Seats not held by active reservations
    #[must_use]
    pub const fn seats_left(&self) -> u32 {
        self.seats_left
    }

    /// Seats held by active reservations
    #[must_use]
    pub const fn seats_taken(&self) -> u32 {
        self.total_seats - self.seats_left
    }

    /// All reservations in insertion order
    #[must_use]
    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    /// Number of reservations (active and checked out)
    #[must_use]
    pub fn len(&self) -> usize {
        self.reservations.len()
    }

    /// Whether the ledger holds no reservations
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
    }

    /// Number of reservations still holding seats
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.reservations.iter().filter(|r| r.is_active()).count()
    }

    /// Current position of a reservation
    #[must_use]
    pub fn position(&self, id: &ReservationId) -> Option<usize> {
        self.reservations.iter().position(|r| r.id == *id)
    }

    /// Looks up a reservation by identifier
    #[must_use]
    pub fn get(&self, id: &ReservationId) -> Option<&Reservation> {
        self.reservations.iter().find(|r| r.id == *id)
    }

    /// Seats left derived from scratch: `total − Σ active guest_count`.
    ///
    /// The incrementally maintained [`seats_left`](Self::seats_left) must
    /// always equal this value.
    #[must_use]
    pub fn recompute_seats_left(&self) -> u32 {
        let held: u32 = self
            .reservations
            .iter()
            .filter(|r| r.is_active())
            .map(|r| r.guest_count)
            .sum();
        self.total_seats.saturating_sub(held)
    }

    /// Point-in-time copy for rendering. No side effects.
    #[must_use]
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            total_seats: self.total_seats,
            seats_left: self.seats_left,
            reservations: self.reservations.clone(),
        }
    }

    // ========== Commands ==========

    /// Seats a new party.
    ///
    /// On success the reservation is appended at the end of the list with
    /// `check_in` set to now and no check-out. Name and phone are stored
    /// trimmed. `guest_count == seats_left` is accepted and fills the venue.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InvalidInput`] if `name` or `phone` is blank or
    ///   `guest_count` is zero
    /// - [`LedgerError::InsufficientCapacity`] if `guest_count > seats_left`
    pub fn reserve(&mut self, name: &str, phone: &str, guest_count: u32) -> Result<Reservation> {
        if let Err(error) = self.validate_reserve(name, phone, guest_count) {
            warn!(guest_count, seats_left = self.seats_left, %error, "Reservation rejected");
            return Err(error);
        }

        let reservation = Reservation::new(
            ReservationId::new(),
            name.trim().to_string(),
            phone.trim().to_string(),
            guest_count,
            self.clock.now(),
        );

        self.apply(LedgerEvent::Reserved {
            reservation: reservation.clone(),
        });

        info!(
            reservation_id = %reservation.id,
            guest_count,
            seats_left = self.seats_left,
            "Reservation created"
        );
        Ok(reservation)
    }

    /// Checks out the reservation at `index`.
    ///
    /// Idempotent: a reservation that is already checked out keeps its
    /// original check-out time and no seats are credited again.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidIndex`] if `index` is out of range.
    pub fn check_out(&mut self, index: usize) -> Result<CheckOutOutcome> {
        let reservation = self.at_index(index)?;
        let (id, guest_count) = (reservation.id, reservation.guest_count);

        if let Some(at) = reservation.check_out {
            debug!(reservation_id = %id, "Already checked out");
            return Ok(CheckOutOutcome::AlreadyCheckedOut(at));
        }

        let at = self.clock.now();
        self.apply(LedgerEvent::CheckedOut {
            index,
            at,
            seats_released: guest_count,
        });

        info!(reservation_id = %id, seats_left = self.seats_left, "Reservation checked out");
        Ok(CheckOutOutcome::CheckedOut(at))
    }

    /// Checks out a reservation by identifier. See [`check_out`](Self::check_out).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no reservation has this id.
    pub fn check_out_by_id(&mut self, id: &ReservationId) -> Result<CheckOutOutcome> {
        let index = self.resolve(id)?;
        self.check_out(index)
    }

    /// Removes the reservation at `index`.
    ///
    /// Seats are released only if the reservation was still active; a
    /// checked-out reservation already gave its seats back. Later
    /// reservations shift down by one position.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::InvalidIndex`] if `index` is out of range.
    pub fn delete(&mut self, index: usize) -> Result<Deletion> {
        let reservation = self.at_index(index)?.clone();

        let seats_released = if reservation.is_active() {
            reservation.guest_count
        } else {
            0
        };

        self.apply(LedgerEvent::Deleted {
            index,
            seats_released,
        });

        info!(
            reservation_id = %reservation.id,
            seats_released,
            seats_left = self.seats_left,
            "Reservation deleted"
        );
        Ok(Deletion {
            reservation,
            seats_released,
        })
    }

    /// Removes a reservation by identifier. See [`delete`](Self::delete).
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if no reservation has this id.
    pub fn delete_by_id(&mut self, id: &ReservationId) -> Result<Deletion> {
        let index = self.resolve(id)?;
        self.delete(index)
    }

    // ========== Internals ==========

    fn validate_reserve(&self, name: &str, phone: &str, guest_count: u32) -> Result<()> {
        if name.trim().is_empty() {
            return Err(LedgerError::InvalidInput("name must not be empty".to_string()));
        }

        if phone.trim().is_empty() {
            return Err(LedgerError::InvalidInput("phone must not be empty".to_string()));
        }

        if guest_count == 0 {
            return Err(LedgerError::InvalidInput(
                "guest count must be at least 1".to_string(),
            ));
        }

        if guest_count > self.seats_left {
            return Err(LedgerError::InsufficientCapacity {
                requested: u64::from(guest_count),
                seats_left: self.seats_left,
            });
        }

        Ok(())
    }

    fn at_index(&self, index: usize) -> Result<&Reservation> {
        self.reservations.get(index).ok_or(LedgerError::InvalidIndex {
            index,
            len: self.reservations.len(),
        })
    }

    fn resolve(&self, id: &ReservationId) -> Result<usize> {
        self.position(id).ok_or(LedgerError::NotFound(*id))
    }

    /// Applies a validated event. The list and the counter change together.
    ///
    /// Indices in the event were checked by the command that built it.
    fn apply(&mut self, event: LedgerEvent) {
        debug!(?event, "Applying ledger event");

        match event {
            LedgerEvent::Reserved { reservation } => {
                self.seats_left -= reservation.guest_count;
                self.reservations.push(reservation);
            }
            LedgerEvent::CheckedOut {
                index,
                at,
                seats_released,
            } => {
                let transitioned = self.reservations[index].mark_checked_out(at);
                debug_assert!(transitioned, "check-out event for an inactive reservation");
                self.seats_left += seats_released;
            }
            LedgerEvent::Deleted {
                index,
                seats_released,
            } => {
                self.reservations.remove(index);
                self.seats_left += seats_released;
            }
        }

        debug_assert_eq!(self.seats_left, self.recompute_seats_left());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReservationStatus;
    use chrono::TimeZone;

    struct StubClock(DateTime<Utc>);

    impl Clock for StubClock {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    fn stub_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 19, 30, 0)
            .single()
            .unwrap_or_default()
    }

    fn ledger(total: u32) -> ReservationLedger {
        match ReservationLedger::with_clock(total, Arc::new(StubClock(stub_time()))) {
            Ok(ledger) => ledger,
            Err(e) => unreachable!("valid capacity rejected: {e}"),
        }
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            ReservationLedger::new(0),
            Err(LedgerError::InvalidInput(_))
        ));
    }

    #[test]
    fn reserve_appends_and_decrements() -> Result<()> {
        let mut ledger = ledger(50);
        let r = ledger.reserve("Alice", "555-1", 4)?;

        assert_eq!(ledger.seats_left(), 46);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.reservations()[0], r);
        assert_eq!(r.check_in, stub_time());
        assert_eq!(r.status(), ReservationStatus::Active);
        Ok(())
    }

    #[test]
    fn reserve_exact_remaining_fills_venue() -> Result<()> {
        let mut ledger = ledger(10);
        ledger.reserve("Alice", "555-1", 10)?;
        assert_eq!(ledger.seats_left(), 0);
        assert_eq!(ledger.seats_taken(), 10);
        Ok(())
    }

    #[test]
    fn reserve_over_capacity_leaves_ledger_untouched() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;

        let err = ledger.reserve("Bob", "555-2", 50);
        assert_eq!(
            err,
            Err(LedgerError::InsufficientCapacity {
                requested: 50,
                seats_left: 46
            })
        );
        assert_eq!(ledger.seats_left(), 46);
        assert_eq!(ledger.len(), 1);
        Ok(())
    }

    #[test]
    fn reserve_rejects_blank_fields_and_zero_guests() {
        let mut ledger = ledger(50);
        let cases = [
            ("", "555-1", 2),
            ("  ", "555-1", 2),
            ("Al", "", 2),
            ("Al", "555", 0),
        ];
        for (name, phone, guests) in cases {
            assert!(matches!(
                ledger.reserve(name, phone, guests),
                Err(LedgerError::InvalidInput(_))
            ));
        }
        assert!(ledger.is_empty());
        assert_eq!(ledger.seats_left(), 50);
    }

    #[test]
    fn reserve_trims_name_and_phone() -> Result<()> {
        let mut ledger = ledger(5);
        let r = ledger.reserve("  Alice ", " 555-1 ", 1)?;
        assert_eq!(r.name, "Alice");
        assert_eq!(r.phone, "555-1");
        Ok(())
    }

    #[test]
    fn check_out_releases_seats_once() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;

        let first = ledger.check_out(0)?;
        assert_eq!(first, CheckOutOutcome::CheckedOut(stub_time()));
        assert_eq!(ledger.seats_left(), 50);

        let second = ledger.check_out(0)?;
        assert_eq!(second, CheckOutOutcome::AlreadyCheckedOut(stub_time()));
        assert_eq!(ledger.seats_left(), 50);
        assert_eq!(ledger.active_count(), 0);
        Ok(())
    }

    #[test]
    fn check_out_out_of_range() {
        let mut ledger = ledger(50);
        assert_eq!(
            ledger.check_out(0),
            Err(LedgerError::InvalidIndex { index: 0, len: 0 })
        );
    }

    #[test]
    fn delete_active_restores_seats() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;

        let deletion = ledger.delete(0)?;
        assert_eq!(deletion.seats_released, 4);
        assert_eq!(ledger.seats_left(), 50);
        assert!(ledger.is_empty());
        Ok(())
    }

    #[test]
    fn delete_checked_out_does_not_double_release() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;
        ledger.reserve("Bob", "555-2", 6)?;
        ledger.check_out(0)?;
        assert_eq!(ledger.seats_left(), 44);

        let deletion = ledger.delete(0)?;
        assert_eq!(deletion.seats_released, 0);
        assert_eq!(ledger.seats_left(), 44);
        assert_eq!(ledger.reservations()[0].name, "Bob");
        Ok(())
    }

    #[test]
    fn delete_out_of_range_is_rejected() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;
        assert_eq!(
            ledger.delete(1).map(|d| d.seats_released),
            Err(LedgerError::InvalidIndex { index: 1, len: 1 })
        );
        assert_eq!(ledger.len(), 1);
        Ok(())
    }

    #[test]
    fn id_addressing_survives_earlier_deletes() -> Result<()> {
        let mut ledger = ledger(50);
        let alice = ledger.reserve("Alice", "555-1", 2)?;
        let bob = ledger.reserve("Bob", "555-2", 3)?;

        ledger.delete_by_id(&alice.id)?;
        assert_eq!(ledger.position(&bob.id), Some(0));

        ledger.check_out_by_id(&bob.id)?;
        assert_eq!(ledger.seats_left(), 50);
        assert!(ledger.get(&bob.id).is_some_and(|r| !r.is_active()));

        assert_eq!(
            ledger.delete_by_id(&alice.id).map(|d| d.seats_released),
            Err(LedgerError::NotFound(alice.id))
        );
        Ok(())
    }

    #[test]
    fn applied_events_move_list_and_counter_together() {
        let mut ledger = ledger(10);
        let reservation = Reservation::new(
            ReservationId::new(),
            "Alice".to_string(),
            "555-1".to_string(),
            3,
            stub_time(),
        );

        ledger.apply(LedgerEvent::Reserved { reservation });
        assert_eq!((ledger.len(), ledger.seats_left()), (1, 7));

        ledger.apply(LedgerEvent::CheckedOut {
            index: 0,
            at: stub_time(),
            seats_released: 3,
        });
        assert_eq!(ledger.seats_left(), 10);
        assert_eq!(ledger.active_count(), 0);

        ledger.apply(LedgerEvent::Deleted {
            index: 0,
            seats_released: 0,
        });
        assert!(ledger.is_empty());
        assert_eq!(ledger.seats_left(), 10);
    }

    #[test]
    fn snapshot_reflects_state() -> Result<()> {
        let mut ledger = ledger(50);
        ledger.reserve("Alice", "555-1", 4)?;
        let snapshot = ledger.snapshot();

        assert_eq!(snapshot.total_seats, 50);
        assert_eq!(snapshot.seats_left, 46);
        assert_eq!(snapshot.reservations.len(), 1);
        assert_eq!(ledger.recompute_seats_left(), snapshot.seats_left);
        Ok(())
    }
}
