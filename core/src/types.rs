//! Domain types for the reservation ledger.
//!
//! A reservation is created once, may be checked out once, and may be
//! removed. Its name, phone and guest count never change after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Label shown in the check-out column while a party still holds its seats.
pub const NOT_CHECKED_OUT_LABEL: &str = "Not Checked Out";

/// Stable identifier for a reservation
///
/// Assigned at creation and never reused, so it stays valid when earlier
/// reservations are deleted (unlike a positional index).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReservationId(Uuid);

impl ReservationId {
    /// Creates a new random `ReservationId`
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a `ReservationId` from a UUID
    #[must_use]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Parses a `ReservationId` from its hyphenated string form
    ///
    /// # Errors
    ///
    /// Returns the UUID parse error if `input` is not a valid UUID.
    pub fn parse(input: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(input).map(Self)
    }

    /// Returns the inner UUID
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for ReservationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReservationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a reservation is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReservationStatus {
    /// Party is seated; its guest count is held against capacity
    Active,
    /// Party has left; seats were released (terminal)
    CheckedOut,
}

/// One party's seating record
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    /// Stable identifier
    pub id: ReservationId,
    /// Guest's name
    pub name: String,
    /// Contact number (format unconstrained)
    pub phone: String,
    /// Seats occupied by the party (always at least 1)
    pub guest_count: u32,
    /// When the party was seated
    pub check_in: DateTime<Utc>,
    /// When the party left, if it has
    pub check_out: Option<DateTime<Utc>>,
}

impl Reservation {
    pub(crate) const fn new(
        id: ReservationId,
        name: String,
        phone: String,
        guest_count: u32,
        check_in: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            name,
            phone,
            guest_count,
            check_in,
            check_out: None,
        }
    }

    /// Whether the party still holds its seats
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.check_out.is_none()
    }

    /// Current lifecycle status
    #[must_use]
    pub const fn status(&self) -> ReservationStatus {
        if self.is_active() {
            ReservationStatus::Active
        } else {
            ReservationStatus::CheckedOut
        }
    }

    /// Sets the check-out time if it is not set yet.
    ///
    /// Returns `true` if this call performed the transition.
    pub(crate) fn mark_checked_out(&mut self, at: DateTime<Utc>) -> bool {
        if self.check_out.is_some() {
            return false;
        }
        self.check_out = Some(at);
        true
    }
}

/// Seats taken vs. seats left, ready for a two-slice chart
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacityChart {
    /// Seats held by active reservations
    pub taken: u32,
    /// Seats still free
    pub left: u32,
}

/// Table row for one reservation
///
/// Carries the derived display fields; timestamps stay structured so the
/// presentation layer picks the format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationView {
    /// Stable identifier (used for check-out and delete actions)
    pub id: ReservationId,
    /// Guest's name
    pub name: String,
    /// Contact number
    pub phone: String,
    /// Party size
    pub guest_count: u32,
    /// Check-in time
    pub check_in: DateTime<Utc>,
    /// Check-out time, if any
    pub check_out: Option<DateTime<Utc>>,
    /// Lifecycle status
    pub status: ReservationStatus,
    /// Whether a check-out action should be offered
    pub can_check_out: bool,
}

impl ReservationView {
    /// Check-out column text: the formatted time, or [`NOT_CHECKED_OUT_LABEL`].
    pub fn check_out_label<F>(&self, format: F) -> String
    where
        F: Fn(&DateTime<Utc>) -> String,
    {
        self.check_out
            .as_ref()
            .map_or_else(|| NOT_CHECKED_OUT_LABEL.to_string(), format)
    }
}

impl From<&Reservation> for ReservationView {
    fn from(reservation: &Reservation) -> Self {
        Self {
            id: reservation.id,
            name: reservation.name.clone(),
            phone: reservation.phone.clone(),
            guest_count: reservation.guest_count,
            check_in: reservation.check_in,
            check_out: reservation.check_out,
            status: reservation.status(),
            can_check_out: reservation.is_active(),
        }
    }
}

/// Point-in-time copy of the ledger for rendering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// Fixed venue capacity
    pub total_seats: u32,
    /// Seats not held by active reservations
    pub seats_left: u32,
    /// All reservations in insertion order
    pub reservations: Vec<Reservation>,
}

impl LedgerSnapshot {
    /// Seats held by active reservations
    #[must_use]
    pub const fn seats_taken(&self) -> u32 {
        self.total_seats - self.seats_left
    }

    /// Chart data for the capacity display
    #[must_use]
    pub const fn chart(&self) -> CapacityChart {
        CapacityChart {
            taken: self.seats_taken(),
            left: self.seats_left,
        }
    }

    /// Table rows in insertion order
    #[must_use]
    pub fn views(&self) -> Vec<ReservationView> {
        self.reservations.iter().map(ReservationView::from).collect()
    }
}
