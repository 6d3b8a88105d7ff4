//! Plain-text rendering of a ledger snapshot.
//!
//! This is where timestamps become strings. The ledger stores them as
//! `DateTime<Utc>`; callers pick the display format.

use chrono::{DateTime, Local, Utc};
use seating_core::{LedgerSnapshot, ReservationView};
use std::fmt::Write;

/// Text of the only row shown when the ledger is empty.
pub const EMPTY_TABLE_LABEL: &str = "No Reservations";

const HEADERS: [&str; 5] = ["Name", "Phone", "Check-In", "Check-Out", "Actions"];

/// Formats a timestamp in the host's local time zone.
#[must_use]
pub fn local_timestamp(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

/// One-line capacity summary: total, taken and left.
#[must_use]
pub fn render_summary(snapshot: &LedgerSnapshot) -> String {
    let chart = snapshot.chart();
    format!(
        "Total Seats: {} | Seats Taken: {} | Seats Left: {}",
        snapshot.total_seats, chart.taken, chart.left
    )
}

/// Reservation table, one row per reservation in insertion order.
///
/// Active rows offer both actions; checked-out rows only offer delete.
pub fn render_table<F>(snapshot: &LedgerSnapshot, format: F) -> String
where
    F: Fn(&DateTime<Utc>) -> String + Copy,
{
    let rows: Vec<[String; 5]> = snapshot
        .views()
        .iter()
        .map(|view| row(view, format))
        .collect();

    let mut widths = HEADERS.map(str::len);
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(str::to_string), &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", rule.join("-+-"));

    if rows.is_empty() {
        let _ = writeln!(out, "{EMPTY_TABLE_LABEL}");
    }
    for row in &rows {
        push_line(&mut out, row, &widths);
    }
    out
}

fn row<F>(view: &ReservationView, format: F) -> [String; 5]
where
    F: Fn(&DateTime<Utc>) -> String,
{
    let actions = if view.can_check_out {
        "Checkout, Delete"
    } else {
        "Delete"
    };
    [
        view.name.clone(),
        view.phone.clone(),
        format(&view.check_in),
        view.check_out_label(&format),
        actions.to_string(),
    ]
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", padded.join(" | ").trim_end());
}
