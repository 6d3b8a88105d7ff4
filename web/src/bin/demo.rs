//! Console walk-through of the seating ledger.
//!
//! Seats a few parties, turns one away for lack of capacity, checks one out
//! twice and deletes reservations, rendering the venue after each step.

use seating_core::{LedgerError, ReservationLedger};
use seating_web::config::DEFAULT_LOG_FILTER;
use seating_web::presentation::{local_timestamp, render_summary, render_table};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn render(title: &str, ledger: &ReservationLedger) {
    let snapshot = ledger.snapshot();
    println!("\n>>> {title}");
    println!("{}", render_summary(&snapshot));
    println!("{}", render_table(&snapshot, local_timestamp));
}

fn main() -> Result<(), LedgerError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Restaurant Reservation System ===");

    let mut ledger = ReservationLedger::new(50)?;
    render("Opening", &ledger);

    let alice = ledger.reserve("Alice", "555-1", 4)?;
    render("Reserve Alice (4 guests)", &ledger);

    match ledger.reserve("Bob", "555-2", 50) {
        Err(e @ LedgerError::InsufficientCapacity { .. }) => {
            println!("\n>>> Reserve Bob (50 guests): {e}");
        }
        other => println!("\n>>> Reserve Bob (50 guests): unexpected {other:?}"),
    }

    let carol = ledger.reserve("Carol", "555-3", 6)?;
    render("Reserve Carol (6 guests)", &ledger);

    ledger.check_out_by_id(&alice.id)?;
    ledger.check_out_by_id(&alice.id)?;
    render("Check out Alice (twice)", &ledger);

    ledger.delete_by_id(&alice.id)?;
    render("Delete Alice (already checked out)", &ledger);

    ledger.delete_by_id(&carol.id)?;
    render("Delete Carol (still seated)", &ledger);

    println!("=== Demo Complete ===");
    Ok(())
}
