//! Configuration management for the seating service.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Default `tracing` filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,seating_web=debug,seating_core=debug";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Venue configuration
    pub venue: VenueConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Log filter (`tracing` `EnvFilter` syntax)
    pub log_level: String,
    /// Seconds open connections get to drain after a shutdown signal
    pub shutdown_timeout_secs: u64,
}

/// Venue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Display name of the venue
    pub name: String,
    /// Fixed seating capacity
    pub total_seats: u32,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable      | Default        |
    /// |---------------|----------------|
    /// | `HOST`        | `0.0.0.0`      |
    /// | `PORT`        | `8080`         |
    /// | `RUST_LOG`    | [`DEFAULT_LOG_FILTER`] |
    /// | `SHUTDOWN_TIMEOUT` | `30` (seconds) |
    /// | `VENUE_NAME`  | `Restaurant`   |
    /// | `TOTAL_SEATS` | `50`           |
    ///
    /// Unparseable numbers fall back to their defaults. A `TOTAL_SEATS` of
    /// zero is accepted here and rejected when the ledger is built.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// `lookup` returns the raw value of a variable, or `None` if unset.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parse_or(&lookup, "PORT", 8080),
                log_level: lookup("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
                shutdown_timeout_secs: parse_or(&lookup, "SHUTDOWN_TIMEOUT", 30),
            },
            venue: VenueConfig {
                name: lookup("VENUE_NAME").unwrap_or_else(|| "Restaurant".to_string()),
                total_seats: parse_or(&lookup, "TOTAL_SEATS", 50),
            },
        }
    }

    /// `host:port` for the HTTP listener
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Grace period for in-flight requests once shutdown starts
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout_secs)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key).and_then(|s| s.parse().ok()).unwrap_or(default)
}
