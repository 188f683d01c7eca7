//! Rocket Crash - exponential-curve crash game engine
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (curve math, crash distribution, state machine)
//! - `stats`: Session statistics aggregation
//! - `config`: Read-only game configuration
//! - `session`: Embedding shell that drives the sim from frame callbacks
//! - `platform`: Browser/native time source

pub mod config;
pub mod platform;
pub mod session;
pub mod sim;
pub mod stats;

pub use config::{ConfigError, CrashConfig, CrashDistribution};
pub use session::{CrashSession, GameSnapshot};
pub use stats::SessionStats;

/// Truncate to 2 decimal places (floor, not round) - payouts and displayed
/// multipliers never round up
#[inline]
pub fn truncate2(x: f64) -> f64 {
    (x * 100.0).floor() / 100.0
}

/// Round to 2 decimal places (player-entered targets)
#[inline]
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
