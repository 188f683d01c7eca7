//! Outcome resolution
//!
//! Stands in for a future network/contract round-trip: a request issued at
//! bet time carries the round generation, the response is minted after a
//! fixed delay, and a response whose generation has been superseded is
//! discarded by the tick loop. Crash points are reproducible - round N of
//! a session draws from the session seed mixed with N.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::engine;
use super::state::{CrashOutcome, HistoryEntry};
use crate::config::{CrashConfig, CrashDistribution};

/// Mix a round generation into the session seed. The odd multiplier keeps
/// the mapping injective over u64, so no two rounds share a stream.
fn round_seed(session_seed: u64, generation: u64) -> u64 {
    generation
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
        .wrapping_add(session_seed)
}

/// Sample and resolve the round that `generation` committed to
pub fn resolve_crash(
    config: &CrashConfig,
    session_seed: u64,
    generation: u64,
    target_multiplier: f64,
    bet_amount: f64,
    now_ms: f64,
) -> CrashOutcome {
    let mut rng = Pcg32::seed_from_u64(round_seed(session_seed, generation));
    let crash_point = match config.distribution {
        CrashDistribution::Production => engine::generate_crash_point(&mut rng, config.house_edge),
        CrashDistribution::Showcase => engine::showcase_crash_point(&mut rng),
    };
    let resolution = engine::resolve_round(crash_point, target_multiplier, bet_amount);
    CrashOutcome {
        crash_point,
        target_multiplier,
        bet_amount,
        won: resolution.won,
        win_amount: resolution.win_amount,
        timestamp: now_ms,
    }
}

/// History entries are keyed by the state machine's monotonic round id
pub fn to_history_entry(round_id: u64, outcome: &CrashOutcome) -> HistoryEntry {
    HistoryEntry {
        id: format!("round-{round_id}"),
        crash_point: outcome.crash_point,
        timestamp: outcome.timestamp,
    }
}
