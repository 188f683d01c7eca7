//! Round state and session types
//!
//! All state a session needs lives here. The sim is deterministic: the
//! same seed, config, and tick inputs replay identically.

use serde::{Deserialize, Serialize};

use super::autoplay::AutoPlay;
use super::flight::Flight;
use crate::config::CrashConfig;

/// Round lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundPhase {
    /// Waiting for a bet; target and bet amount are adjustable
    #[default]
    Idle,
    /// Reserved for a confirm-bet flow; no transition produces it yet
    Betting,
    /// Bet debited, launch countdown running, outcome being resolved
    Launching,
    /// Multiplier climbing toward the pre-resolved outcome
    Flying,
    /// Target reached; payout credited
    Win,
    /// Crash point reached below the target
    Crashed,
}

/// A resolved round. Immutable once minted - the flight animation only
/// reveals it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrashOutcome {
    /// Multiplier the round ends at if the target is not reached first
    pub crash_point: f64,
    /// Target the player committed to before resolution
    pub target_multiplier: f64,
    /// Wager at commit time
    pub bet_amount: f64,
    /// crash_point >= target_multiplier
    pub won: bool,
    /// Payout locked to the target, floored to the cent; 0 on a loss
    pub win_amount: f64,
    /// Wall-clock mint time (ms since epoch), for display
    pub timestamp: f64,
}

/// Entry in the scrolling crash-history bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub crash_point: f64,
    pub timestamp: f64,
}

/// Simulated resolver round-trip in flight, tagged with the round
/// generation that issued it so a late completion can be told apart from
/// the current round's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingResolution {
    pub generation: u64,
    pub remaining_secs: f64,
    pub target_multiplier: f64,
    pub bet_amount: f64,
}

/// Events emitted by the tick loop for the embedding shell (stats, sound
/// triggers) to consume. Drained once per tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    BetPlaced {
        bet_amount: f64,
        target_multiplier: f64,
    },
    FlightStarted,
    RoundResolved {
        round_id: u64,
        outcome: CrashOutcome,
    },
    AutoPlayFinished,
}

/// Complete crash-game session state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed; round N samples from this mixed with generation N
    pub seed: u64,
    pub phase: RoundPhase,
    pub balance: f64,
    pub bet_amount: f64,
    pub target_multiplier: f64,
    /// Displayed multiplier (pinned to 1.00 outside flight)
    pub current_multiplier: f64,
    /// Displayed flight clock (pinned to 0 outside flight)
    pub elapsed_secs: f64,
    /// Revealed crash point (None until the round resolves)
    pub crash_point: Option<f64>,
    /// Last completed round, retained for display after it ends
    pub last_result: Option<CrashOutcome>,
    /// Recent crash points, newest first, bounded by config
    pub history: Vec<HistoryEntry>,
    /// Seconds remaining in the Win/Crashed display pause
    pub phase_timer: f64,
    /// Outcome of the round currently launching or flying
    pub pending_outcome: Option<CrashOutcome>,
    pub pending_resolution: Option<PendingResolution>,
    /// Bumped once per placed bet and on reset; resolutions carrying an
    /// older value are stale and get discarded
    pub round_generation: u64,
    pub auto_play: AutoPlay,
    pub flight: Flight,
    /// Flight-clock scaling (turbo mode); 1.0 = real time
    pub speed_multiplier: f64,
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    /// Mint for history-entry ids; monotonic for the session lifetime
    round_counter: u64,
}

impl GameState {
    pub fn new(config: &CrashConfig, seed: u64) -> Self {
        Self {
            seed,
            phase: RoundPhase::Idle,
            balance: config.starting_balance,
            bet_amount: config.default_bet,
            target_multiplier: config.default_target,
            current_multiplier: 1.0,
            elapsed_secs: 0.0,
            crash_point: None,
            last_result: None,
            history: Vec::new(),
            phase_timer: 0.0,
            pending_outcome: None,
            pending_resolution: None,
            round_generation: 0,
            auto_play: AutoPlay::default(),
            flight: Flight::default(),
            speed_multiplier: 1.0,
            events: Vec::new(),
            round_counter: 0,
        }
    }

    /// Mint the next round id (1-based, never reused within a session)
    pub fn next_round_id(&mut self) -> u64 {
        self.round_counter += 1;
        self.round_counter
    }

    /// True while a round is anywhere between bet placement and the
    /// return to idle
    pub fn is_active(&self) -> bool {
        self.phase != RoundPhase::Idle
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Prepend a history entry, evicting the oldest past `max_len`
    pub fn push_history(&mut self, entry: HistoryEntry, max_len: usize) {
        self.history.insert(0, entry);
        self.history.truncate(max_len);
    }

    /// Abandon the current round and return to idle synchronously.
    ///
    /// The generation bump orphans any resolution still in flight: it
    /// keeps draining on subsequent ticks but can only be discarded, so
    /// no transition fires on behalf of the abandoned round.
    pub fn reset_round(&mut self) {
        self.round_generation += 1;
        self.phase = RoundPhase::Idle;
        self.phase_timer = 0.0;
        self.crash_point = None;
        self.pending_outcome = None;
        self.flight = Flight::default();
        self.current_multiplier = 1.0;
        self.elapsed_secs = 0.0;
    }
}
