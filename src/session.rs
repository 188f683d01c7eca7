//! Session shell
//!
//! The impure boundary between the deterministic sim and an embedding UI:
//! turns command calls into tick inputs, drives the sim from frame
//! callbacks, feeds completed rounds to the stats tracker, and serves
//! read-only snapshots.

use serde::Serialize;

use crate::config::{ConfigError, CrashConfig};
use crate::sim::{self, CrashOutcome, GameEvent, GameState, HistoryEntry, RoundPhase, TickInput};
use crate::stats::SessionStats;

/// Read-only view of the session, refreshed per frame while a round is
/// running and on every command otherwise
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshot {
    pub phase: RoundPhase,
    pub balance: f64,
    pub bet_amount: f64,
    pub target_multiplier: f64,
    pub current_multiplier: f64,
    pub elapsed_secs: f64,
    pub crash_point: Option<f64>,
    pub last_result: Option<CrashOutcome>,
    pub history: Vec<HistoryEntry>,
    pub auto_playing: bool,
    pub auto_play_remaining: u32,
}

/// One crash-game session: a validated config, the sim state it drives,
/// and the stats fed from completed rounds
pub struct CrashSession {
    config: CrashConfig,
    state: GameState,
    stats: SessionStats,
    last_now_ms: f64,
    last_recorded_round: u64,
}

impl CrashSession {
    pub fn new(config: CrashConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        log::info!("session started (seed {seed})");
        let state = GameState::new(&config, seed);
        Ok(Self {
            config,
            state,
            stats: SessionStats::default(),
            last_now_ms: 0.0,
            last_recorded_round: 0,
        })
    }

    /// Advance the session by one frame. `now_ms` is wall-clock time for
    /// outcome timestamps; `dt_secs` the seconds since the last frame.
    pub fn tick(&mut self, now_ms: f64, dt_secs: f64) {
        self.last_now_ms = now_ms;
        let input = TickInput {
            now_ms,
            ..Default::default()
        };
        sim::tick(&mut self.state, &self.config, &input, dt_secs.max(0.0));
        self.consume_events();
    }

    pub fn place_bet(&mut self) {
        self.command(TickInput {
            place_bet: true,
            ..Default::default()
        });
    }

    pub fn set_bet(&mut self, amount: f64) {
        self.command(TickInput {
            set_bet: Some(amount),
            ..Default::default()
        });
    }

    pub fn set_target(&mut self, target: f64) {
        self.command(TickInput {
            set_target: Some(target),
            ..Default::default()
        });
    }

    pub fn start_auto_play(&mut self, count: u32) {
        self.command(TickInput {
            start_auto_play: Some(count),
            ..Default::default()
        });
    }

    pub fn stop_auto_play(&mut self) {
        self.command(TickInput {
            stop_auto_play: true,
            ..Default::default()
        });
    }

    /// Hold auto-play at the next round boundary (e.g. while a modal is
    /// open). The current round still finishes.
    pub fn pause_auto_play(&mut self, paused: bool) {
        self.state.auto_play.paused = paused;
    }

    /// Scale the flight clock (turbo mode); values <= 0 are ignored
    pub fn set_speed_multiplier(&mut self, speed: f64) {
        if speed.is_finite() && speed > 0.0 {
            self.state.speed_multiplier = speed;
        }
    }

    /// Abandon the current round synchronously: any pending timer or
    /// resolution is orphaned and can no longer produce a transition
    pub fn reset_round(&mut self) {
        self.state.reset_round();
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.state.phase,
            balance: self.state.balance,
            bet_amount: self.state.bet_amount,
            target_multiplier: self.state.target_multiplier,
            current_multiplier: self.state.current_multiplier,
            elapsed_secs: self.state.elapsed_secs,
            crash_point: self.state.crash_point,
            last_result: self.state.last_result.clone(),
            history: self.state.history.clone(),
            auto_playing: self.state.auto_play.active,
            auto_play_remaining: self.state.auto_play.remaining,
        }
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn config(&self) -> &CrashConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Commands run through a zero-length tick so every state change goes
    /// through the same state machine as frame updates
    fn command(&mut self, input: TickInput) {
        let input = TickInput {
            now_ms: self.last_now_ms,
            ..input
        };
        sim::tick(&mut self.state, &self.config, &input, 0.0);
        self.consume_events();
    }

    fn consume_events(&mut self) {
        for event in self.state.drain_events() {
            if let GameEvent::RoundResolved { round_id, outcome } = event {
                // Round ids are strictly monotonic; the reducer is not
                // idempotent, so skip anything already recorded
                if round_id > self.last_recorded_round {
                    self.last_recorded_round = round_id;
                    self.stats.record_round(
                        outcome.bet_amount,
                        outcome.won,
                        outcome.win_amount,
                        outcome.crash_point,
                    );
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_idle(session: &mut CrashSession, mut now_ms: f64) -> f64 {
        for _ in 0..10_000 {
            now_ms += 100.0;
            session.tick(now_ms, 0.1);
            let snapshot = session.snapshot();
            if snapshot.phase == RoundPhase::Idle
                && !snapshot.auto_playing
                && session.state().pending_resolution.is_none()
                && !session.state().auto_play.has_pending_bet()
            {
                return now_ms;
            }
        }
        panic!("session never settled");
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let mut config = CrashConfig::default();
        config.house_edge = 2.0;
        assert!(CrashSession::new(config, 1).is_err());
    }

    #[test]
    fn test_commands_apply_immediately() {
        let mut session = CrashSession::new(CrashConfig::default(), 1).unwrap();
        session.set_bet(5.0);
        session.set_target(3.0);
        let snapshot = session.snapshot();
        assert_eq!(snapshot.bet_amount, 5.0);
        assert_eq!(snapshot.target_multiplier, 3.0);

        session.place_bet();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.phase, RoundPhase::Launching);
        assert_eq!(snapshot.balance, 995.0);
    }

    #[test]
    fn test_round_feeds_stats_exactly_once() {
        let mut session = CrashSession::new(CrashConfig::default(), 77).unwrap();
        session.place_bet();
        run_until_idle(&mut session, 0.0);

        let stats = session.stats();
        assert_eq!(stats.total_rounds, 1);
        assert_eq!(stats.wins + stats.losses, 1);
        assert_eq!(stats.total_wagered, 1.0);

        // Idle ticks never re-record the finished round
        for i in 0..50 {
            session.tick(100_000.0 + f64::from(i) * 100.0, 0.1);
        }
        assert_eq!(session.stats().total_rounds, 1);
    }

    #[test]
    fn test_auto_play_session_reconciles_balance_and_stats() {
        let mut session = CrashSession::new(CrashConfig::default(), 31).unwrap();
        session.set_speed_multiplier(10.0);
        session.start_auto_play(3);
        run_until_idle(&mut session, 0.0);

        let stats = session.stats();
        let snapshot = session.snapshot();
        assert_eq!(stats.total_rounds, 3);
        assert!(!snapshot.auto_playing);
        assert_eq!(snapshot.auto_play_remaining, 0);
        let expected = 1000.0 - stats.total_wagered + stats.total_won;
        assert!(
            (snapshot.balance - expected).abs() < 1e-6,
            "balance={} expected={expected}",
            snapshot.balance
        );
        assert_eq!(snapshot.history.len(), 3);
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = CrashSession::new(CrashConfig::default(), 5).unwrap();
        session.place_bet();
        let json = serde_json::to_string(&session.snapshot()).unwrap();
        assert!(json.contains("\"phase\""));
        assert!(json.contains("\"balance\""));
    }

    #[test]
    fn test_reset_stats_is_explicit() {
        let mut session = CrashSession::new(CrashConfig::default(), 77).unwrap();
        session.place_bet();
        run_until_idle(&mut session, 0.0);
        assert_eq!(session.stats().total_rounds, 1);

        session.reset_stats();
        assert_eq!(session.stats().total_rounds, 0);
    }
}
