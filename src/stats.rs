//! Session statistics
//!
//! Running aggregation of completed rounds. All in-memory: initialized to
//! zero at session start, reset only by explicit user action.

use serde::{Deserialize, Serialize};

/// Session-wide aggregate, updated once per completed round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionStats {
    pub total_rounds: u32,
    pub wins: u32,
    pub losses: u32,
    pub total_wagered: f64,
    pub total_won: f64,
    pub biggest_win: f64,
    pub biggest_multiplier: f64,
    /// total_won - total_wagered
    pub net_pnl: f64,
    /// Positive = consecutive wins, negative = consecutive losses,
    /// magnitude = streak length
    pub current_streak: i32,
}

impl SessionStats {
    /// Fold one completed round into the aggregate.
    ///
    /// Not idempotent: recording the same round twice double-counts, so
    /// callers must deduplicate (the session shell keys on round ids).
    pub fn record_round(&mut self, bet: f64, won: bool, win_amount: f64, crash_point: f64) {
        self.total_rounds += 1;
        if won {
            self.wins += 1;
        } else {
            self.losses += 1;
        }
        self.total_wagered += bet;
        self.total_won += win_amount;
        self.biggest_win = self.biggest_win.max(win_amount);
        self.biggest_multiplier = self.biggest_multiplier.max(crash_point);
        self.net_pnl = self.total_won - self.total_wagered;

        self.current_streak = if won {
            if self.current_streak > 0 {
                self.current_streak + 1
            } else {
                1
            }
        } else if self.current_streak < 0 {
            self.current_streak - 1
        } else {
            -1
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of rounds won, 0.0 before any round completes
    pub fn win_rate(&self) -> f64 {
        if self.total_rounds == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.total_rounds)
        }
    }
}
