//! Auto-play sequencing
//!
//! Chains rounds without manual re-triggering. Watches the round-active
//! flag for a true->false edge (a round just completed) and either stops
//! or schedules the next bet after the configured delay. Manual stop wins
//! immediately and cancels any scheduled bet.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AutoPlay {
    /// True while a run is in progress
    pub active: bool,
    /// Rounds left in the run
    pub remaining: u32,
    /// Externally held pause: the current round finishes, then the run
    /// stops at the completion edge
    pub paused: bool,
    /// Countdown (seconds) until the next scheduled bet
    pending_delay: Option<f64>,
    /// Previous round-active flag, for edge detection
    was_active: bool,
}

impl AutoPlay {
    /// Begin a run of `count` rounds. The caller places the first bet.
    /// A zero count is a no-op.
    pub fn start(&mut self, count: u32) -> bool {
        if count == 0 {
            return false;
        }
        self.active = true;
        self.remaining = count;
        self.pending_delay = None;
        true
    }

    /// Manual override: cancel any scheduled bet and stop immediately
    pub fn stop(&mut self) {
        self.active = false;
        self.remaining = 0;
        self.pending_delay = None;
    }

    /// Advance the scheduled-bet countdown. Returns true when the delay
    /// expires and the next bet is due.
    pub fn tick(&mut self, dt: f64) -> bool {
        if let Some(mut remaining) = self.pending_delay.take() {
            remaining -= dt;
            if remaining > 0.0 {
                self.pending_delay = Some(remaining);
                return false;
            }
            return true;
        }
        false
    }

    /// Feed the current round-active flag. On an active->inactive edge,
    /// decide whether the run schedules another bet, finishes, or stops.
    pub fn observe_round(
        &mut self,
        round_active: bool,
        balance: f64,
        bet_amount: f64,
        delay_secs: f64,
    ) {
        if round_active {
            self.was_active = true;
            return;
        }
        if !self.was_active {
            return;
        }
        self.was_active = false;

        if !self.active {
            return;
        }
        if self.paused || balance < bet_amount {
            log::info!(
                "auto-play stopped ({})",
                if self.paused { "paused" } else { "insufficient balance" }
            );
            self.stop();
            return;
        }
        if self.remaining == 0 {
            self.stop();
            return;
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            // That was the last round of the run; no further bet
            self.active = false;
            return;
        }
        self.pending_delay = Some(delay_secs);
    }

    /// True when a bet is scheduled but not yet due
    pub fn has_pending_bet(&self) -> bool {
        self.pending_delay.is_some()
    }
}
