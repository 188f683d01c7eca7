//! Per-round flight driver
//!
//! Owns the flight clock and the one-shot resolution latch for a single
//! round. The outcome is decided before the flight starts; this driver
//! only decides *when* the already-known result is revealed.

use serde::{Deserialize, Serialize};

use super::curve;

/// What a flight step observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightEvent {
    /// Still below both thresholds
    Climbing,
    /// Animated multiplier reached the player's target (win branch)
    ReachedTarget,
    /// Animated multiplier reached the crash point (loss branch)
    ReachedCrash,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Flight {
    /// Flight clock, seconds since launch
    pub elapsed_secs: f64,
    /// One-shot latch: once a terminal event fires the driver reports
    /// Climbing forever, so exactly one terminal event per round
    resolved: bool,
}

impl Flight {
    /// Advance the flight clock and check the thresholds.
    ///
    /// The win check dominates: crash_point >= target means the target is
    /// reached first (or simultaneously) on the monotonic curve, so the
    /// crash branch is only reachable when crash_point < target.
    pub fn advance(
        &mut self,
        dt: f64,
        curve_speed: f64,
        crash_point: f64,
        target_multiplier: f64,
    ) -> FlightEvent {
        self.elapsed_secs += dt;
        if self.resolved {
            return FlightEvent::Climbing;
        }

        let multiplier = curve::time_to_multiplier(self.elapsed_secs, curve_speed);
        if multiplier >= target_multiplier && crash_point >= target_multiplier {
            self.resolved = true;
            return FlightEvent::ReachedTarget;
        }
        if multiplier >= crash_point && crash_point < target_multiplier {
            self.resolved = true;
            return FlightEvent::ReachedCrash;
        }
        FlightEvent::Climbing
    }

    /// Displayed multiplier for the current flight clock
    pub fn multiplier(&self, curve_speed: f64) -> f64 {
        curve::time_to_multiplier(self.elapsed_secs, curve_speed)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}
