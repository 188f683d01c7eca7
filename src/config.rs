//! Game configuration
//!
//! A read-only bundle fixed at session start. The embedding layer may
//! deserialize overrides from JSON; the sim only ever reads it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which crash-point distribution a session samples from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CrashDistribution {
    /// House-edge distribution: `house_edge` of rounds crash instantly at
    /// 1.00x, the rest fall off as 1/(1-e). Median lands around 2x.
    #[default]
    Production,
    /// Biased toward 2x-500x in even buckets, for demoing the climb
    Showcase,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("house_edge out of range (got={got}, expected 0..1 exclusive)")]
    HouseEdgeOutOfRange { got: f64 },
    #[error("curve_speed must be positive (got={got})")]
    CurveSpeedNotPositive { got: f64 },
    #[error("target bounds invalid (min={min}, default={default}, max={max})")]
    TargetBoundsInvalid { min: f64, default: f64, max: f64 },
    #[error("starting_balance must be non-negative (got={got})")]
    StartingBalanceNegative { got: f64 },
    #[error("default_bet must be positive (got={got})")]
    DefaultBetNotPositive { got: f64 },
    #[error("{name} must be positive (got={got} ms)")]
    TimingNotPositive { name: &'static str, got: u32 },
    #[error("display scale unreachable (scale_max={scale_max}, curve_speed={curve_speed})")]
    ScaleUnreachable { scale_max: f64, curve_speed: f64 },
    #[error("scale_base_y out of range (got={got}, expected 0..1)")]
    ScaleBaseYOutOfRange { got: f64 },
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CrashConfig {
    // === Balance ===
    pub starting_balance: f64,
    pub default_bet: f64,
    pub bet_options: Vec<f64>,

    // === Target multiplier ===
    pub default_target: f64,
    pub min_target: f64,
    pub max_target: f64,
    pub target_presets: Vec<f64>,
    pub target_step_fine: f64,
    pub target_step_coarse: f64,

    // === Crash distribution ===
    /// Probability mass of an instant 1.00x crash (long-run operator edge)
    pub house_edge: f64,
    pub distribution: CrashDistribution,

    // === Curve ===
    /// Exponential climb rate: multiplier = e^(curve_speed * t).
    /// 0.23 calibrates to 2x at ~3s, 5x at ~7s, 10x at ~10s, 25x at ~14s.
    pub curve_speed: f64,

    // === Display scale (logarithmic) ===
    /// Multiplier at the top of the scale
    pub scale_max: f64,
    /// Normalized Y reserved below the 1x line for background artwork
    pub scale_base_y: f64,
    pub scale_labels: Vec<f64>,

    // === Timing (ms) ===
    /// Pre-launch countdown after a bet is placed
    pub launch_countdown_ms: u32,
    /// Ignition animation overlap at the start of the countdown
    pub launch_ignition_ms: u32,
    /// Simulated resolver round-trip
    pub resolve_delay_ms: u32,
    /// Crash explosion animation
    pub explosion_duration_ms: u32,
    /// Pause showing a win before returning to idle
    pub win_celebration_ms: u32,
    /// Pause showing a crash before returning to idle
    pub result_pause_ms: u32,
    /// Gap between auto-played rounds
    pub auto_play_delay_ms: u32,

    // === Auto-play ===
    pub auto_play_options: Vec<u32>,

    // === History ===
    pub max_history_length: usize,
}

impl Default for CrashConfig {
    fn default() -> Self {
        Self {
            starting_balance: 1000.0,
            default_bet: 1.0,
            bet_options: vec![0.5, 1.0, 2.0, 5.0, 10.0, 25.0],

            default_target: 2.0,
            min_target: 1.01,
            max_target: 1000.0,
            target_presets: vec![
                1.5, 2.0, 3.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0, 500.0, 1000.0,
            ],
            target_step_fine: 0.01,
            target_step_coarse: 0.1,

            house_edge: 0.03,
            distribution: CrashDistribution::Production,

            curve_speed: 0.23,

            scale_max: 250.0,
            scale_base_y: 0.12,
            scale_labels: vec![1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 250.0],

            launch_countdown_ms: 1500,
            launch_ignition_ms: 500,
            resolve_delay_ms: 50,
            explosion_duration_ms: 800,
            win_celebration_ms: 1500,
            result_pause_ms: 1000,
            auto_play_delay_ms: 1500,

            auto_play_options: vec![5, 10, 25, 50],

            max_history_length: 20,
        }
    }
}

impl CrashConfig {
    /// Check the bundle before a session starts. The sim assumes a valid
    /// config and does not re-check these at every tick.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.house_edge > 0.0 && self.house_edge < 1.0) {
            return Err(ConfigError::HouseEdgeOutOfRange {
                got: self.house_edge,
            });
        }
        if !(self.curve_speed > 0.0) {
            return Err(ConfigError::CurveSpeedNotPositive {
                got: self.curve_speed,
            });
        }
        if !(self.min_target >= 1.01
            && self.min_target <= self.default_target
            && self.default_target <= self.max_target)
        {
            return Err(ConfigError::TargetBoundsInvalid {
                min: self.min_target,
                default: self.default_target,
                max: self.max_target,
            });
        }
        if !(self.starting_balance >= 0.0) {
            return Err(ConfigError::StartingBalanceNegative {
                got: self.starting_balance,
            });
        }
        if !(self.default_bet > 0.0) {
            return Err(ConfigError::DefaultBetNotPositive {
                got: self.default_bet,
            });
        }
        for (name, got) in [
            ("launch_countdown_ms", self.launch_countdown_ms),
            ("launch_ignition_ms", self.launch_ignition_ms),
            ("resolve_delay_ms", self.resolve_delay_ms),
            ("explosion_duration_ms", self.explosion_duration_ms),
            ("win_celebration_ms", self.win_celebration_ms),
            ("result_pause_ms", self.result_pause_ms),
            ("auto_play_delay_ms", self.auto_play_delay_ms),
        ] {
            if got == 0 {
                return Err(ConfigError::TimingNotPositive { name, got });
            }
        }
        // The climb must be able to cross the display scale: the time to
        // reach scale_max is ln(scale_max)/curve_speed, which is only
        // finite and positive when the ceiling sits above the 1x floor.
        if !(self.scale_max > 1.0) {
            return Err(ConfigError::ScaleUnreachable {
                scale_max: self.scale_max,
                curve_speed: self.curve_speed,
            });
        }
        if !(self.scale_base_y >= 0.0 && self.scale_base_y < 1.0) {
            return Err(ConfigError::ScaleBaseYOutOfRange {
                got: self.scale_base_y,
            });
        }
        Ok(())
    }

    /// Seconds the rocket takes to climb the full display scale
    pub fn scale_crossing_secs(&self) -> f64 {
        self.scale_max.ln() / self.curve_speed
    }

    pub fn launch_countdown_secs(&self) -> f64 {
        self.launch_countdown_ms as f64 / 1000.0
    }

    pub fn resolve_delay_secs(&self) -> f64 {
        self.resolve_delay_ms as f64 / 1000.0
    }

    pub fn win_celebration_secs(&self) -> f64 {
        self.win_celebration_ms as f64 / 1000.0
    }

    pub fn result_pause_secs(&self) -> f64 {
        self.result_pause_ms as f64 / 1000.0
    }

    pub fn auto_play_delay_secs(&self) -> f64 {
        self.auto_play_delay_ms as f64 / 1000.0
    }
}
