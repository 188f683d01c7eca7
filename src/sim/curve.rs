//! Multiplier curve math
//!
//! The climb is exponential: multiplier = e^(curve_speed * t). All
//! functions are pure; out-of-domain inputs clamp to the 1.00x floor
//! instead of panicking.

use crate::truncate2;

/// Convert elapsed flight time (seconds) to the displayed multiplier,
/// truncated to 2 decimal places.
pub fn time_to_multiplier(elapsed_secs: f64, curve_speed: f64) -> f64 {
    truncate2((curve_speed * elapsed_secs).exp()).max(1.0)
}

/// Inverse of [`time_to_multiplier`]: seconds until the curve reaches
/// `multiplier`. Values at or below the 1x floor map to t=0.
pub fn multiplier_to_time(multiplier: f64, curve_speed: f64) -> f64 {
    if multiplier <= 1.0 {
        return 0.0;
    }
    multiplier.ln() / curve_speed
}

/// Normalized Y position (0-1) of a multiplier on the logarithmic display
/// scale. 1x maps to `base_y` (space reserved below for artwork), the
/// scale ceiling maps to 1.0, everything past it clamps to the top.
pub fn multiplier_to_y_position(multiplier: f64, scale_max: f64, base_y: f64) -> f64 {
    let base_y = base_y.clamp(0.0, 1.0);
    if scale_max <= 1.0 {
        return base_y;
    }
    let log_norm = (multiplier.max(1.0).ln() / scale_max.ln()).clamp(0.0, 1.0);
    base_y + log_norm * (1.0 - base_y)
}

/// Fixed-precision display form: 0 decimals at 100x and up, 1 decimal at
/// 10x and up, otherwise 2 decimals. Always suffixed with "x".
pub fn format_multiplier(multiplier: f64) -> String {
    if multiplier >= 100.0 {
        format!("{multiplier:.0}x")
    } else if multiplier >= 10.0 {
        format!("{multiplier:.1}x")
    } else {
        format!("{multiplier:.2}x")
    }
}
