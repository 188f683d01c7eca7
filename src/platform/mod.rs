//! Platform abstraction
//!
//! Time is the only platform service the engine needs: wall-clock
//! milliseconds for outcome timestamps and entry-point seeding. The sim
//! itself never reads the clock - time flows in through tick inputs.

/// Milliseconds since the Unix epoch
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Milliseconds since the Unix epoch
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_ms_is_recent() {
        // Sanity: after 2020, before 2100
        let now = now_ms();
        assert!(now > 1.577e12);
        assert!(now < 4.1e12);
    }
}
