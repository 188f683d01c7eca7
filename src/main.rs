//! Rocket Crash entry point
//!
//! Native builds run a headless demo session (auto-played rounds, stats
//! printout). Wasm builds export the session to the embedding page via
//! wasm-bindgen; the page drives `tick` from requestAnimationFrame and
//! renders from JSON snapshots.

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use wasm_bindgen::prelude::*;

    use rocket_crash::platform;
    use rocket_crash::sim::curve;
    use rocket_crash::{CrashConfig, CrashSession};

    /// JS-facing wrapper around a crash session
    #[wasm_bindgen]
    pub struct CrashGame {
        session: CrashSession,
    }

    #[wasm_bindgen]
    impl CrashGame {
        /// Build a session, optionally overriding config fields from a
        /// JSON object (unknown fields keep their defaults)
        #[wasm_bindgen(constructor)]
        pub fn new(config_json: Option<String>) -> Result<CrashGame, JsValue> {
            let config: CrashConfig = match config_json {
                Some(json) => serde_json::from_str(&json)
                    .map_err(|e| JsValue::from_str(&format!("bad config: {e}")))?,
                None => CrashConfig::default(),
            };
            let seed = platform::now_ms() as u64;
            let session = CrashSession::new(config, seed)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            Ok(CrashGame { session })
        }

        /// Advance by one frame; `dt_secs` is the seconds since the
        /// previous frame
        pub fn tick(&mut self, dt_secs: f64) {
            self.session.tick(platform::now_ms(), dt_secs);
        }

        pub fn place_bet(&mut self) {
            self.session.place_bet();
        }

        pub fn set_bet(&mut self, amount: f64) {
            self.session.set_bet(amount);
        }

        pub fn set_target(&mut self, target: f64) {
            self.session.set_target(target);
        }

        pub fn start_auto_play(&mut self, count: u32) {
            self.session.start_auto_play(count);
        }

        pub fn stop_auto_play(&mut self) {
            self.session.stop_auto_play();
        }

        pub fn pause_auto_play(&mut self, paused: bool) {
            self.session.pause_auto_play(paused);
        }

        pub fn set_speed_multiplier(&mut self, speed: f64) {
            self.session.set_speed_multiplier(speed);
        }

        pub fn reset_round(&mut self) {
            self.session.reset_round();
        }

        pub fn reset_stats(&mut self) {
            self.session.reset_stats();
        }

        pub fn snapshot_json(&self) -> String {
            serde_json::to_string(&self.session.snapshot()).unwrap_or_else(|_| "{}".into())
        }

        /// Effective config (bet options, target presets, scale labels,
        /// timings) for the page to lay out its controls
        pub fn config_json(&self) -> String {
            serde_json::to_string(self.session.config()).unwrap_or_else(|_| "{}".into())
        }

        pub fn stats_json(&self) -> String {
            serde_json::to_string(self.session.stats()).unwrap_or_else(|_| "{}".into())
        }

        /// Display form of a multiplier ("2.45x", "12.3x", "151x")
        pub fn format_multiplier(multiplier: f64) -> String {
            curve::format_multiplier(multiplier)
        }

        /// Normalized Y position of a multiplier on the display scale
        pub fn multiplier_y(&self, multiplier: f64) -> f64 {
            let config = self.session.config();
            curve::multiplier_to_y_position(multiplier, config.scale_max, config.scale_base_y)
        }

        /// Seconds the curve takes to reach a multiplier (for scale and
        /// trajectory layout)
        pub fn multiplier_time(&self, multiplier: f64) -> f64 {
            curve::multiplier_to_time(multiplier, self.session.config().curve_speed)
        }
    }

    #[wasm_bindgen(start)]
    pub fn start() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("rocket-crash engine loaded");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rocket_crash::platform;
    use rocket_crash::{CrashConfig, CrashSession};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let rounds: u32 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or(10)
        .max(1);
    let seed: u64 = args
        .next()
        .and_then(|a| a.parse().ok())
        .unwrap_or_else(|| platform::now_ms() as u64);

    log::info!("headless demo: {rounds} auto-played rounds, seed {seed}");

    let mut session = match CrashSession::new(CrashConfig::default(), seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("invalid config: {e}");
            std::process::exit(1);
        }
    };

    // Turbo flight so the demo does not take wall-clock minutes
    session.set_speed_multiplier(25.0);
    session.start_auto_play(rounds);

    // Simulated 30 Hz frame loop
    let dt = 1.0 / 30.0;
    let mut now_ms = platform::now_ms();
    for _ in 0..1_000_000 {
        now_ms += dt * 1000.0;
        session.tick(now_ms, dt);
        let snapshot = session.snapshot();
        if !snapshot.auto_playing
            && snapshot.phase == rocket_crash::sim::RoundPhase::Idle
            && session.state().pending_resolution.is_none()
        {
            break;
        }
    }

    let snapshot = session.snapshot();
    println!("final balance: {:.2}", snapshot.balance);
    println!(
        "history: {}",
        snapshot
            .history
            .iter()
            .map(|entry| rocket_crash::sim::curve::format_multiplier(entry.crash_point))
            .collect::<Vec<_>>()
            .join(" ")
    );
    match serde_json::to_string_pretty(session.stats()) {
        Ok(json) => println!("stats: {json}"),
        Err(e) => log::error!("failed to encode stats: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_game::start, this just satisfies the compiler
}
