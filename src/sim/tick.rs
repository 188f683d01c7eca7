//! Round state machine tick
//!
//! Idle -> Launching -> Flying -> Win | Crashed -> Idle, driven by a
//! variable-timestep tick. The outcome is fully determined before Flying
//! begins; ticking only replays it against the curve.

use crate::config::CrashConfig;
use crate::{round2, truncate2};

use super::curve;
use super::flight::{Flight, FlightEvent};
use super::resolver;
use super::state::{CrashOutcome, GameEvent, GameState, PendingResolution, RoundPhase};

/// Commands and clock for a single tick. One-shot flags are cleared by
/// the caller after each tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Place a bet (player button or auto-play)
    pub place_bet: bool,
    /// Adjust the bet amount (idle only)
    pub set_bet: Option<f64>,
    /// Adjust the target multiplier (idle only; clamped and rounded)
    pub set_target: Option<f64>,
    /// Begin an auto-play run of N rounds (idle only)
    pub start_auto_play: Option<u32>,
    /// Cancel auto-play immediately
    pub stop_auto_play: bool,
    /// Wall-clock ms, stamped onto outcomes minted this tick
    pub now_ms: f64,
}

/// Advance the session by one tick
pub fn tick(state: &mut GameState, config: &CrashConfig, input: &TickInput, dt: f64) {
    let auto_was_running = state.auto_play.active;

    apply_commands(state, config, input, dt);
    advance_phase(state, config, dt);
    drain_resolution(state, config, input.now_ms, dt);

    // Display values are pinned between rounds so stale flight state
    // never flickers through
    if matches!(state.phase, RoundPhase::Idle | RoundPhase::Launching) {
        state.current_multiplier = 1.0;
        state.elapsed_secs = 0.0;
    }

    // Auto-play watches completed rounds and schedules the next bet
    state.auto_play.observe_round(
        state.is_active(),
        state.balance,
        state.bet_amount,
        config.auto_play_delay_secs(),
    );
    if auto_was_running && !state.auto_play.active {
        state.events.push(GameEvent::AutoPlayFinished);
    }
}

fn apply_commands(state: &mut GameState, config: &CrashConfig, input: &TickInput, dt: f64) {
    if input.stop_auto_play {
        state.auto_play.stop();
    }
    if let Some(amount) = input.set_bet {
        set_bet(state, amount);
    }
    if let Some(target) = input.set_target {
        set_target(state, config, target);
    }

    let mut bet_requested = input.place_bet;
    let mut auto_bet = false;

    if let Some(count) = input.start_auto_play {
        if state.is_active() {
            // The first auto-play bet is unconditional; accepting it
            // mid-round would double-spend against the round in flight
            log::warn!("ignoring auto-play start while a round is active");
        } else if state.auto_play.start(count) {
            log::info!("auto-play started: {count} rounds");
            bet_requested = true;
            auto_bet = true;
        }
    }
    if state.auto_play.tick(dt) {
        bet_requested = true;
        auto_bet = true;
    }

    if bet_requested && !place_bet(state, config) && auto_bet {
        // A scheduled bet that cannot go out ends the run
        state.auto_play.stop();
    }
}

/// Debit the balance and start the launch countdown. Returns false (and
/// changes nothing) when the session is mid-round, the bet is
/// non-positive, or the balance cannot cover it.
fn place_bet(state: &mut GameState, config: &CrashConfig) -> bool {
    if state.phase != RoundPhase::Idle {
        return false;
    }
    if !(state.bet_amount > 0.0) || state.balance < state.bet_amount {
        return false;
    }

    state.balance -= state.bet_amount;
    state.round_generation += 1;
    state.pending_resolution = Some(PendingResolution {
        generation: state.round_generation,
        remaining_secs: config.launch_countdown_secs() + config.resolve_delay_secs(),
        target_multiplier: state.target_multiplier,
        bet_amount: state.bet_amount,
    });
    state.phase = RoundPhase::Launching;
    state.events.push(GameEvent::BetPlaced {
        bet_amount: state.bet_amount,
        target_multiplier: state.target_multiplier,
    });
    log::info!(
        "bet placed: {} at {} target, balance {}",
        state.bet_amount,
        curve::format_multiplier(state.target_multiplier),
        state.balance
    );
    true
}

fn set_bet(state: &mut GameState, amount: f64) {
    // Adjustable only between rounds; mid-flight changes are UI races
    if state.phase != RoundPhase::Idle {
        return;
    }
    if !amount.is_finite() || amount <= 0.0 {
        return;
    }
    state.bet_amount = amount;
}

fn set_target(state: &mut GameState, config: &CrashConfig, target: f64) {
    if state.phase != RoundPhase::Idle {
        return;
    }
    if !target.is_finite() {
        return;
    }
    state.target_multiplier = round2(target.clamp(config.min_target, config.max_target));
}

fn advance_phase(state: &mut GameState, config: &CrashConfig, dt: f64) {
    match state.phase {
        RoundPhase::Flying => advance_flight(state, config, dt),
        RoundPhase::Win | RoundPhase::Crashed => {
            state.phase_timer -= dt;
            if state.phase_timer <= 0.0 {
                state.phase = RoundPhase::Idle;
                state.phase_timer = 0.0;
                state.crash_point = None;
                state.pending_outcome = None;
            }
        }
        RoundPhase::Idle | RoundPhase::Betting | RoundPhase::Launching => {}
    }
}

fn advance_flight(state: &mut GameState, config: &CrashConfig, dt: f64) {
    let Some(outcome) = state.pending_outcome.clone() else {
        return;
    };

    let event = state.flight.advance(
        dt * state.speed_multiplier,
        config.curve_speed,
        outcome.crash_point,
        outcome.target_multiplier,
    );
    state.elapsed_secs = state.flight.elapsed_secs;
    state.current_multiplier = state.flight.multiplier(config.curve_speed);

    match event {
        FlightEvent::Climbing => {}
        FlightEvent::ReachedTarget => {
            state.balance += outcome.win_amount;
            state.current_multiplier = truncate2(outcome.target_multiplier);
            log::info!(
                "win at {}: +{}, balance {}",
                curve::format_multiplier(outcome.target_multiplier),
                outcome.win_amount,
                state.balance
            );
            finish_round(state, config, outcome, RoundPhase::Win, config.win_celebration_secs());
        }
        FlightEvent::ReachedCrash => {
            state.current_multiplier = truncate2(outcome.crash_point);
            log::info!(
                "crashed at {}",
                curve::format_multiplier(outcome.crash_point)
            );
            finish_round(state, config, outcome, RoundPhase::Crashed, config.result_pause_secs());
        }
    }
}

fn finish_round(
    state: &mut GameState,
    config: &CrashConfig,
    outcome: CrashOutcome,
    phase: RoundPhase,
    pause_secs: f64,
) {
    let round_id = state.next_round_id();
    state.push_history(
        resolver::to_history_entry(round_id, &outcome),
        config.max_history_length,
    );
    state.last_result = Some(outcome.clone());
    state.phase = phase;
    state.phase_timer = pause_secs;
    state.events.push(GameEvent::RoundResolved { round_id, outcome });
}

/// Count down the simulated resolver round-trip. This drains in every
/// phase - like the network call it stands in for, it cannot be
/// cancelled, only have its result discarded.
fn drain_resolution(state: &mut GameState, config: &CrashConfig, now_ms: f64, dt: f64) {
    let Some(mut pending) = state.pending_resolution.take() else {
        return;
    };
    pending.remaining_secs -= dt;
    if pending.remaining_secs > 0.0 {
        state.pending_resolution = Some(pending);
        return;
    }

    if pending.generation != state.round_generation {
        log::warn!(
            "discarding stale crash resolution (generation {} superseded by {})",
            pending.generation,
            state.round_generation
        );
        return;
    }
    debug_assert_eq!(state.phase, RoundPhase::Launching);

    let outcome = resolver::resolve_crash(
        config,
        state.seed,
        pending.generation,
        pending.target_multiplier,
        pending.bet_amount,
        now_ms,
    );
    log::info!(
        "round {} resolved: crash point {}",
        pending.generation,
        curve::format_multiplier(outcome.crash_point)
    );
    state.crash_point = Some(outcome.crash_point);
    state.pending_outcome = Some(outcome);
    state.flight = Flight::default();
    state.phase = RoundPhase::Flying;
    state.events.push(GameEvent::FlightStarted);
}
