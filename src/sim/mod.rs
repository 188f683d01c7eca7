//! Deterministic round simulation
//!
//! Everything that decides money or outcomes lives here and must stay
//! pure and deterministic:
//! - Seeded RNG only (session seed mixed with the round generation)
//! - No wall-clock reads; the shell passes time in through TickInput
//! - Outcomes are fully decided before the flight animation starts
//! - No rendering or platform dependencies

pub mod autoplay;
pub mod curve;
pub mod engine;
pub mod flight;
pub mod resolver;
pub mod state;
pub mod tick;

pub use autoplay::AutoPlay;
pub use engine::Resolution;
pub use flight::{Flight, FlightEvent};
pub use state::{
    CrashOutcome, GameEvent, GameState, HistoryEntry, PendingResolution, RoundPhase,
};
pub use tick::{TickInput, tick};
