//! Driver conduct scoring.
//!
//! Turns a vehicle list plus behavior and schedule-deviation events into
//! one [`ScoreRecord`] per vehicle, ranked by descending score.
//!
//! # Key Types
//!
//! - [`ScoreEngine`]: Applies penalties and ranks the fleet
//! - [`ScoringConfig`]: Weight table, fallback penalties, grade thresholds
//! - [`EventKind`]: Recognised event kinds plus a raw fallback
//!
//! The engine is best-effort: events for unknown devices are dropped and
//! unlisted kinds cost the channel's fallback penalty. It never fails.

mod config;
mod engine;
pub mod ranking;
mod types;
#[cfg(feature = "serde")]
pub mod wire;

pub use config::{ScoringConfig, TieBreaker};
pub use engine::{calculate_scores, ScoreEngine};
pub use types::{
    BehaviorEvent, Channel, EventKind, Grade, ScheduleEvent, ScoreRecord, Vehicle, Violations,
};
