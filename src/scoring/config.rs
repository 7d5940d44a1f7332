//! Score engine configuration.

use super::types::EventKind;
use std::collections::HashMap;

/// Strategy for ordering vehicles with equal scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreaker {
    /// Keep the input vehicle order (stable sort).
    PreserveOrder,

    /// Ascending vehicle id, the order an id-keyed JavaScript object
    /// iterates in. Negative ids and ids above `u32::MAX - 1` follow in
    /// input order.
    #[default]
    ById,
}

/// Configuration for the conduct score engine.
///
/// # Defaults
///
/// | Parameter | Default |
/// |-----------|---------|
/// | initial_score | 100 |
/// | deviceOverspeed | 10 |
/// | hardBraking / hardAcceleration / hardCornering | 5 |
/// | schedule_late_start | 20 |
/// | behavior_default_penalty | 0 |
/// | schedule_default_penalty | 15 |
/// | excellent_threshold | 90 |
/// | regular_threshold | 70 |
/// | tie_breaker | ById |
///
/// One weight table serves both input channels. The two channels only
/// differ in the penalty applied to a kind missing from the table.
///
/// # Examples
///
/// ```
/// use fleetwise::scoring::{EventKind, ScoringConfig};
///
/// let config = ScoringConfig::default()
///     .with_weight(EventKind::HardCornering, 8)
///     .with_schedule_default_penalty(10);
/// assert_eq!(config.weight(&EventKind::HardCornering), Some(8));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    /// Score every vehicle starts from.
    pub initial_score: u32,

    /// Penalty per event kind, shared by both channels.
    pub weights: HashMap<EventKind, u32>,

    /// Penalty for a behavior event whose kind is not in `weights`.
    pub behavior_default_penalty: u32,

    /// Penalty for a schedule event whose kind is not in `weights`.
    pub schedule_default_penalty: u32,

    /// Lowest score graded as excellent.
    pub excellent_threshold: u32,

    /// Lowest score graded as regular.
    pub regular_threshold: u32,

    /// Ordering of equal scores in the ranking.
    pub tie_breaker: TieBreaker,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        let weights = HashMap::from([
            (EventKind::DeviceOverspeed, 10),
            (EventKind::HardBraking, 5),
            (EventKind::HardAcceleration, 5),
            (EventKind::HardCornering, 5),
            (EventKind::ScheduleLateStart, 20),
        ]);
        Self {
            initial_score: 100,
            weights,
            behavior_default_penalty: 0,
            schedule_default_penalty: 15,
            excellent_threshold: 90,
            regular_threshold: 70,
            tie_breaker: TieBreaker::ById,
        }
    }
}

impl ScoringConfig {
    /// Sets the starting score.
    pub fn with_initial_score(mut self, score: u32) -> Self {
        self.initial_score = score;
        self
    }

    /// Sets (or overrides) the penalty for one event kind.
    pub fn with_weight(mut self, kind: EventKind, penalty: u32) -> Self {
        self.weights.insert(kind, penalty);
        self
    }

    /// Sets the fallback penalty for unlisted behavior event kinds.
    pub fn with_behavior_default_penalty(mut self, penalty: u32) -> Self {
        self.behavior_default_penalty = penalty;
        self
    }

    /// Sets the fallback penalty for unlisted schedule event kinds.
    pub fn with_schedule_default_penalty(mut self, penalty: u32) -> Self {
        self.schedule_default_penalty = penalty;
        self
    }

    /// Sets the grade thresholds.
    pub fn with_grade_thresholds(mut self, excellent: u32, regular: u32) -> Self {
        self.excellent_threshold = excellent;
        self.regular_threshold = regular;
        self
    }

    /// Sets the tie-breaking strategy.
    pub fn with_tie_breaker(mut self, tb: TieBreaker) -> Self {
        self.tie_breaker = tb;
        self
    }

    /// Returns the table weight for `kind`, if listed.
    pub fn weight(&self, kind: &EventKind) -> Option<u32> {
        self.weights.get(kind).copied()
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.initial_score == 0 {
            return Err("initial_score must be at least 1".into());
        }
        if self.regular_threshold > self.excellent_threshold {
            return Err("regular_threshold must not exceed excellent_threshold".into());
        }
        if self.excellent_threshold > self.initial_score {
            return Err("excellent_threshold must not exceed initial_score".into());
        }
        Ok(())
    }
}
