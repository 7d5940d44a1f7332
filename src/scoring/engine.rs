//! Conduct score computation.
//!
//! # Algorithm
//!
//! 1. Every vehicle starts at `initial_score` with zeroed counters
//! 2. Each behavior event subtracts its table weight (fallback
//!    `behavior_default_penalty`) and bumps the matching counter
//! 3. Each schedule event subtracts its table weight (fallback
//!    `schedule_default_penalty`); `schedule_late_start` bumps `late`
//! 4. Scores are clamped at zero and ranked descending
//!
//! Events for a device id that is not in the vehicle list are dropped.

use super::config::ScoringConfig;
use super::ranking::rank;
use super::types::{
    BehaviorEvent, Channel, EventKind, Grade, ScheduleEvent, ScoreRecord, Vehicle, Violations,
};
use crate::error::FleetError;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Running total for one vehicle.
struct Tally {
    id: i64,
    name: String,
    score: i64,
    violations: Violations,
}

/// Computes conduct scores and rankings.
///
/// # Examples
///
/// ```
/// use fleetwise::scoring::{BehaviorEvent, ScoreEngine, Vehicle};
///
/// let vehicles = vec![Vehicle::new(1, "A"), Vehicle::new(2, "B")];
/// let events = vec![
///     BehaviorEvent::new(1, "deviceOverspeed"),
///     BehaviorEvent::new(1, "hardBraking"),
/// ];
///
/// let ranking = ScoreEngine::default().calculate(&vehicles, &events, &[]);
/// assert_eq!(ranking[0].name, "B");
/// assert_eq!(ranking[1].score, 85);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    /// Creates an engine without validating `config`.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// Creates an engine, rejecting an invalid configuration.
    pub fn try_new(config: ScoringConfig) -> Result<Self, FleetError> {
        config.validate().map_err(FleetError::Config)?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Penalty an event of `kind` costs on `channel`.
    pub fn penalty_for(&self, kind: &EventKind, channel: Channel) -> u32 {
        self.config.weight(kind).unwrap_or(match channel {
            Channel::Behavior => self.config.behavior_default_penalty,
            Channel::Schedule => self.config.schedule_default_penalty,
        })
    }

    /// Maps a score to its badge.
    pub fn grade(&self, score: u32) -> Grade {
        if score >= self.config.excellent_threshold {
            Grade::Excellent
        } else if score >= self.config.regular_threshold {
            Grade::Regular
        } else {
            Grade::Critical
        }
    }

    /// Scores every vehicle and returns them ranked by descending score.
    ///
    /// Never fails. One record is produced per distinct vehicle id; when an
    /// id repeats, the last name wins.
    pub fn calculate(
        &self,
        vehicles: &[Vehicle],
        behavior: &[BehaviorEvent],
        schedule: &[ScheduleEvent],
    ) -> Vec<ScoreRecord> {
        debug!(
            vehicles = vehicles.len(),
            behavior = behavior.len(),
            schedule = schedule.len(),
            "calculating conduct scores"
        );

        let mut tallies: Vec<Tally> = Vec::with_capacity(vehicles.len());
        let mut slot_of: HashMap<i64, usize> = HashMap::with_capacity(vehicles.len());

        for vehicle in vehicles {
            match slot_of.get(&vehicle.id) {
                Some(&slot) => tallies[slot].name.clone_from(&vehicle.name),
                None => {
                    slot_of.insert(vehicle.id, tallies.len());
                    tallies.push(Tally {
                        id: vehicle.id,
                        name: vehicle.name.clone(),
                        score: i64::from(self.config.initial_score),
                        violations: Violations::default(),
                    });
                }
            }
        }

        for event in behavior {
            let Some(&slot) = slot_of.get(&event.device_id) else {
                trace!(
                    device_id = event.device_id,
                    kind = %event.kind,
                    "dropping event for unknown device"
                );
                continue;
            };
            let tally = &mut tallies[slot];
            tally.score -= i64::from(self.penalty_for(&event.kind, Channel::Behavior));
            match event.kind {
                EventKind::DeviceOverspeed => tally.violations.speeding += 1,
                EventKind::HardBraking => tally.violations.braking += 1,
                EventKind::HardAcceleration => tally.violations.acceleration += 1,
                EventKind::HardCornering => tally.violations.cornering += 1,
                _ => {}
            }
        }

        for event in schedule {
            let Some(&slot) = slot_of.get(&event.device_id) else {
                trace!(
                    device_id = event.device_id,
                    kind = %event.kind,
                    "dropping schedule event for unknown device"
                );
                continue;
            };
            let tally = &mut tallies[slot];
            tally.score -= i64::from(self.penalty_for(&event.kind, Channel::Schedule));
            if event.kind == EventKind::ScheduleLateStart {
                tally.violations.late += 1;
            }
        }

        let mut records: Vec<ScoreRecord> = tallies
            .into_iter()
            .map(|t| ScoreRecord {
                id: t.id,
                name: t.name,
                score: u32::try_from(t.score.max(0)).unwrap_or(u32::MAX),
                violations: t.violations,
            })
            .collect();

        rank(&mut records, self.config.tie_breaker);
        records
    }
}

/// Scores vehicles with the default weights.
///
/// Shorthand for `ScoreEngine::default().calculate(..)`.
pub fn calculate_scores(
    vehicles: &[Vehicle],
    behavior: &[BehaviorEvent],
    schedule: &[ScheduleEvent],
) -> Vec<ScoreRecord> {
    ScoreEngine::default().calculate(vehicles, behavior, schedule)
}
