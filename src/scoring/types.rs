//! Value types consumed and produced by the score engine.

use std::fmt;
use std::str::FromStr;

/// A tracked asset as reported by the device registry.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id: i64,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::null_as_default")
    )]
    pub name: String,
}

impl Vehicle {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Kind of a detected driving infraction or schedule deviation.
///
/// The four behavior kinds and `schedule_late_start` are recognised; any
/// other platform string is kept verbatim in [`EventKind::Other`] so newer
/// event types pass through without breaking deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum EventKind {
    DeviceOverspeed,
    HardBraking,
    HardAcceleration,
    HardCornering,
    ScheduleLateStart,
    Other(String),
}

impl EventKind {
    /// Returns the wire string used by the tracking platform.
    pub fn as_str(&self) -> &str {
        match self {
            EventKind::DeviceOverspeed => "deviceOverspeed",
            EventKind::HardBraking => "hardBraking",
            EventKind::HardAcceleration => "hardAcceleration",
            EventKind::HardCornering => "hardCornering",
            EventKind::ScheduleLateStart => "schedule_late_start",
            EventKind::Other(raw) => raw,
        }
    }

    /// Whether this is one of the recognised kinds.
    pub fn is_known(&self) -> bool {
        !matches!(self, EventKind::Other(_))
    }
}

impl Default for EventKind {
    fn default() -> Self {
        EventKind::Other(String::new())
    }
}

impl From<&str> for EventKind {
    fn from(raw: &str) -> Self {
        match raw {
            "deviceOverspeed" => EventKind::DeviceOverspeed,
            "hardBraking" => EventKind::HardBraking,
            "hardAcceleration" => EventKind::HardAcceleration,
            "hardCornering" => EventKind::HardCornering,
            "schedule_late_start" => EventKind::ScheduleLateStart,
            other => EventKind::Other(other.to_string()),
        }
    }
}

impl From<String> for EventKind {
    fn from(raw: String) -> Self {
        match EventKind::from(raw.as_str()) {
            EventKind::Other(_) => EventKind::Other(raw),
            known => known,
        }
    }
}

impl From<EventKind> for String {
    fn from(kind: EventKind) -> Self {
        match kind {
            EventKind::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl FromStr for EventKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(EventKind::from(s))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single driving infraction from the reporting API.
///
/// Timestamps and positions are not needed for scoring and are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct BehaviorEvent {
    pub device_id: i64,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "type",
            default,
            deserialize_with = "crate::lenient::null_as_default"
        )
    )]
    pub kind: EventKind,
}

impl BehaviorEvent {
    pub fn new(device_id: i64, kind: impl Into<EventKind>) -> Self {
        Self {
            device_id,
            kind: kind.into(),
        }
    }
}

/// A missed planned timing window, from the scheduling subsystem.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ScheduleEvent {
    pub device_id: i64,
    #[cfg_attr(
        feature = "serde",
        serde(
            rename = "type",
            default,
            deserialize_with = "crate::lenient::null_as_default"
        )
    )]
    pub kind: EventKind,
}

impl ScheduleEvent {
    pub fn new(device_id: i64, kind: impl Into<EventKind>) -> Self {
        Self {
            device_id,
            kind: kind.into(),
        }
    }
}

/// Input channel an event arrived on. Selects the fallback penalty for
/// kinds missing from the weight table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Behavior,
    Schedule,
}

/// Per-vehicle infraction tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violations {
    pub speeding: u32,
    pub braking: u32,
    pub acceleration: u32,
    pub cornering: u32,
    pub late: u32,
}

impl Violations {
    /// Sum of all counters.
    pub fn total(&self) -> u32 {
        self.speeding + self.braking + self.acceleration + self.cornering + self.late
    }
}

/// Conduct score of one vehicle, recomputed on every call.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScoreRecord {
    pub id: i64,
    pub name: String,
    pub score: u32,
    pub violations: Violations,
}

/// Badge shown next to a score on the ranking page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grade {
    Critical,
    Regular,
    Excellent,
}

impl Grade {
    pub fn label(&self) -> &'static str {
        match self {
            Grade::Excellent => "EXCELLENT",
            Grade::Regular => "REGULAR",
            Grade::Critical => "CRITICAL",
        }
    }
}
