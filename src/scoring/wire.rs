//! Tolerant decoding of device and event payloads.
//!
//! The typed [`Vehicle`] and event structs require an id. Payloads from the
//! platform may omit it, so batches are decoded through these records and
//! entries without a usable id are dropped, leaving the rest of the batch
//! intact.

use super::types::{BehaviorEvent, EventKind, ScheduleEvent, Vehicle};
use serde::Deserialize;

/// A device as it arrives on the wire.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WireVehicle {
    #[serde(default, deserialize_with = "crate::lenient::id")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "crate::lenient::null_as_default")]
    pub name: String,
}

/// An event as it arrives on the wire, from either channel.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    #[serde(default, deserialize_with = "crate::lenient::id")]
    pub device_id: Option<i64>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "crate::lenient::null_as_default"
    )]
    pub kind: EventKind,
}

/// Keeps devices with an id. `null` entries are skipped.
pub fn decode_vehicles(raw: Vec<Option<WireVehicle>>) -> Vec<Vehicle> {
    raw.into_iter()
        .flatten()
        .filter_map(|v| Some(Vehicle::new(v.id?, v.name)))
        .collect()
}

/// Keeps behavior events with a device id. `null` entries are skipped.
pub fn decode_behavior(raw: Vec<Option<WireEvent>>) -> Vec<BehaviorEvent> {
    raw.into_iter()
        .flatten()
        .filter_map(|e| Some(BehaviorEvent::new(e.device_id?, e.kind)))
        .collect()
}

/// Keeps schedule events with a device id. `null` entries are skipped.
pub fn decode_schedule(raw: Vec<Option<WireEvent>>) -> Vec<ScheduleEvent> {
    raw.into_iter()
        .flatten()
        .filter_map(|e| Some(ScheduleEvent::new(e.device_id?, e.kind)))
        .collect()
}
