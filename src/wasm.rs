//! JavaScript bindings for the browser dashboard.
//!
//! Inputs and outputs are plain JS objects in the tracking platform's
//! shape (`{ id, name }`, `{ deviceId, type }`, `{ lat, lng, name }`).
//! Array elements are decoded one by one, so a malformed entry is dropped
//! or neutralised without failing the call.

use crate::routing::{self, RouteSequencer};
use crate::scoring::wire::{self, WireEvent, WireVehicle};
use crate::scoring::{self, ScoreRecord};
use js_sys::Array;
use serde::de::DeserializeOwned;
use std::num::TryFromIntError;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Position-only view of a stop; any other fields are ignored.
#[derive(serde::Deserialize)]
struct Point {
    #[serde(
        default = "crate::lenient::nan",
        deserialize_with = "crate::lenient::coordinate"
    )]
    lat: f64,
    #[serde(
        default = "crate::lenient::nan",
        deserialize_with = "crate::lenient::coordinate"
    )]
    lng: f64,
}

impl Point {
    fn unknown() -> Self {
        Point {
            lat: f64::NAN,
            lng: f64::NAN,
        }
    }
}

impl routing::Waypoint for Point {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

/// Decodes each element on its own; elements that do not fit `T` become
/// `None`. `undefined` and `null` read as an empty list.
fn elements<T: DeserializeOwned>(
    value: JsValue,
    what: &str,
) -> Result<Vec<Option<T>>, JsError> {
    if value.is_undefined() || value.is_null() {
        return Ok(Vec::new());
    }
    let array: Array = value
        .dyn_into()
        .map_err(|_| JsError::new(&format!("{what} must be an array")))?;
    Ok(array
        .iter()
        .map(|v| serde_wasm_bindgen::from_value(v).ok())
        .collect())
}

/// Coordinates of every stop; unreadable stops sit at NaN and are visited last.
fn points(stops: &Array) -> Vec<Point> {
    stops
        .iter()
        .map(|v| serde_wasm_bindgen::from_value(v).unwrap_or_else(|_| Point::unknown()))
        .collect()
}

fn score_batch(
    vehicles: Vec<Option<WireVehicle>>,
    events: Vec<Option<WireEvent>>,
    schedule: Vec<Option<WireEvent>>,
) -> Vec<ScoreRecord> {
    scoring::calculate_scores(
        &wire::decode_vehicles(vehicles),
        &wire::decode_behavior(events),
        &wire::decode_schedule(schedule),
    )
}

fn js_index(i: usize) -> Result<u32, TryFromIntError> {
    u32::try_from(i)
}

fn checked_index(i: usize) -> Result<u32, JsError> {
    js_index(i).map_err(|_| JsError::new(&format!("stop index {i} does not fit in u32")))
}

/// Scores and ranks vehicles. `events` and `scheduleEvents` may be
/// omitted; devices and events without an id are skipped.
#[wasm_bindgen(js_name = calculateScores)]
pub fn calculate_scores(
    vehicles: JsValue,
    events: JsValue,
    schedule_events: JsValue,
) -> Result<JsValue, JsError> {
    let records = score_batch(
        elements(vehicles, "vehicles")?,
        elements(events, "events")?,
        elements(schedule_events, "scheduleEvents")?,
    );
    Ok(serde_wasm_bindgen::to_value(&records)?)
}

/// Reorders stops, returning the caller's own objects in visiting order.
#[wasm_bindgen(js_name = optimizeRoute)]
pub fn optimize_route(stops: &Array) -> Result<Array, JsError> {
    let order = RouteSequencer::default().order(&points(stops));
    let sequenced = Array::new();
    for i in order {
        sequenced.push(&stops.get(checked_index(i)?));
    }
    Ok(sequenced)
}

/// Returns the visiting order as indices into `stops`.
#[wasm_bindgen(js_name = optimizeRouteOrder)]
pub fn optimize_route_order(stops: &Array) -> Result<Vec<u32>, JsError> {
    RouteSequencer::default()
        .order(&points(stops))
        .into_iter()
        .map(checked_index)
        .collect()
}

/// Total length in kilometres of the path through `stops` in order.
#[wasm_bindgen(js_name = routeLengthKm)]
pub fn route_length_km(stops: &Array) -> f64 {
    routing::route_length_km(&points(stops))
}

/// Great-circle distance in kilometres.
#[wasm_bindgen(js_name = haversineKm)]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    routing::haversine_km(lat1, lng1, lat2, lng2)
}
