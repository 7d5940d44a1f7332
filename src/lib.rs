//! Conduct scoring and route sequencing for fleet-tracking dashboards.
//!
//! Two small, pure engines consumed by the dashboard's ranking and
//! route-planner pages:
//!
//! - **Scoring**: Turns vehicles plus behavior and schedule-deviation
//!   events into per-vehicle conduct scores and violation tallies, ranked
//!   by descending score.
//! - **Routing**: Reorders route stops with a greedy nearest-neighbor
//!   heuristic over haversine distance, keeping the depot first.
//!
//! # Architecture
//!
//! Both engines are stateless value types. Every call works on its own
//! inputs and local accumulators, so engines can be shared across threads
//! freely. Fetching devices and events, persistence and rendering belong
//! to the host.
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` on all value types, in the
//!   tracking platform's JSON shape
//! - `parallel`: rayon-backed nearest-stop scan
//! - `wasm`: JavaScript bindings via `wasm-bindgen`

pub mod error;
#[cfg(feature = "serde")]
mod lenient;
pub mod routing;
pub mod scoring;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{FleetError, RouteError};
