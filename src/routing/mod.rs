//! Route-stop sequencing over great-circle distance.
//!
//! Reorders the intermediate stops of a route with a greedy
//! nearest-neighbor heuristic, keeping the first stop (the depot) fixed.
//!
//! # Key Types
//!
//! - [`Waypoint`]: Anything with a latitude and longitude
//! - [`RouteSequencer`]: Runs the heuristic and measures the result
//! - [`RouteConfig`]: Sphere radius, reorder threshold, parallel scan
//!
//! # References
//!
//! - Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several
//!   Heuristics for the Traveling Salesman Problem", *SIAM J. Comput.* 6(3)
//! - Sinnott (1984), "Virtues of the Haversine", *Sky and Telescope* 68(2)

mod config;
pub mod geo;
mod sequencer;
mod types;

pub use config::RouteConfig;
pub use geo::{distance_km, haversine_km, route_length_km, EARTH_RADIUS_KM};
pub use sequencer::{optimize_route, validate_stops, RouteResult, RouteSequencer};
pub use types::{GeoStop, Waypoint};
