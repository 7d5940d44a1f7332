//! Nearest-neighbor stop sequencing.
//!
//! # Algorithm
//!
//! 1. The first stop is the depot and stays first
//! 2. From the current stop, scan every unvisited stop and take the one
//!    with the smallest haversine distance (earliest in input order on ties)
//! 3. Move there and repeat until no stops remain
//!
//! This is a greedy heuristic, O(n²) in the number of stops. It is not an
//! exact TSP solver.

use super::config::RouteConfig;
use super::geo::haversine_with_radius;
use super::types::Waypoint;
use crate::error::{FleetError, RouteError};
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Result of sequencing a route.
#[derive(Debug, Clone)]
pub struct RouteResult<S> {
    /// Stops in visiting order.
    pub stops: Vec<S>,
    /// `order[k]` is the input index of the k-th visited stop.
    pub order: Vec<usize>,
    /// Distance of each consecutive leg, in kilometres.
    pub legs_km: Vec<f64>,
    /// Sum of `legs_km`.
    pub total_km: f64,
}

/// Position in the remaining pool and its distance from the current stop.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    pos: usize,
    dist: f64,
}

/// Picks the preferred of two candidates.
///
/// A finite distance beats NaN, a shorter distance beats a longer one, and
/// the lower pool position wins ties. Associative, so the sequential and
/// parallel scans agree.
fn closer(a: Candidate, b: Candidate) -> Candidate {
    match (a.dist.is_nan(), b.dist.is_nan()) {
        (true, false) => b,
        (false, true) => a,
        _ if b.dist < a.dist => b,
        _ if a.dist < b.dist => a,
        _ => {
            if b.pos < a.pos {
                b
            } else {
                a
            }
        }
    }
}

/// Reorders stops with the nearest-neighbor heuristic.
///
/// # Examples
///
/// ```
/// use fleetwise::routing::{GeoStop, RouteSequencer};
///
/// let stops = vec![
///     GeoStop::new(0.0, 0.0, "Depot"),
///     GeoStop::new(10.0, 10.0, "Far"),
///     GeoStop::new(1.0, 1.0, "Near"),
/// ];
///
/// let result = RouteSequencer::default().run(&stops);
/// let names: Vec<&str> = result.stops.iter().map(|s| s.name.as_str()).collect();
/// assert_eq!(names, ["Depot", "Near", "Far"]);
/// assert_eq!(result.order, [0, 2, 1]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteSequencer {
    config: RouteConfig,
}

impl RouteSequencer {
    /// Creates a sequencer without validating `config`.
    pub fn new(config: RouteConfig) -> Self {
        Self { config }
    }

    /// Creates a sequencer, rejecting an invalid configuration.
    pub fn try_new(config: RouteConfig) -> Result<Self, FleetError> {
        config.validate().map_err(FleetError::Config)?;
        Ok(Self { config })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &RouteConfig {
        &self.config
    }

    fn distance<A: Waypoint, B: Waypoint>(&self, a: &A, b: &B) -> f64 {
        haversine_with_radius(a.lat(), a.lng(), b.lat(), b.lng(), self.config.earth_radius_km)
    }

    /// Computes the visiting order as input indices.
    ///
    /// Coordinates are not validated. A NaN coordinate never wins against a
    /// finite distance, and when every candidate is NaN the earliest
    /// remaining stop is taken, so no stop is ever dropped.
    pub fn order<S: Waypoint>(&self, stops: &[S]) -> Vec<usize> {
        if stops.len() < self.config.min_stops {
            return (0..stops.len()).collect();
        }

        debug!(stops = stops.len(), "sequencing route");

        let mut order = Vec::with_capacity(stops.len());
        let mut remaining: Vec<usize> = (1..stops.len()).collect();
        let mut current = 0usize;
        order.push(current);

        while !remaining.is_empty() {
            let pick = self.nearest(&stops[current], stops, &remaining);
            let next = remaining.remove(pick.pos);
            trace!(from = current, to = next, km = pick.dist, "nearest stop");
            order.push(next);
            current = next;
        }

        order
    }

    fn nearest<S: Waypoint>(&self, from: &S, stops: &[S], remaining: &[usize]) -> Candidate {
        let fallback = Candidate {
            pos: 0,
            dist: f64::NAN,
        };

        #[cfg(feature = "parallel")]
        {
            if self.config.parallel {
                return remaining
                    .par_iter()
                    .enumerate()
                    .map(|(pos, &idx)| Candidate {
                        pos,
                        dist: self.distance(from, &stops[idx]),
                    })
                    .reduce_with(closer)
                    .unwrap_or(fallback);
            }
        }

        remaining
            .iter()
            .enumerate()
            .map(|(pos, &idx)| Candidate {
                pos,
                dist: self.distance(from, &stops[idx]),
            })
            .reduce(closer)
            .unwrap_or(fallback)
    }

    /// Sequences `stops` and measures the resulting route.
    pub fn run<S: Waypoint + Clone>(&self, stops: &[S]) -> RouteResult<S> {
        let order = self.order(stops);
        let sequenced: Vec<S> = order.iter().map(|&i| stops[i].clone()).collect();
        let legs_km: Vec<f64> = sequenced
            .windows(2)
            .map(|w| self.distance(&w[0], &w[1]))
            .collect();
        let total_km = legs_km.iter().sum();

        RouteResult {
            stops: sequenced,
            order,
            legs_km,
            total_km,
        }
    }

    /// Like [`run`](Self::run), but rejects non-finite or out-of-range
    /// coordinates first.
    pub fn try_run<S: Waypoint + Clone>(
        &self,
        stops: &[S],
    ) -> Result<RouteResult<S>, RouteError> {
        validate_stops(stops)?;
        Ok(self.run(stops))
    }
}

/// Checks every stop for finite, in-range coordinates.
pub fn validate_stops<S: Waypoint>(stops: &[S]) -> Result<(), RouteError> {
    for (index, stop) in stops.iter().enumerate() {
        let (lat, lng) = (stop.lat(), stop.lng());
        if !lat.is_finite() || !lng.is_finite() {
            return Err(RouteError::NonFinite { index, lat, lng });
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return Err(RouteError::OutOfRange { index, lat, lng });
        }
    }
    Ok(())
}

/// Reorders stops with the default configuration.
///
/// Fewer than three stops come back in their original order.
pub fn optimize_route<S: Waypoint + Clone>(stops: &[S]) -> Vec<S> {
    RouteSequencer::default().run(stops).stops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::geo::route_length_km;
    use crate::routing::types::GeoStop;

    fn names(stops: &[GeoStop]) -> Vec<&str> {
        stops.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn test_depot_near_far() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "Depot"),
            GeoStop::new(10.0, 10.0, "Far"),
            GeoStop::new(1.0, 1.0, "Near"),
        ];
        assert_eq!(names(&optimize_route(&stops)), ["Depot", "Near", "Far"]);
    }

    #[test]
    fn test_short_inputs_unchanged() {
        let empty: Vec<GeoStop> = vec![];
        assert!(optimize_route(&empty).is_empty());

        let one = vec![GeoStop::new(5.0, 5.0, "Only")];
        assert_eq!(optimize_route(&one), one);

        let two = vec![GeoStop::new(10.0, 10.0, "B"), GeoStop::new(0.0, 0.0, "A")];
        assert_eq!(optimize_route(&two), two);
    }

    #[test]
    fn test_first_stop_fixed() {
        // Depot is far from everything else but still leads.
        let stops = vec![
            GeoStop::new(50.0, 50.0, "Depot"),
            GeoStop::new(0.0, 0.0, "A"),
            GeoStop::new(0.0, 1.0, "B"),
        ];
        assert_eq!(optimize_route(&stops)[0].name, "Depot");
    }

    #[test]
    fn test_line_of_stops() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "S"),
            GeoStop::new(0.0, 4.0, "D"),
            GeoStop::new(0.0, 2.0, "B"),
            GeoStop::new(0.0, 1.0, "A"),
            GeoStop::new(0.0, 3.0, "C"),
        ];
        assert_eq!(names(&optimize_route(&stops)), ["S", "A", "B", "C", "D"]);
    }

    #[test]
    fn test_equidistant_tie_takes_earliest() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "Depot"),
            GeoStop::new(0.0, 1.0, "East"),
            GeoStop::new(0.0, -1.0, "West"),
        ];
        let result = RouteSequencer::default().run(&stops);
        assert_eq!(names(&result.stops), ["Depot", "East", "West"]);

        let swapped = vec![stops[0].clone(), stops[2].clone(), stops[1].clone()];
        let result = RouteSequencer::default().run(&swapped);
        assert_eq!(names(&result.stops), ["Depot", "West", "East"]);
    }

    #[test]
    fn test_preserves_all_stops() {
        let stops = vec![
            GeoStop::new(-23.55, -46.63, "P0"),
            GeoStop::new(-23.60, -46.70, "P1"),
            GeoStop::new(-23.50, -46.60, "P2"),
            GeoStop::new(-23.58, -46.65, "P3"),
            GeoStop::new(-23.52, -46.68, "P4"),
        ];
        let result = RouteSequencer::default().run(&stops);
        let mut order = result.order.clone();
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3, 4]);
        assert_eq!(result.stops.len(), stops.len());
    }

    #[test]
    fn test_extra_fields_carried() {
        #[derive(Debug, Clone, PartialEq)]
        struct Delivery {
            at: (f64, f64),
            parcel: &'static str,
        }
        impl Waypoint for Delivery {
            fn lat(&self) -> f64 {
                self.at.0
            }
            fn lng(&self) -> f64 {
                self.at.1
            }
        }

        let stops = vec![
            Delivery { at: (0.0, 0.0), parcel: "none" },
            Delivery { at: (5.0, 5.0), parcel: "box" },
            Delivery { at: (1.0, 1.0), parcel: "envelope" },
        ];
        let out = optimize_route(&stops);
        assert_eq!(out[1].parcel, "envelope");
        assert_eq!(out[2].parcel, "box");
    }

    #[test]
    fn test_legs_and_total() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "Depot"),
            GeoStop::new(10.0, 10.0, "Far"),
            GeoStop::new(1.0, 1.0, "Near"),
        ];
        let result = RouteSequencer::default().run(&stops);
        assert_eq!(result.legs_km.len(), 2);
        let sum: f64 = result.legs_km.iter().sum();
        assert!((result.total_km - sum).abs() < 1e-9);
        assert!((result.total_km - route_length_km(&result.stops)).abs() < 1e-9);
    }

    #[test]
    fn test_short_route_still_measured() {
        let stops = vec![(0.0, 0.0), (0.0, 1.0)];
        let result = RouteSequencer::default().run(&stops);
        assert_eq!(result.order, vec![0, 1]);
        assert_eq!(result.legs_km.len(), 1);
    }

    #[test]
    fn test_min_stops_config() {
        let stops = vec![(0.0, 0.0), (0.0, 3.0), (0.0, 1.0)];
        let sequencer = RouteSequencer::new(RouteConfig::default().with_min_stops(4));
        assert_eq!(sequencer.order(&stops), vec![0, 1, 2]);
        assert_eq!(RouteSequencer::default().order(&stops), vec![0, 2, 1]);
    }

    #[test]
    fn test_nan_stop_not_dropped() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "Depot"),
            GeoStop::new(f64::NAN, 0.0, "Broken"),
            GeoStop::new(1.0, 1.0, "Near"),
            GeoStop::new(2.0, 2.0, "Next"),
        ];
        let out = optimize_route(&stops);
        assert_eq!(names(&out), ["Depot", "Near", "Next", "Broken"]);
    }

    #[test]
    fn test_nan_depot_keeps_input_order() {
        let stops = vec![
            GeoStop::new(f64::NAN, f64::NAN, "Depot"),
            GeoStop::new(5.0, 5.0, "A"),
            GeoStop::new(1.0, 1.0, "B"),
        ];
        // Every distance from the depot is NaN, so the first remaining is
        // taken; from A the scan is finite again.
        assert_eq!(names(&optimize_route(&stops)), ["Depot", "A", "B"]);
    }

    #[test]
    fn test_try_run_rejects_nan() {
        let stops = vec![
            GeoStop::new(0.0, 0.0, "Depot"),
            GeoStop::new(f64::NAN, 1.0, "Bad"),
            GeoStop::new(1.0, 1.0, "Ok"),
        ];
        let err = RouteSequencer::default().try_run(&stops).unwrap_err();
        assert!(matches!(err, RouteError::NonFinite { index: 1, .. }));
    }

    #[test]
    fn test_try_run_rejects_out_of_range() {
        let stops = vec![(0.0, 0.0), (0.0, 181.0), (1.0, 1.0)];
        let err = RouteSequencer::default().try_run(&stops).unwrap_err();
        assert!(matches!(err, RouteError::OutOfRange { index: 1, .. }));

        let stops = vec![(-90.5, 0.0)];
        assert!(validate_stops(&stops).is_err());
    }

    #[test]
    fn test_try_run_ok() {
        let stops = vec![(0.0, 0.0), (10.0, 10.0), (1.0, 1.0)];
        let result = RouteSequencer::default().try_run(&stops).unwrap();
        assert_eq!(result.order, vec![0, 2, 1]);
    }

    #[test]
    fn test_try_new_rejects_invalid() {
        let config = RouteConfig::default().with_earth_radius_km(-5.0);
        assert!(matches!(
            RouteSequencer::try_new(config),
            Err(FleetError::Config(_))
        ));
    }

    #[test]
    fn test_closer_prefers_finite_then_shorter_then_earlier() {
        let nan = Candidate { pos: 0, dist: f64::NAN };
        let far = Candidate { pos: 1, dist: 9.0 };
        let near = Candidate { pos: 2, dist: 1.0 };
        let near_late = Candidate { pos: 3, dist: 1.0 };
        assert_eq!(closer(nan, far).pos, 1);
        assert_eq!(closer(far, nan).pos, 1);
        assert_eq!(closer(far, near).pos, 2);
        assert_eq!(closer(near_late, near).pos, 2);
        assert_eq!(closer(nan, Candidate { pos: 5, dist: f64::NAN }).pos, 0);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let stops: Vec<(f64, f64)> = (0..40)
            .map(|i| {
                let t = i as f64;
                ((t * 7.3) % 20.0 - 10.0, (t * 3.1) % 30.0 - 15.0)
            })
            .collect();
        let seq = RouteSequencer::default().order(&stops);
        let par = RouteSequencer::new(RouteConfig::default().with_parallel(true)).order(&stops);
        assert_eq!(seq, par);
    }
}
