//! Great-circle distance on a spherical Earth.

use super::types::Waypoint;
use std::f64::consts::PI;

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two points given in degrees.
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_with_radius(lat1, lng1, lat2, lng2, EARTH_RADIUS_KM)
}

/// Haversine distance on a sphere of radius `radius`.
///
/// `a = sin²(Δlat/2) + cos(lat1)·cos(lat2)·sin²(Δlng/2)`,
/// `d = 2·R·atan2(√a, √(1−a))`.
pub fn haversine_with_radius(lat1: f64, lng1: f64, lat2: f64, lng2: f64, radius: f64) -> f64 {
    let to_rad = PI / 180.0;
    let d_lat = (lat2 - lat1) * to_rad;
    let d_lng = (lng2 - lng1) * to_rad;
    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + (lat1 * to_rad).cos()
            * (lat2 * to_rad).cos()
            * (d_lng / 2.0).sin()
            * (d_lng / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    radius * c
}

/// Haversine distance in kilometres between two waypoints.
pub fn distance_km<A: Waypoint, B: Waypoint>(a: &A, b: &B) -> f64 {
    haversine_km(a.lat(), a.lng(), b.lat(), b.lng())
}

/// Total length of the path visiting `stops` in order.
///
/// Zero for fewer than two stops.
pub fn route_length_km<S: Waypoint>(stops: &[S]) -> f64 {
    stops.windows(2).map(|w| distance_km(&w[0], &w[1])).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_points_zero() {
        assert_eq!(haversine_km(-23.55, -46.63, -23.55, -46.63), 0.0);
        assert_eq!(haversine_km(0.0, 0.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_symmetric() {
        let d1 = haversine_km(-23.5505, -46.6333, -22.9068, -43.1729);
        let d2 = haversine_km(-22.9068, -43.1729, -23.5505, -46.6333);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_one_degree_on_equator() {
        // 2πR / 360
        let expected = 2.0 * PI * EARTH_RADIUS_KM / 360.0;
        let d = haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((d - expected).abs() < 1e-9, "got {d}");
    }

    #[test]
    fn test_antipodal() {
        let d = haversine_km(0.0, 0.0, 0.0, 180.0);
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6, "got {d}");
    }

    #[test]
    fn test_sao_paulo_rio() {
        // ~361 km between the two city centres.
        let d = haversine_km(-23.5505, -46.6333, -22.9068, -43.1729);
        assert!((d - 360.7).abs() < 1.0, "got {d}");
    }

    #[test]
    fn test_custom_radius_scales() {
        let d = haversine_with_radius(0.0, 0.0, 0.0, 1.0, 1.0);
        assert!((d - PI / 180.0).abs() < 1e-12);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(haversine_km(f64::NAN, 0.0, 1.0, 1.0).is_nan());
    }

    #[test]
    fn test_distance_km_waypoints() {
        let a = (0.0, 0.0);
        let b = (0.0, 1.0);
        assert_eq!(distance_km(&a, &b), haversine_km(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_route_length() {
        let stops = [(0.0, 0.0), (0.0, 1.0), (0.0, 2.0)];
        let expected = 2.0 * haversine_km(0.0, 0.0, 0.0, 1.0);
        assert!((route_length_km(&stops) - expected).abs() < 1e-9);
        assert_eq!(route_length_km(&stops[..1]), 0.0);
        assert_eq!(route_length_km::<(f64, f64)>(&[]), 0.0);
    }
}
