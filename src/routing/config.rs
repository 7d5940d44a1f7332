//! Route sequencer configuration.

use super::geo::EARTH_RADIUS_KM;

/// Configuration for the nearest-neighbor route sequencer.
///
/// # Examples
///
/// ```
/// use fleetwise::routing::RouteConfig;
///
/// let config = RouteConfig::default()
///     .with_min_stops(4)
///     .with_parallel(false);
/// assert_eq!(config.min_stops, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Sphere radius used for every distance, in kilometres.
    pub earth_radius_km: f64,

    /// Inputs shorter than this are returned in their original order.
    pub min_stops: usize,

    /// Scan the remaining pool with rayon. Only has an effect with the
    /// `parallel` feature; picks are identical either way.
    pub parallel: bool,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            earth_radius_km: EARTH_RADIUS_KM,
            min_stops: 3,
            parallel: false,
        }
    }
}

impl RouteConfig {
    /// Sets the sphere radius in kilometres.
    pub fn with_earth_radius_km(mut self, radius: f64) -> Self {
        self.earth_radius_km = radius;
        self
    }

    /// Sets the minimum input length that gets reordered.
    pub fn with_min_stops(mut self, n: usize) -> Self {
        self.min_stops = n;
        self
    }

    /// Enables or disables the parallel nearest-stop scan.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if !self.earth_radius_km.is_finite() || self.earth_radius_km <= 0.0 {
            return Err("earth_radius_km must be positive and finite".into());
        }
        if self.min_stops == 0 {
            return Err("min_stops must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RouteConfig::default();
        assert!((config.earth_radius_km - 6371.0).abs() < 1e-10);
        assert_eq!(config.min_stops, 3);
        assert!(!config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = RouteConfig::default()
            .with_earth_radius_km(6378.137)
            .with_min_stops(2)
            .with_parallel(true);
        assert!((config.earth_radius_km - 6378.137).abs() < 1e-10);
        assert_eq!(config.min_stops, 2);
        assert!(config.parallel);
    }

    #[test]
    fn test_validate_bad_radius() {
        assert!(RouteConfig::default()
            .with_earth_radius_km(0.0)
            .validate()
            .is_err());
        assert!(RouteConfig::default()
            .with_earth_radius_km(f64::NAN)
            .validate()
            .is_err());
        assert!(RouteConfig::default()
            .with_earth_radius_km(-1.0)
            .validate()
            .is_err());
    }

    #[test]
    fn test_validate_zero_min_stops() {
        assert!(RouteConfig::default().with_min_stops(0).validate().is_err());
    }
}
