//! Core trait and value types for route sequencing.

/// A point on the globe a route must visit.
///
/// Implement this for any caller type; the sequencer reorders values of
/// that type as-is, so extra fields ride along untouched.
///
/// # Examples
///
/// ```
/// use fleetwise::routing::Waypoint;
///
/// #[derive(Clone)]
/// struct Delivery {
///     lat: f64,
///     lng: f64,
///     parcel: u32,
/// }
///
/// impl Waypoint for Delivery {
///     fn lat(&self) -> f64 { self.lat }
///     fn lng(&self) -> f64 { self.lng }
/// }
/// ```
pub trait Waypoint: Send + Sync {
    /// Latitude in degrees.
    fn lat(&self) -> f64;

    /// Longitude in degrees.
    fn lng(&self) -> f64;
}

impl Waypoint for (f64, f64) {
    fn lat(&self) -> f64 {
        self.0
    }

    fn lng(&self) -> f64 {
        self.1
    }
}

impl<W: Waypoint> Waypoint for &W {
    fn lat(&self) -> f64 {
        (**self).lat()
    }

    fn lng(&self) -> f64 {
        (**self).lng()
    }
}

/// A named stop, typically from geocoding or a map click.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoStop {
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::lenient::nan",
            deserialize_with = "crate::lenient::coordinate"
        )
    )]
    pub lat: f64,
    #[cfg_attr(
        feature = "serde",
        serde(
            default = "crate::lenient::nan",
            deserialize_with = "crate::lenient::coordinate"
        )
    )]
    pub lng: f64,
    #[cfg_attr(
        feature = "serde",
        serde(default, deserialize_with = "crate::lenient::null_as_default")
    )]
    pub name: String,
}

impl GeoStop {
    pub fn new(lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            lat,
            lng,
            name: name.into(),
        }
    }
}

impl Waypoint for GeoStop {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}
