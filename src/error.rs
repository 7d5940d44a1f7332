//! Error types for the validating entry points.
//!
//! The default scoring and routing calls never fail. These errors only
//! surface from `try_*` constructors and the opt-in coordinate check.

use thiserror::Error;

/// Errors raised while sequencing a route with validation enabled.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A coordinate is NaN or infinite.
    #[error("stop {index} has a non-finite coordinate (lat={lat}, lng={lng})")]
    NonFinite { index: usize, lat: f64, lng: f64 },

    /// Latitude outside [-90, 90] or longitude outside [-180, 180].
    #[error("stop {index} is out of range (lat={lat}, lng={lng})")]
    OutOfRange { index: usize, lat: f64, lng: f64 },
}

/// Crate-level error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FleetError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Route(#[from] RouteError),
}
