//! Ephemeris provider seam.
//!
//! The calculation engine never computes raw celestial mechanics itself; it
//! asks an [`EphemerisProvider`] for solar longitude, geocentric vectors,
//! equatorial coordinates, and sidereal time. The provider is assumed pure
//! and reentrant: no internal state is mutated by calls, so a single
//! provider may serve concurrent chart computations.
//!
//! The crate ships [`AnalyticEphemeris`], an arcminute-class analytic
//! implementation. Callers with access to a higher-fidelity ephemeris can
//! implement the trait themselves.

pub mod analytic;

pub use analytic::AnalyticEphemeris;

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::models::{Body, JulianDate};

/// Result type for provider calls.
pub type EphemerisResult<T> = std::result::Result<T, EphemerisError>;

/// A provider-level failure for a single query.
///
/// Carries no body context: the engine attaches the failing body when it
/// promotes this into [`crate::error::ChartError::Ephemeris`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct EphemerisError {
    pub message: String,
}

impl EphemerisError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Observer location on Earth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Observer {
    /// Geographic latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Geographic longitude in degrees, [-180, 180], east positive.
    pub longitude: f64,
}

/// Geocentric ecliptic Cartesian vector, in astronomical units.
///
/// +x toward 0° Aries, +y toward 90° ecliptic longitude, +z toward the
/// north ecliptic pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticVector {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EclipticVector {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Vector magnitude (geocentric distance, AU).
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Equatorial coordinates relative to an observer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinates {
    /// Right ascension in hours, [0, 24).
    pub right_ascension: f64,
    /// Declination in degrees, [-90, 90].
    pub declination: f64,
}

/// Ecliptic longitude of a geocentric vector, degrees in [0, 360).
pub fn ecliptic_longitude(vector: &EclipticVector) -> f64 {
    normalize_degrees(vector.y.atan2(vector.x).to_degrees())
}

/// Source of astronomical positions for chart computation.
///
/// Implementations must be pure functions of their arguments: the engine's
/// determinism guarantee depends on it.
pub trait EphemerisProvider: Send + Sync {
    /// Geocentric apparent solar longitude in degrees, [0, 360).
    fn solar_longitude(&self, jd: JulianDate) -> EphemerisResult<f64>;

    /// Geocentric ecliptic Cartesian vector for a body, in AU.
    fn geocentric_vector(&self, body: Body, jd: JulianDate) -> EphemerisResult<EclipticVector>;

    /// Equatorial coordinates of a body for the given observer.
    fn equatorial(
        &self,
        body: Body,
        jd: JulianDate,
        observer: &Observer,
    ) -> EphemerisResult<EquatorialCoordinates>;

    /// Greenwich sidereal time in hours, [0, 24).
    fn sidereal_time(&self, jd: JulianDate) -> EphemerisResult<f64>;

    /// Whether this provider can produce positions for the given body.
    ///
    /// The engine resolves all ten chart bodies against this once at
    /// construction, so per-call dispatch never guesses about missing
    /// mappings.
    fn supports(&self, body: Body) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ecliptic_longitude_quadrants() {
        let east = EclipticVector::new(1.0, 0.0, 0.0);
        assert!(ecliptic_longitude(&east).abs() < 1e-12);

        let north = EclipticVector::new(0.0, 1.0, 0.0);
        assert!((ecliptic_longitude(&north) - 90.0).abs() < 1e-12);

        let west = EclipticVector::new(-1.0, 0.0, 0.0);
        assert!((ecliptic_longitude(&west) - 180.0).abs() < 1e-12);

        let south = EclipticVector::new(0.0, -1.0, 0.0);
        assert!((ecliptic_longitude(&south) - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_magnitude() {
        let v = EclipticVector::new(3.0, 4.0, 0.0);
        assert!((v.magnitude() - 5.0).abs() < 1e-12);
    }
}
