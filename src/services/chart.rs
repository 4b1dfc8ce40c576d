//! Chart pipeline.
//!
//! Composes the position calculator, house system calculator, house
//! assignment, and aspect detector into one aggregate result. The pipeline
//! is pure and synchronous: positions and houses are mutually independent
//! stages, aspect detection and house assignment run once both are in.

use crate::api::ChartRequest;
use crate::ephemeris::{EphemerisProvider, Observer};
use crate::error::{ChartError, Result};
use crate::models::{Body, ChartResult, Diagnostic, JulianDate};

use super::aspects::detect_aspects;
use super::houses::{assign_house, compute_houses, cusp_records};
use super::positions::compute_positions;

/// The chart computation engine.
///
/// Construction resolves all ten bodies against the provider's capability
/// set once, so per-call dispatch never guesses about missing mappings.
/// The engine holds no mutable state; one instance may serve concurrent
/// requests.
#[derive(Debug)]
pub struct ChartEngine<P: EphemerisProvider> {
    provider: P,
}

impl<P: EphemerisProvider> ChartEngine<P> {
    /// Create an engine over the given provider.
    ///
    /// Fails with [`ChartError::UnsupportedBody`] if the provider cannot
    /// produce positions for any of the ten chart bodies.
    pub fn new(provider: P) -> Result<Self> {
        for &body in Body::all() {
            if !provider.supports(body) {
                return Err(ChartError::UnsupportedBody { body });
            }
        }
        Ok(Self { provider })
    }

    /// Compute a natal chart.
    ///
    /// Fails fast on invalid input or any ephemeris failure; never returns
    /// a partial chart. Degenerate house geometry is recovered by clamping
    /// and reported in [`ChartResult::diagnostics`].
    pub fn compute(&self, request: &ChartRequest) -> Result<ChartResult> {
        validate_request(request)?;

        let jd = JulianDate::from_datetime(request.instant);
        let observer = Observer {
            latitude: request.latitude,
            longitude: request.longitude,
        };

        // Positions and houses are independent; either could run first (or
        // concurrently, from the caller's side).
        let raw = compute_positions(&self.provider, jd, &observer)?;
        let frame = compute_houses(&self.provider, jd, &observer)?;

        let mut diagnostics = raw.diagnostics;
        diagnostics.extend(frame.diagnostics.iter().cloned());

        let mut bodies = raw.positions;
        for position in &mut bodies {
            let (house, fallback) = assign_house(position.longitude, &frame.cusps);
            position.house = house;
            if fallback {
                log::warn!(
                    "no cusp interval matched {} at {:.3}°, defaulting to house 1",
                    position.body,
                    position.longitude
                );
                diagnostics.push(Diagnostic::HouseFallback {
                    body: position.body,
                });
            }
        }

        let aspects = detect_aspects(&bodies);

        Ok(ChartResult {
            bodies,
            houses: cusp_records(&frame.cusps),
            aspects,
            ascendant: frame.ascendant,
            midheaven: frame.midheaven,
            diagnostics,
        })
    }

    /// The underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}

fn validate_request(request: &ChartRequest) -> Result<()> {
    if !request.latitude.is_finite() || !(-90.0..=90.0).contains(&request.latitude) {
        return Err(ChartError::invalid_input(format!(
            "latitude {} out of range [-90, 90]",
            request.latitude
        )));
    }
    if !request.longitude.is_finite() || !(-180.0..=180.0).contains(&request.longitude) {
        return Err(ChartError::invalid_input(format!(
            "longitude {} out of range [-180, 180]",
            request.longitude
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ephemeris::AnalyticEphemeris;
    use chrono::{TimeZone, Utc};

    fn request(lat: f64, lon: f64) -> ChartRequest {
        ChartRequest {
            instant: Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn test_latitude_out_of_range_rejected() {
        let engine = ChartEngine::new(AnalyticEphemeris).unwrap();
        let err = engine.compute(&request(95.0, 0.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput { .. }));
    }

    #[test]
    fn test_longitude_out_of_range_rejected() {
        let engine = ChartEngine::new(AnalyticEphemeris).unwrap();
        let err = engine.compute(&request(0.0, -181.0)).unwrap_err();
        assert!(matches!(err, ChartError::InvalidInput { .. }));
    }

    #[test]
    fn test_non_finite_coordinates_rejected() {
        let engine = ChartEngine::new(AnalyticEphemeris).unwrap();
        assert!(engine.compute(&request(f64::NAN, 0.0)).is_err());
        assert!(engine.compute(&request(0.0, f64::INFINITY)).is_err());
    }

    #[test]
    fn test_boundary_coordinates_accepted() {
        let engine = ChartEngine::new(AnalyticEphemeris).unwrap();
        assert!(engine.compute(&request(90.0, 180.0)).is_ok());
        assert!(engine.compute(&request(-90.0, -180.0)).is_ok());
    }

    #[test]
    fn test_unsupported_body_rejected_at_construction() {
        #[derive(Debug)]
        struct NoPluto;
        impl EphemerisProvider for NoPluto {
            fn solar_longitude(
                &self,
                _jd: JulianDate,
            ) -> crate::ephemeris::EphemerisResult<f64> {
                Ok(0.0)
            }
            fn geocentric_vector(
                &self,
                _body: Body,
                _jd: JulianDate,
            ) -> crate::ephemeris::EphemerisResult<crate::ephemeris::EclipticVector> {
                Ok(crate::ephemeris::EclipticVector::new(1.0, 0.0, 0.0))
            }
            fn equatorial(
                &self,
                _body: Body,
                _jd: JulianDate,
                _observer: &Observer,
            ) -> crate::ephemeris::EphemerisResult<crate::ephemeris::EquatorialCoordinates>
            {
                Ok(crate::ephemeris::EquatorialCoordinates {
                    right_ascension: 0.0,
                    declination: 0.0,
                })
            }
            fn sidereal_time(
                &self,
                _jd: JulianDate,
            ) -> crate::ephemeris::EphemerisResult<f64> {
                Ok(0.0)
            }
            fn supports(&self, body: Body) -> bool {
                body != Body::Pluto
            }
        }

        let err = ChartEngine::new(NoPluto).unwrap_err();
        assert!(matches!(
            err,
            ChartError::UnsupportedBody { body: Body::Pluto }
        ));
    }
}
