//! Position calculator.
//!
//! For each of the ten bodies: ecliptic longitude, zodiac sign, equatorial
//! coordinates, geocentric distance, and retrograde status. Any provider
//! failure aborts the whole computation naming the failing body — no
//! placeholder positions.

use crate::angles::wrap_motion;
use crate::ephemeris::{ecliptic_longitude, EphemerisProvider, Observer};
use crate::error::{ChartError, Result};
use crate::models::{Body, BodyPosition, Diagnostic, JulianDate, ZodiacSign};

/// Position of every body, houses unassigned (`house == 0` placeholder is
/// never exposed; assignment happens in the chart pipeline before the
/// result is built).
#[derive(Debug)]
pub(crate) struct RawPositions {
    pub positions: Vec<BodyPosition>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Ecliptic longitude of one body at one instant.
fn longitude_of(
    provider: &dyn EphemerisProvider,
    body: Body,
    jd: JulianDate,
) -> Result<f64> {
    let result = match body {
        // Direct solar-longitude call for the Sun; vector conversion for
        // everything else.
        Body::Sun => provider.solar_longitude(jd),
        other => provider
            .geocentric_vector(other, jd)
            .map(|v| ecliptic_longitude(&v)),
    };
    result.map_err(|e| ChartError::Ephemeris {
        body,
        message: e.message,
    })
}

/// Longitude and geocentric distance at the chart instant.
fn longitude_and_distance(
    provider: &dyn EphemerisProvider,
    body: Body,
    jd: JulianDate,
) -> Result<(f64, f64)> {
    match body {
        // The Sun's longitude comes from the direct solar call; its
        // distance is fixed at 1 AU.
        Body::Sun => Ok((longitude_of(provider, body, jd)?, 1.0)),
        other => {
            let vector = provider
                .geocentric_vector(other, jd)
                .map_err(|e| ChartError::Ephemeris {
                    body,
                    message: e.message,
                })?;
            Ok((ecliptic_longitude(&vector), vector.magnitude()))
        }
    }
}

/// Compute the full position record for one body.
pub(crate) fn body_position(
    provider: &dyn EphemerisProvider,
    body: Body,
    jd: JulianDate,
    observer: &Observer,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<BodyPosition> {
    let (longitude, distance) = longitude_and_distance(provider, body, jd)?;

    let equatorial =
        provider
            .equatorial(body, jd, observer)
            .map_err(|e| ChartError::Ephemeris {
                body,
                message: e.message,
            })?;

    if !(0.0..24.0).contains(&equatorial.right_ascension)
        || !(-90.0..=90.0).contains(&equatorial.declination)
    {
        log::warn!(
            "equatorial coordinates out of range for {}: ra={} dec={}",
            body,
            equatorial.right_ascension,
            equatorial.declination
        );
        diagnostics.push(Diagnostic::EquatorialRange {
            body,
            right_ascension: equatorial.right_ascension,
            declination: equatorial.declination,
        });
    }

    let retrograde = if body.is_luminary() {
        // Sun and Moon are direct by convention; the motion test is never
        // applied to them.
        false
    } else {
        let before = longitude_of(provider, body, jd.add_days(-1.0))?;
        let after = longitude_of(provider, body, jd.add_days(1.0))?;
        wrap_motion(after - before) < 0.0
    };

    Ok(BodyPosition {
        body,
        longitude,
        sign: ZodiacSign::from_longitude(longitude),
        house: 0,
        retrograde,
        right_ascension: equatorial.right_ascension,
        declination: equatorial.declination,
        distance,
    })
}

/// Compute positions for all ten bodies, fail-fast.
pub(crate) fn compute_positions(
    provider: &dyn EphemerisProvider,
    jd: JulianDate,
    observer: &Observer,
) -> Result<RawPositions> {
    let mut diagnostics = Vec::new();
    let mut positions = Vec::with_capacity(10);
    for &body in Body::all() {
        positions.push(body_position(provider, body, jd, observer, &mut diagnostics)?);
    }
    Ok(RawPositions {
        positions,
        diagnostics,
    })
}
