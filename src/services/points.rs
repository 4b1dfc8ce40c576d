//! Derived chart points.
//!
//! Optional post-pass computing non-body points from a finished chart:
//! the mean lunar nodes, Black Moon Lilith (the mean lunar apogee),
//! Chiron, and the Part of Fortune. They are kept apart from the ten
//! fixed bodies so the chart invariants (exactly ten body positions)
//! hold.

use serde::{Deserialize, Serialize};

use crate::angles::normalize_degrees;
use crate::ephemeris::analytic::solve_kepler;
use crate::error::{ChartError, Result};
use crate::models::{Body, ChartResult, JulianDate, ZodiacSign};

use super::houses::assign_house;

/// Identifier of a derived point.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartPoint {
    NorthNode,
    SouthNode,
    Lilith,
    Chiron,
    PartOfFortune,
}

/// A derived (non-body) chart point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPoint {
    pub point: ChartPoint,
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// House number 1–12.
    pub house: u8,
    /// Nodes are flagged retrograde by convention, Chiron near aphelion;
    /// Lilith and the Part of Fortune never are.
    pub retrograde: bool,
}

/// Orbital elements of 2060 Chiron at the J2000.0 epoch.
const CHIRON_SEMI_MAJOR: f64 = 13.705_353_0;
const CHIRON_ECCENTRICITY: f64 = 0.383_164_9;
const CHIRON_INCLINATION: f64 = 6.935_24;
const CHIRON_MEAN_ANOMALY_EPOCH: f64 = 359.461_70;
const CHIRON_NODE: f64 = 208.657_35;
const CHIRON_PERIHELION: f64 = 339.580_61;
const CHIRON_PERIOD_YEARS: f64 = 50.39;

/// Mean longitude of the ascending lunar node, degrees.
fn mean_node_longitude(jd: JulianDate) -> f64 {
    let t = jd.centuries_since_j2000();
    normalize_degrees(
        125.044_547_9 - 1_934.136_289_1 * t + 0.002_075_4 * t * t + t * t * t / 467_441.0
            - t * t * t * t / 60_616_000.0,
    )
}

/// Mean longitude of the lunar apogee (Black Moon Lilith), degrees.
fn mean_apogee_longitude(jd: JulianDate) -> f64 {
    let t = jd.centuries_since_j2000();
    normalize_degrees(
        83.353_246_5 + 4_069.013_728_7 * t - 0.010_320_0 * t * t - t * t * t / 80_053.0
            + t * t * t * t / 18_999_000.0,
    )
}

/// Chiron ecliptic longitude (degrees) and retrograde flag from its J2000
/// orbital elements.
///
/// Single-body Kepler propagation: mean anomaly advances at the mean
/// motion, eccentric anomaly by Newton iteration, longitude from the
/// argument of latitude projected through the orbital inclination. The
/// retrograde flag is a coarse aphelion heuristic rather than a daily
/// motion test.
fn chiron_position(jd: JulianDate) -> (f64, bool) {
    let years = jd.days_since_j2000() / 365.25;
    let mean_anomaly = normalize_degrees(
        CHIRON_MEAN_ANOMALY_EPOCH + 360.0 / CHIRON_PERIOD_YEARS * years,
    )
    .to_radians();

    let e = CHIRON_ECCENTRICITY;
    let eccentric_anomaly = solve_kepler(mean_anomaly, e);
    let true_anomaly = 2.0
        * ((1.0 + e).sqrt() * (eccentric_anomaly / 2.0).sin())
            .atan2((1.0 - e).sqrt() * (eccentric_anomaly / 2.0).cos());

    let arg_perihelion = (CHIRON_PERIHELION - CHIRON_NODE).to_radians();
    let incl = CHIRON_INCLINATION.to_radians();
    let arg_latitude = true_anomaly + arg_perihelion;
    let longitude = normalize_degrees(
        (arg_latitude.sin() * incl.cos())
            .atan2(arg_latitude.cos())
            .to_degrees()
            + CHIRON_NODE,
    );

    // Moving slower than the mean motion near aphelion reads as retrograde.
    let distance = CHIRON_SEMI_MAJOR * (1.0 - e * eccentric_anomaly.cos());
    let retrograde = distance > CHIRON_SEMI_MAJOR * 1.2;

    (longitude, retrograde)
}

/// Compute the mean lunar nodes, Lilith, Chiron, and the Part of Fortune
/// for a chart.
///
/// `jd` must be the same instant the chart was computed for; the chart
/// supplies Sun, Moon, Ascendant, and the cusps for house assignment.
pub fn derive_points(chart: &ChartResult, jd: JulianDate) -> Result<Vec<DerivedPoint>> {
    let cusps = cusp_array(chart)?;

    let north = mean_node_longitude(jd);
    let south = normalize_degrees(north + 180.0);
    let lilith = mean_apogee_longitude(jd);
    let (chiron, chiron_retrograde) = chiron_position(jd);

    let sun = chart.body(Body::Sun).ok_or_else(|| {
        ChartError::invalid_input("chart result is missing the Sun position")
    })?;
    let moon = chart.body(Body::Moon).ok_or_else(|| {
        ChartError::invalid_input("chart result is missing the Moon position")
    })?;

    // Sun in houses 7–12 sits above the horizon: a day birth.
    let day_birth = (7..=12).contains(&sun.house);
    let fortune = if day_birth {
        normalize_degrees(chart.ascendant + moon.longitude - sun.longitude)
    } else {
        normalize_degrees(chart.ascendant + sun.longitude - moon.longitude)
    };

    let make = |point, longitude: f64, retrograde| DerivedPoint {
        point,
        longitude,
        sign: ZodiacSign::from_longitude(longitude),
        house: assign_house(longitude, &cusps).0,
        retrograde,
    };

    Ok(vec![
        make(ChartPoint::NorthNode, north, true),
        make(ChartPoint::SouthNode, south, true),
        make(ChartPoint::Lilith, lilith, false),
        make(ChartPoint::Chiron, chiron, chiron_retrograde),
        make(ChartPoint::PartOfFortune, fortune, false),
    ])
}

fn cusp_array(chart: &ChartResult) -> Result<[f64; 12]> {
    if chart.houses.len() != 12 {
        return Err(ChartError::invalid_input(format!(
            "chart result has {} houses, expected 12",
            chart.houses.len()
        )));
    }
    let mut cusps = [0.0_f64; 12];
    for (i, house) in chart.houses.iter().enumerate() {
        cusps[i] = house.cusp;
    }
    Ok(cusps)
}
