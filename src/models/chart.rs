//! Chart result types.
//!
//! A [`ChartResult`] is computed fresh per request and never mutated. All
//! types serialize to JSON for the rendering, interpretation, and
//! numerology layers downstream.

use serde::{Deserialize, Serialize};

use super::aspects::AspectKind;
use super::bodies::{Body, ZodiacSign};

/// Position of one celestial body at the chart instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyPosition {
    pub body: Body,
    /// Ecliptic longitude in degrees, [0, 360).
    pub longitude: f64,
    /// Zodiac sign containing `longitude`.
    pub sign: ZodiacSign,
    /// House number 1–12.
    pub house: u8,
    /// Apparent backward motion. Always `false` for Sun and Moon.
    pub retrograde: bool,
    /// Right ascension in hours, [0, 24).
    pub right_ascension: f64,
    /// Declination in degrees, [-90, 90].
    pub declination: f64,
    /// Geocentric distance in astronomical units. Fixed at 1.0 for the Sun.
    pub distance: f64,
}

/// One house cusp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseCusp {
    /// House number 1–12.
    pub number: u8,
    /// Cusp longitude in degrees, [0, 360).
    pub cusp: f64,
    /// Zodiac sign containing the cusp.
    pub sign: ZodiacSign,
}

/// A recognized angular relationship between two distinct bodies.
///
/// The pair is unordered: classification and orb do not depend on which
/// body is `body_a`. Bodies are stored in canonical chart order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub kind: AspectKind,
    /// Raw shortest-arc separation in degrees, [0, 180].
    pub angle: f64,
    /// Deviation from the aspect's exact angle.
    pub orb: f64,
    /// Whether the separation is closing. Approximated as
    /// `longitude_a < longitude_b`; does not account for relative angular
    /// velocity.
    pub applying: bool,
}

/// Non-fatal condition noticed during computation.
///
/// Diagnostics replace silent console logging: callers can assert on them
/// in tests and surface them in UIs. Fatal conditions use
/// [`crate::error::ChartError`] instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A house arc fell under the 15° floor before clamping. The cusp was
    /// widened; `width` is the arc as originally constructed.
    NarrowHouse { house: u8, width: f64 },
    /// Cusps failed the strictly-increasing cyclic check after
    /// construction and were repaired.
    CuspOrderRepaired { house: u8 },
    /// No cusp interval matched a body longitude; house 1 was assigned.
    HouseFallback { body: Body },
    /// The provider returned equatorial coordinates outside their
    /// documented ranges.
    EquatorialRange {
        body: Body,
        right_ascension: f64,
        declination: f64,
    },
}

/// Complete natal chart: the aggregate of all five calculation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    /// Exactly ten entries, in canonical body order.
    pub bodies: Vec<BodyPosition>,
    /// Exactly twelve cusps in strictly increasing cyclic order.
    pub houses: Vec<HouseCusp>,
    /// At most one aspect per unordered body pair (≤ 45).
    pub aspects: Vec<Aspect>,
    /// Ascendant longitude in degrees, [0, 360). Cusp of house 1.
    pub ascendant: f64,
    /// Midheaven longitude in degrees, [0, 360). Cusp of house 10.
    pub midheaven: f64,
    /// Non-fatal warnings accumulated during computation.
    pub diagnostics: Vec<Diagnostic>,
}

impl ChartResult {
    /// Position of a specific body.
    pub fn body(&self, body: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|p| p.body == body)
    }

    /// Aspect between two bodies, regardless of pair order.
    pub fn aspect_between(&self, a: Body, b: Body) -> Option<&Aspect> {
        self.aspects.iter().find(|asp| {
            (asp.body_a == a && asp.body_b == b) || (asp.body_a == b && asp.body_b == a)
        })
    }
}
