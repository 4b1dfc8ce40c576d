//! Celestial bodies and zodiac signs.
//!
//! Both sets are closed: exactly ten bodies feed a natal chart and the
//! zodiac is a fixed 12-element, 30°-wide partition of the ecliptic
//! starting at 0° Aries. Modeling them as enums resolves every dispatch at
//! compile time instead of guessing at string keys.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::angles::normalize_degrees;

/// One of the ten celestial bodies of a natal chart.
///
/// Serialized as the lowercase external identifier (`"sun"`, `"moon"`, …).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

/// The ten chart bodies in canonical order.
pub const BODIES: [Body; 10] = [
    Body::Sun,
    Body::Moon,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Uranus,
    Body::Neptune,
    Body::Pluto,
];

impl Body {
    /// All ten bodies in canonical chart order.
    pub fn all() -> &'static [Body; 10] {
        &BODIES
    }

    /// External lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    /// The Sun and Moon are treated as always direct: the retrograde test
    /// is never applied to them.
    pub fn is_luminary(&self) -> bool {
        matches!(self, Body::Sun | Body::Moon)
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the twelve zodiac signs.
///
/// Serialized as the lowercase external identifier (`"aries"`, …).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

/// The twelve signs in ecliptic order, 30° each from 0° Aries.
pub const SIGNS: [ZodiacSign; 12] = [
    ZodiacSign::Aries,
    ZodiacSign::Taurus,
    ZodiacSign::Gemini,
    ZodiacSign::Cancer,
    ZodiacSign::Leo,
    ZodiacSign::Virgo,
    ZodiacSign::Libra,
    ZodiacSign::Scorpio,
    ZodiacSign::Sagittarius,
    ZodiacSign::Capricorn,
    ZodiacSign::Aquarius,
    ZodiacSign::Pisces,
];

impl ZodiacSign {
    /// Sign containing the given ecliptic longitude.
    ///
    /// The longitude is normalized into [0, 360) first, so any finite
    /// value maps to a sign.
    pub fn from_longitude(longitude: f64) -> ZodiacSign {
        let normalized = normalize_degrees(longitude);
        let index = (normalized / 30.0).floor() as usize % 12;
        SIGNS[index]
    }

    /// External lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    /// Display name with a leading capital, e.g. `"Libra"`.
    pub fn title(&self) -> &'static str {
        match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Format a longitude as degree-in-sign, e.g. `"17.3° Libra"`.
pub fn format_degree(longitude: f64) -> String {
    let normalized = normalize_degrees(longitude);
    let sign = ZodiacSign::from_longitude(normalized);
    let degree_in_sign = normalized % 30.0;
    format!("{:.1}° {}", degree_in_sign, sign.title())
}
