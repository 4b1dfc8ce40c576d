//! Aspect kinds and the fixed aspect table.
//!
//! The table is immutable configuration: six recognized aspects, checked in
//! priority order, so a body pair is assigned at most one aspect.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six recognized aspect types.
///
/// Serialized as the lowercase external identifier (`"conjunction"`, …).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectKind {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
    Quincunx,
}

impl AspectKind {
    /// External lowercase identifier.
    pub fn name(&self) -> &'static str {
        match self {
            AspectKind::Conjunction => "conjunction",
            AspectKind::Sextile => "sextile",
            AspectKind::Square => "square",
            AspectKind::Trine => "trine",
            AspectKind::Opposition => "opposition",
            AspectKind::Quincunx => "quincunx",
        }
    }
}

impl fmt::Display for AspectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Exact angle and orb allowance for one aspect type.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AspectSpec {
    pub kind: AspectKind,
    /// Exact separation in degrees.
    pub angle: f64,
    /// Maximum deviation from the exact angle for the aspect to count.
    pub orb: f64,
}

/// The fixed aspect table, in matching priority order: first match wins.
///
/// Note the quincunx sits last with a deliberately tight 3° orb even though
/// its 150° angle lies between trine and opposition.
pub const ASPECT_TABLE: [AspectSpec; 6] = [
    AspectSpec {
        kind: AspectKind::Conjunction,
        angle: 0.0,
        orb: 8.0,
    },
    AspectSpec {
        kind: AspectKind::Sextile,
        angle: 60.0,
        orb: 6.0,
    },
    AspectSpec {
        kind: AspectKind::Square,
        angle: 90.0,
        orb: 8.0,
    },
    AspectSpec {
        kind: AspectKind::Trine,
        angle: 120.0,
        orb: 8.0,
    },
    AspectSpec {
        kind: AspectKind::Opposition,
        angle: 180.0,
        orb: 8.0,
    },
    AspectSpec {
        kind: AspectKind::Quincunx,
        angle: 150.0,
        orb: 3.0,
    },
];

impl AspectSpec {
    /// Table entry for a given kind.
    pub fn for_kind(kind: AspectKind) -> AspectSpec {
        let index = match kind {
            AspectKind::Conjunction => 0,
            AspectKind::Sextile => 1,
            AspectKind::Square => 2,
            AspectKind::Trine => 3,
            AspectKind::Opposition => 4,
            AspectKind::Quincunx => 5,
        };
        ASPECT_TABLE[index]
    }
}
