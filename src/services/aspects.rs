//! Aspect detector.
//!
//! Every unordered pair of bodies is tested against the fixed aspect table
//! in priority order; the first matching entry wins, so a pair carries at
//! most one aspect.

use crate::angles::separation;
use crate::models::{Aspect, BodyPosition, ASPECT_TABLE};

/// Classify one pair of longitudes against the table.
fn classify(separation_deg: f64) -> Option<(usize, f64)> {
    for (index, spec) in ASPECT_TABLE.iter().enumerate() {
        let orb = (separation_deg - spec.angle).abs();
        if orb <= spec.orb {
            return Some((index, orb));
        }
    }
    None
}

/// Detect aspects among all body positions.
///
/// Positions are expected in canonical body order; detected aspects keep
/// that order in the pair, so classification and orb are independent of
/// which body is named first.
pub(crate) fn detect_aspects(positions: &[BodyPosition]) -> Vec<Aspect> {
    let mut aspects = Vec::new();
    for i in 0..positions.len() {
        for j in (i + 1)..positions.len() {
            let a = &positions[i];
            let b = &positions[j];

            let angle = separation(a.longitude, b.longitude);
            if let Some((index, orb)) = classify(angle) {
                aspects.push(Aspect {
                    body_a: a.body,
                    body_b: b.body,
                    kind: ASPECT_TABLE[index].kind,
                    angle,
                    orb,
                    // Raw longitude comparison; does not account for
                    // relative angular velocity.
                    applying: a.longitude < b.longitude,
                });
            }
        }
    }
    aspects
}
