//! Angle normalization and arc arithmetic.
//!
//! Every longitude and cusp in the crate is kept in [0, 360); these helpers
//! are the single place that wrapping happens.

/// Normalize an angle in degrees into [0, 360).
pub fn normalize_degrees(angle: f64) -> f64 {
    let mut normalized = angle % 360.0;
    if normalized < 0.0 {
        normalized += 360.0;
    }
    normalized
}

/// Normalize an hour angle into [0, 24).
pub fn normalize_hours(hours: f64) -> f64 {
    let mut normalized = hours % 24.0;
    if normalized < 0.0 {
        normalized += 24.0;
    }
    normalized
}

/// Eastward arc from `from` to `to`, in [0, 360).
pub fn arc_between(from: f64, to: f64) -> f64 {
    normalize_degrees(to - from)
}

/// Shortest angular separation between two longitudes, in [0, 180].
pub fn separation(a: f64, b: f64) -> f64 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Fold a longitude difference into (-180, 180].
///
/// Used for daily-motion comparisons where the sampled longitudes may
/// straddle the 0°/360° boundary.
pub fn wrap_motion(motion: f64) -> f64 {
    let mut wrapped = motion;
    if wrapped > 180.0 {
        wrapped -= 360.0;
    }
    if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}
