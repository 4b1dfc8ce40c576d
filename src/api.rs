//! Public API surface.
//!
//! Consolidates the request DTO and re-exports the result types consumed
//! by downstream layers. All types derive Serialize/Deserialize for JSON
//! transport.

pub use crate::models::{
    format_degree, Aspect, AspectKind, Body, BodyPosition, ChartResult, Diagnostic, HouseCusp,
    ZodiacSign,
};
pub use crate::services::points::{ChartPoint, DerivedPoint};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A natal chart request: resolved UTC birth instant plus birth location.
///
/// Civil time and timezone resolution happen upstream; the engine only
/// accepts already-resolved UTC instants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    /// Birth instant, UTC.
    pub instant: DateTime<Utc>,
    /// Birth latitude in degrees, [-90, 90].
    pub latitude: f64,
    /// Birth longitude in degrees, [-180, 180], east positive.
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_request_serde_round_trip() {
        let request = ChartRequest {
            instant: Utc.with_ymd_and_hms(1987, 6, 19, 4, 30, 0).unwrap(),
            latitude: 41.39,
            longitude: 2.17,
        };
        let json = serde_json::to_string(&request).unwrap();
        let back: ChartRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(back, request);
    }
}
