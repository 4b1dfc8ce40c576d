//! Julian date handling.
//!
//! All ephemeris computation is parameterized by the Julian date (JD), the
//! continuous day count used in astronomical formulae. JD 2451545.0 is the
//! J2000.0 epoch (2000-01-01 12:00:00 TT; the ~64 s TT−UTC offset is far
//! below the accuracy class of the built-in provider and is ignored).

use serde::{Deserialize, Serialize};

/// Julian date: days since noon on 4713 BC January 1 (proleptic Julian
/// calendar).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDate(f64);

/// JD of the J2000.0 epoch, 2000-01-01 12:00:00.
pub const J2000: JulianDate = JulianDate(2451545.0);

/// JD of the Unix epoch, 1970-01-01 00:00:00 UTC.
const UNIX_EPOCH_JD: f64 = 2440587.5;

impl JulianDate {
    /// Create a new JD value.
    pub fn new(v: f64) -> Self {
        Self(v)
    }

    /// Raw JD value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Days elapsed since J2000.0 (negative before the epoch).
    pub fn days_since_j2000(&self) -> f64 {
        self.0 - J2000.value()
    }

    /// Julian centuries elapsed since J2000.0.
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / 36525.0
    }

    /// Offset by a whole or fractional number of days.
    pub fn add_days(&self, days: f64) -> Self {
        Self(self.0 + days)
    }

    /// Mean obliquity of the ecliptic at this date, degrees.
    ///
    /// Linear decay from the J2000 epoch fraction — a deliberate
    /// simplification rather than a precession series, preserved from the
    /// source system.
    pub fn mean_obliquity(&self) -> f64 {
        23.4367 - 0.013_004 * (self.days_since_j2000() / 365.25)
    }

    /// Convert to Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn to_unix_timestamp(&self) -> f64 {
        (self.0 - UNIX_EPOCH_JD) * 86400.0
    }

    /// Create from Unix timestamp (seconds since 1970-01-01 00:00:00 UTC).
    pub fn from_unix_timestamp(timestamp: f64) -> Self {
        Self(timestamp / 86400.0 + UNIX_EPOCH_JD)
    }

    /// Create from chrono `DateTime<Utc>`.
    pub fn from_datetime(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Self::from_unix_timestamp(
            dt.timestamp() as f64 + dt.timestamp_subsec_nanos() as f64 / 1e9,
        )
    }

    /// Convert to chrono `DateTime<Utc>`.
    pub fn to_datetime(&self) -> chrono::DateTime<chrono::Utc> {
        let secs = self.to_unix_timestamp();
        let secs_i64 = secs.floor() as i64;
        let nanos = ((secs - secs.floor()) * 1e9) as u32;
        chrono::DateTime::from_timestamp(secs_i64, nanos)
            .unwrap_or(chrono::DateTime::UNIX_EPOCH)
    }
}

impl From<f64> for JulianDate {
    fn from(v: f64) -> Self {
        JulianDate::new(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_j2000_from_datetime() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = JulianDate::from_datetime(dt);
        assert!((jd.value() - 2451545.0).abs() < 1e-9);
        assert!(jd.days_since_j2000().abs() < 1e-9);
    }

    #[test]
    fn test_unix_epoch_round_trip() {
        let jd = JulianDate::from_unix_timestamp(0.0);
        assert!((jd.value() - 2440587.5).abs() < 1e-9);
        assert!(jd.to_unix_timestamp().abs() < 1e-6);
    }

    #[test]
    fn test_add_days() {
        let jd = JulianDate::new(2451545.0);
        assert_eq!(jd.add_days(1.0).value(), 2451546.0);
        assert_eq!(jd.add_days(-1.0).value(), 2451544.0);
    }

    #[test]
    fn test_centuries_since_j2000() {
        let jd = JulianDate::new(2451545.0 + 36525.0);
        assert!((jd.centuries_since_j2000() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_datetime_round_trip() {
        let dt = Utc.with_ymd_and_hms(1987, 6, 19, 4, 30, 0).unwrap();
        let jd = JulianDate::from_datetime(dt);
        let back = jd.to_datetime();
        assert_eq!(back.timestamp(), dt.timestamp());
    }

    #[test]
    fn test_mean_obliquity() {
        assert!((J2000.mean_obliquity() - 23.4367).abs() < 1e-9);
        // The linear decay term stays small on a decade scale.
        let decade_out = J2000.add_days(3652.5).mean_obliquity();
        assert!((decade_out - 23.4367).abs() < 0.2);
    }

    #[test]
    fn test_ordering() {
        assert!(JulianDate::new(2451545.0) < JulianDate::new(2451546.0));
    }
}
