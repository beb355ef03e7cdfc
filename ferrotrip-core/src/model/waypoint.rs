use chrono::{DateTime, Utc};
use geo::Point;
use serde::{Deserialize, Serialize};

use crate::Seconds;

/// Wire format of waypoint timestamps, always UTC
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// A single timestamped GPS fix.
///
/// Waypoints are created once at the ingestion boundary and only ever
/// copied afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    #[serde(with = "timestamp_format")]
    pub timestamp: DateTime<Utc>,
    pub lat: f64,
    pub lng: f64,
}

impl Waypoint {
    pub fn new(timestamp: DateTime<Utc>, lat: f64, lng: f64) -> Self {
        Self { timestamp, lat, lng }
    }

    /// `(lat, lng)` pair
    pub fn coords(&self) -> (f64, f64) {
        (self.lat, self.lng)
    }

    /// Geometry with `x = lng`, `y = lat`
    pub fn point(&self) -> Point<f64> {
        Point::new(self.lng, self.lat)
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Whole seconds elapsed since `earlier`; negative if `earlier` is actually later.
    pub fn seconds_since(&self, earlier: &Waypoint) -> Seconds {
        (self.timestamp - earlier.timestamp).num_seconds()
    }
}

pub(crate) mod timestamp_format {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
        NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).map(|naive| naive.and_utc())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_serde_uses_wire_timestamp_format() {
        let timestamp = Utc.with_ymd_and_hms(2018, 8, 10, 20, 4, 22).unwrap();
        let waypoint = Waypoint::new(timestamp, 51.546_25, 12.913_83);

        let json = serde_json::to_string(&waypoint).unwrap();
        assert_eq!(
            json,
            r#"{"timestamp":"2018-08-10T20:04:22Z","lat":51.54625,"lng":12.91383}"#
        );

        let decoded: Waypoint = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, waypoint);
    }

    #[test]
    fn test_seconds_since_truncates_subseconds() {
        let first = Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap();
        let second = first + chrono::TimeDelta::milliseconds(179_900);

        let a = Waypoint::new(first, 0.0, 0.0);
        let b = Waypoint::new(second, 0.0, 0.0);

        assert_eq!(b.seconds_since(&a), 179);
        assert_eq!(a.seconds_since(&b), -179);
    }

    #[test]
    fn test_seconds_since_counts_whole_days() {
        let first = Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap();
        let a = Waypoint::new(first, 0.0, 0.0);
        let b = Waypoint::new(first + chrono::TimeDelta::seconds(86_410), 0.0, 0.0);

        assert_eq!(b.seconds_since(&a), 86_410);
    }

    #[test]
    fn test_validity_bounds() {
        let timestamp = Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap();
        assert!(Waypoint::new(timestamp, 90.0, -180.0).is_valid());
        assert!(!Waypoint::new(timestamp, 90.5, 0.0).is_valid());
        assert!(!Waypoint::new(timestamp, 0.0, 181.0).is_valid());
        assert!(!Waypoint::new(timestamp, f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_point_axis_order() {
        let timestamp = Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap();
        let point = Waypoint::new(timestamp, 51.5, 12.9).point();
        assert_eq!(point.x(), 12.9);
        assert_eq!(point.y(), 51.5);
    }
}
