//! Trip detection: motion classification and the two extraction strategies
//! built on top of it.

mod batch;
mod classifier;
mod config;
mod streaming;

pub use batch::{BatchTripExtractor, extract_trips, extract_trips_parallel};
pub use classifier::{Motion, MotionClassifier};
pub use config::{
    GPS_NOISE_FLOOR_METERS, MIN_TRIP_DISTANCE_METERS, MotionConfig,
    SIGNAL_LOSS_DISTANCE_CEILING_METERS, SIGNAL_LOSS_TIMEOUT_SECONDS, STOP_TIME_SECONDS,
};
pub use streaming::{PreviousPointPolicy, StreamState, StreamingTripExtractor};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};

    use super::{MotionClassifier, MotionConfig};
    use crate::{GeoDistance, Waypoint};

    /// Treats `(lat, lng)` as plain meters on a plane, so distances are exact.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Planar;

    impl GeoDistance for Planar {
        fn distance_meters(&self, a: (f64, f64), b: (f64, f64)) -> f64 {
            (a.0 - b.0).hypot(a.1 - b.1)
        }
    }

    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap()
    }

    /// Waypoint `seconds` after the epoch, `x` meters along the plane
    pub fn wp(seconds: i64, x: f64) -> Waypoint {
        Waypoint::new(epoch() + TimeDelta::seconds(seconds), x, 0.0)
    }

    pub fn planar_classifier() -> MotionClassifier<Planar> {
        MotionClassifier::with_metric(MotionConfig::default(), Planar)
    }
}
