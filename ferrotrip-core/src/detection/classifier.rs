use log::trace;

use super::MotionConfig;
use crate::{GeoDistance, GeodesicDistance, Meters, Seconds, Waypoint};

/// Outcome of classifying one pair of consecutive waypoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Motion {
    pub moving: bool,
    pub distance: Meters,
    pub elapsed: Seconds,
}

/// Decides whether a vehicle was moving between two temporally ordered
/// waypoints.
///
/// Stateless apart from its thresholds and distance capability, so a single
/// classifier can be shared by any number of extractors.
#[derive(Debug, Clone, Default)]
pub struct MotionClassifier<D = GeodesicDistance> {
    config: MotionConfig,
    metric: D,
}

impl MotionClassifier {
    pub fn new(config: MotionConfig) -> Self {
        Self::with_metric(config, GeodesicDistance)
    }
}

impl<D: GeoDistance> MotionClassifier<D> {
    pub fn with_metric(config: MotionConfig, metric: D) -> Self {
        Self { config, metric }
    }

    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    pub fn distance(&self, first: &Waypoint, second: &Waypoint) -> Meters {
        self.metric.distance(first.coords(), second.coords())
    }

    pub fn is_driving(&self, first: &Waypoint, second: &Waypoint) -> bool {
        self.classify(first, second).moving
    }

    /// Classifies the pair and hands back the distance it computed, so callers
    /// opening a trip do not measure the same pair twice.
    pub fn classify(&self, first: &Waypoint, second: &Waypoint) -> Motion {
        let distance = self.distance(first, second);
        let elapsed = second.seconds_since(first);
        let moving = self.is_moving(distance, elapsed);

        trace!("{distance}m in {elapsed}s -> moving={moving}");

        Motion {
            moving,
            distance,
            elapsed,
        }
    }

    fn is_moving(&self, distance: Meters, elapsed: Seconds) -> bool {
        let config = &self.config;
        if distance <= config.gps_noise_floor {
            return false;
        }
        // Dense sampling
        if elapsed < config.stop_time {
            return true;
        }
        // Signal gap in the middle of a trip
        distance < config.signal_loss_distance_ceiling && elapsed < config.signal_loss_timeout
    }
}
