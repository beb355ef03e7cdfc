use serde::{Deserialize, Serialize};

use crate::{Error, Meters, Seconds};

/// Distances at or below this are indistinguishable from GPS jitter
pub const GPS_NOISE_FLOOR_METERS: Meters = 15;
/// Max gap for a normal consecutive-sample motion judgment
pub const STOP_TIME_SECONDS: Seconds = 180;
/// Trips this short or shorter are discarded as noise
pub const MIN_TRIP_DISTANCE_METERS: Meters = 100;
/// Max gap tolerated while the distance stays under the ceiling
pub const SIGNAL_LOSS_TIMEOUT_SECONDS: Seconds = 600;
/// Beyond this a long gap is never read as continuous motion
pub const SIGNAL_LOSS_DISTANCE_CEILING_METERS: Meters = 1000;

/// Thresholds used by the motion classifier and the minimum-distance filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    pub gps_noise_floor: Meters,
    pub stop_time: Seconds,
    pub min_trip_distance: Meters,
    pub signal_loss_timeout: Seconds,
    pub signal_loss_distance_ceiling: Meters,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            gps_noise_floor: GPS_NOISE_FLOOR_METERS,
            stop_time: STOP_TIME_SECONDS,
            min_trip_distance: MIN_TRIP_DISTANCE_METERS,
            signal_loss_timeout: SIGNAL_LOSS_TIMEOUT_SECONDS,
            signal_loss_distance_ceiling: SIGNAL_LOSS_DISTANCE_CEILING_METERS,
        }
    }
}

impl MotionConfig {
    /// Parses a TOML document; missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] if the document cannot be parsed or
    /// the resulting thresholds fail [`MotionConfig::validate`].
    pub fn from_toml_str(document: &str) -> Result<Self, Error> {
        let config: MotionConfig =
            toml::from_str(document).map_err(|e| Error::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for thresholds that cannot describe motion.
    pub fn validate(&self) -> Result<(), Error> {
        if self.signal_loss_distance_ceiling <= self.gps_noise_floor {
            return Err(Error::InvalidConfig(format!(
                "signal_loss_distance_ceiling ({}) must exceed gps_noise_floor ({})",
                self.signal_loss_distance_ceiling, self.gps_noise_floor
            )));
        }
        if self.stop_time <= 0 || self.signal_loss_timeout <= 0 {
            return Err(Error::InvalidConfig(
                "stop_time and signal_loss_timeout must be positive".to_string(),
            ));
        }
        if self.signal_loss_timeout < self.stop_time {
            log::warn!(
                "signal_loss_timeout ({}s) is shorter than stop_time ({}s); \
                the signal-loss rule will never widen the time window",
                self.signal_loss_timeout,
                self.stop_time
            );
        }
        Ok(())
    }
}
