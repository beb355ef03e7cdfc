use serde::{Deserialize, Serialize};

use super::Waypoint;
use crate::{Meters, Seconds};

/// A finalized interval of vehicle motion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Start-to-end geodesic distance
    pub distance: Meters,
    pub start: Waypoint,
    pub end: Waypoint,
}

impl Trip {
    pub fn new(distance: Meters, start: Waypoint, end: Waypoint) -> Self {
        Self {
            distance,
            start,
            end,
        }
    }

    pub fn duration_seconds(&self) -> Seconds {
        self.end.seconds_since(&self.start)
    }
}
