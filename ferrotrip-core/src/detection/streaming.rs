//! Single-pass trip extraction over a live waypoint stream

use log::debug;

use super::{MotionClassifier, MotionConfig};
use crate::{GeoDistance, GeodesicDistance, Trip, Waypoint};

/// Which waypoint the next arrival is compared against while a trip is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviousPointPolicy {
    /// The previous point stops advancing when a trip starts. Every later
    /// sample is compared against the point the trip started from, and a
    /// closed trip ends where it began.
    #[default]
    FrozenAtTripStart,
    /// The previous point follows every arrival, which reproduces the trip
    /// boundaries of batch extraction for trips that close before the data ends.
    FollowLatest,
}

/// Logical state of a [`StreamingTripExtractor`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// No waypoint seen yet
    Priming,
    Idle,
    Driving,
}

/// Online trip extractor for one vehicle's waypoint stream.
///
/// Waypoints must be fed in arrival order by a single caller; independent
/// streams need independent extractors.
#[derive(Debug, Clone)]
pub struct StreamingTripExtractor<D = GeodesicDistance> {
    classifier: MotionClassifier<D>,
    policy: PreviousPointPolicy,
    filter_short_trips: bool,
    previous_point: Option<Waypoint>,
    trip_start: Option<Waypoint>,
}

impl StreamingTripExtractor {
    pub fn new() -> Self {
        Self::with_classifier(MotionClassifier::new(MotionConfig::default()))
    }
}

impl Default for StreamingTripExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: GeoDistance> StreamingTripExtractor<D> {
    pub fn with_classifier(classifier: MotionClassifier<D>) -> Self {
        Self {
            classifier,
            policy: PreviousPointPolicy::default(),
            filter_short_trips: false,
            previous_point: None,
            trip_start: None,
        }
    }

    #[must_use]
    pub fn previous_point_policy(mut self, policy: PreviousPointPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Drop emitted trips no longer than `min_trip_distance`, as batch
    /// extraction does. Off by default.
    #[must_use]
    pub fn filter_short_trips(mut self, enabled: bool) -> Self {
        self.filter_short_trips = enabled;
        self
    }

    pub fn classifier(&self) -> &MotionClassifier<D> {
        &self.classifier
    }

    pub fn state(&self) -> StreamState {
        match (self.previous_point, self.trip_start) {
            (None, _) => StreamState::Priming,
            (Some(_), None) => StreamState::Idle,
            (Some(_), Some(_)) => StreamState::Driving,
        }
    }

    pub fn previous_point(&self) -> Option<&Waypoint> {
        self.previous_point.as_ref()
    }

    /// Start of the trip currently in progress
    pub fn pending_start(&self) -> Option<&Waypoint> {
        self.trip_start.as_ref()
    }

    /// Forgets all stream state, including any trip in progress.
    pub fn reset(&mut self) {
        self.previous_point = None;
        self.trip_start = None;
    }

    /// Feeds the next waypoint. Returns a trip once a non-moving pair closes it.
    pub fn process_waypoint(&mut self, waypoint: Waypoint) -> Option<Trip> {
        let Some(previous) = self.previous_point else {
            self.previous_point = Some(waypoint);
            return None;
        };

        let follow_latest = self.policy == PreviousPointPolicy::FollowLatest;

        if self.classifier.is_driving(&previous, &waypoint) {
            if self.trip_start.is_none() {
                debug!("Trip started at {}", previous.timestamp);
                self.trip_start = Some(previous);
            }
            if follow_latest {
                self.previous_point = Some(waypoint);
            }
            return None;
        }

        match self.trip_start.take() {
            Some(start) => {
                if follow_latest {
                    self.previous_point = Some(waypoint);
                }
                self.close_trip(start, previous)
            }
            None => {
                self.previous_point = Some(waypoint);
                None
            }
        }
    }

    fn close_trip(&self, start: Waypoint, end: Waypoint) -> Option<Trip> {
        let trip = Trip::new(self.classifier.distance(&start, &end), start, end);
        let min_trip_distance = self.classifier.config().min_trip_distance;

        if self.filter_short_trips && trip.distance <= min_trip_distance {
            debug!(
                "Dropped {}m trip started at {}",
                trip.distance, trip.start.timestamp
            );
            return None;
        }

        debug!("Trip closed at {} after {}m", end.timestamp, trip.distance);
        Some(trip)
    }
}
