//! Whole-history trip extraction

use itertools::Itertools;
use log::debug;
use rayon::prelude::*;

use super::{MotionClassifier, MotionConfig};
use crate::{GeoDistance, GeodesicDistance, Trip, Waypoint};

/// Extracts trips from a complete, chronologically ordered waypoint history.
///
/// The history is borrowed and never mutated; [`BatchTripExtractor::extract_trips`]
/// can be called any number of times and always yields the same trips.
#[derive(Debug, Clone)]
pub struct BatchTripExtractor<'a, D = GeodesicDistance> {
    waypoints: &'a [Waypoint],
    classifier: MotionClassifier<D>,
}

impl<'a> BatchTripExtractor<'a> {
    pub fn new(waypoints: &'a [Waypoint]) -> Self {
        Self::with_classifier(waypoints, MotionClassifier::new(MotionConfig::default()))
    }
}

impl<'a, D: GeoDistance> BatchTripExtractor<'a, D> {
    pub fn with_classifier(waypoints: &'a [Waypoint], classifier: MotionClassifier<D>) -> Self {
        Self {
            waypoints,
            classifier,
        }
    }

    pub fn waypoints(&self) -> &'a [Waypoint] {
        self.waypoints
    }

    pub fn extract_trips(&self) -> Vec<Trip> {
        extract_trips(self.waypoints, &self.classifier)
    }
}

/// Scans consecutive waypoint pairs and returns every trip longer than
/// `min_trip_distance`, in chronological order.
///
/// A trip that is still open when the final pair is reached absorbs the last
/// waypoint as its end. That is the only place a continuing trip is extended;
/// otherwise a trip ends at the last waypoint before the first non-moving pair.
pub fn extract_trips<D: GeoDistance>(
    waypoints: &[Waypoint],
    classifier: &MotionClassifier<D>,
) -> Vec<Trip> {
    if waypoints.len() < 2 {
        return Vec::new();
    }

    let last = waypoints.len() - 1;
    let mut trips: Vec<Trip> = Vec::new();
    let mut trip_open = false;

    for (idx, (first, second)) in waypoints.iter().tuple_windows().enumerate() {
        let motion = classifier.classify(first, second);

        if motion.moving {
            if !trip_open {
                debug!("Trip started at {}", first.timestamp);
                trips.push(Trip::new(motion.distance, *first, *second));
                trip_open = true;
            } else if idx + 1 == last {
                close_last_trip(&mut trips, second, classifier);
            }
        } else if trip_open {
            close_last_trip(&mut trips, first, classifier);
            trip_open = false;
        }
    }

    let detected = trips.len();
    let min_trip_distance = classifier.config().min_trip_distance;
    trips.retain(|trip| trip.distance > min_trip_distance);

    debug!(
        "Detected {detected} trips over {} waypoints, kept {} longer than {min_trip_distance}m",
        waypoints.len(),
        trips.len()
    );

    trips
}

fn close_last_trip<D: GeoDistance>(
    trips: &mut [Trip],
    end: &Waypoint,
    classifier: &MotionClassifier<D>,
) {
    if let Some(trip) = trips.last_mut() {
        let distance = classifier.distance(&trip.start, end);
        debug!("Trip closed at {} after {distance}m", end.timestamp);
        *trip = Trip::new(distance, trip.start, *end);
    }
}

/// Runs batch extraction over independent tracks (one per vehicle or device)
/// in parallel. Results are returned in track order.
pub fn extract_trips_parallel<D: GeoDistance>(
    tracks: &[Vec<Waypoint>],
    classifier: &MotionClassifier<D>,
) -> Vec<Vec<Trip>> {
    tracks
        .par_iter()
        .map(|track| extract_trips(track, classifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::test_support::{Planar, planar_classifier, wp};

    #[test]
    fn test_short_input_yields_nothing() {
        let classifier = planar_classifier();
        assert!(extract_trips(&[], &classifier).is_empty());
        assert!(extract_trips(&[wp(0, 0.0)], &classifier).is_empty());
    }

    #[test]
    fn test_trip_closes_on_first_stationary_pair() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 0.0),
            wp(120, 300.0),
            wp(180, 600.0),
            wp(240, 600.0),
            wp(300, 600.0),
        ];
        let trips = extract_trips(&waypoints, &planar_classifier());

        assert_eq!(trips, vec![Trip::new(600, waypoints[1], waypoints[3])]);
    }

    #[test]
    fn test_trip_running_to_end_absorbs_final_waypoint() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 0.0),
            wp(120, 200.0),
            wp(180, 400.0),
            wp(240, 650.0),
        ];
        let trips = extract_trips(&waypoints, &planar_classifier());

        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0].start, waypoints[1]);
        assert_eq!(trips[0].end, waypoints[4]);
        assert_eq!(trips[0].distance, 650);
    }

    #[test]
    fn test_trip_opened_by_final_pair() {
        let waypoints = [wp(0, 0.0), wp(60, 0.0), wp(120, 250.0)];
        let trips = extract_trips(&waypoints, &planar_classifier());

        assert_eq!(trips, vec![Trip::new(250, waypoints[1], waypoints[2])]);
    }

    #[test]
    fn test_short_trips_are_discarded() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 30.0),
            wp(120, 50.0),
            wp(180, 50.0),
            wp(240, 50.0),
        ];
        assert!(extract_trips(&waypoints, &planar_classifier()).is_empty());
    }

    #[test]
    fn test_minimum_distance_is_exclusive() {
        let waypoints = [wp(0, 0.0), wp(60, 100.0), wp(120, 100.0)];
        assert!(extract_trips(&waypoints, &planar_classifier()).is_empty());

        let waypoints = [wp(0, 0.0), wp(60, 101.0), wp(120, 101.0)];
        assert_eq!(extract_trips(&waypoints, &planar_classifier()).len(), 1);
    }

    #[test]
    fn test_trip_distance_is_end_to_end() {
        // Out and back: 400m driven, 0m between start and end
        let waypoints = [
            wp(0, 0.0),
            wp(60, 200.0),
            wp(120, 400.0),
            wp(180, 200.0),
            wp(240, 0.0),
            wp(300, 0.0),
        ];
        assert!(extract_trips(&waypoints, &planar_classifier()).is_empty());
    }

    #[test]
    fn test_multiple_trips_keep_order() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 300.0),
            wp(120, 300.0),
            wp(1000, 300.0),
            wp(1060, 800.0),
            wp(1120, 800.0),
        ];
        let trips = extract_trips(&waypoints, &planar_classifier());

        assert_eq!(
            trips,
            vec![
                Trip::new(300, waypoints[0], waypoints[1]),
                Trip::new(500, waypoints[3], waypoints[4]),
            ]
        );
    }

    #[test]
    fn test_signal_gap_keeps_trip_open() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 200.0),
            // 400s without a fix, still under the distance ceiling
            wp(460, 900.0),
            wp(520, 1200.0),
            wp(580, 1200.0),
        ];
        let trips = extract_trips(&waypoints, &planar_classifier());

        assert_eq!(trips, vec![Trip::new(1200, waypoints[0], waypoints[3])]);
    }

    #[test]
    fn test_extractor_is_deterministic() {
        let waypoints = [
            wp(0, 0.0),
            wp(60, 300.0),
            wp(120, 300.0),
            wp(180, 700.0),
            wp(240, 900.0),
        ];
        let classifier = MotionClassifier::with_metric(MotionConfig::default(), Planar);
        let extractor = BatchTripExtractor::with_classifier(&waypoints, classifier);

        assert_eq!(extractor.extract_trips(), extractor.extract_trips());
        assert_eq!(extractor.waypoints().len(), 5);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let tracks = vec![
            vec![wp(0, 0.0), wp(60, 300.0), wp(120, 300.0)],
            vec![],
            vec![wp(0, 0.0), wp(60, 50.0), wp(120, 50.0)],
            vec![wp(0, 0.0), wp(60, 500.0), wp(120, 900.0)],
        ];
        let classifier = planar_classifier();

        let parallel = extract_trips_parallel(&tracks, &classifier);
        let sequential: Vec<Vec<Trip>> = tracks
            .iter()
            .map(|track| extract_trips(track, &classifier))
            .collect();

        assert_eq!(parallel, sequential);
        assert_eq!(parallel[0].len(), 1);
        assert!(parallel[1].is_empty());
        assert!(parallel[2].is_empty());
        assert_eq!(parallel[3], vec![Trip::new(900, tracks[3][0], tracks[3][2])]);
    }
}
