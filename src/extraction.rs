use ferrotrip_core::prelude::*;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pyfunction, gen_stub_pymethods};

use crate::model::{PyMotionConfig, PyTrip, PyWaypoint};
use crate::to_py_err;

fn classifier_from(config: Option<&PyMotionConfig>) -> MotionClassifier {
    MotionClassifier::new(config.map(|c| c.inner).unwrap_or_default())
}

fn collect_waypoints(waypoints: &[PyRef<'_, PyWaypoint>]) -> PyResult<Vec<Waypoint>> {
    let waypoints: Vec<Waypoint> = waypoints.iter().map(|w| w.inner).collect();
    check_chronology(&waypoints).map_err(to_py_err)?;
    Ok(waypoints)
}

/// TripExtractor
///
/// Batch trip extraction over a complete, chronologically ordered waypoint
/// history.
///
/// Parameters
/// ----------
/// waypoints : list[Waypoint]
///     Complete history, timestamps non-decreasing
/// config : MotionConfig, optional
///     Thresholds; defaults are used when omitted
///
/// Raises
/// ------
/// ValueError
///     If the waypoints are not in chronological order
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "TripExtractor", frozen)]
pub struct PyTripExtractor {
    waypoints: Vec<Waypoint>,
    classifier: MotionClassifier,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyTripExtractor {
    #[new]
    #[pyo3(signature = (waypoints, config = None))]
    pub fn new(
        waypoints: Vec<PyRef<'_, PyWaypoint>>,
        config: Option<PyRef<'_, PyMotionConfig>>,
    ) -> PyResult<Self> {
        Ok(Self {
            waypoints: collect_waypoints(&waypoints)?,
            classifier: classifier_from(config.as_deref()),
        })
    }

    /// Extract every trip longer than ``min_trip_distance``, in order.
    ///
    /// The GIL is released during extraction.
    pub fn extract_trips(&self, py: Python<'_>) -> Vec<PyTrip> {
        let trips = py.detach(|| extract_trips(&self.waypoints, &self.classifier));
        trips.into_iter().map(PyTrip::from).collect()
    }

    fn __len__(&self) -> usize {
        self.waypoints.len()
    }

    fn __repr__(&self) -> String {
        format!("TripExtractor with {} waypoints", self.waypoints.len())
    }
}

/// StreamTripExtractor
///
/// Online trip extraction: feed waypoints one at a time with
/// ``process_waypoint``; a ``Trip`` is returned as soon as one closes.
///
/// Parameters
/// ----------
/// config : MotionConfig, optional
///     Thresholds; defaults are used when omitted
/// filter_short_trips : bool, default=False
///     Drop emitted trips no longer than ``min_trip_distance``
/// follow_latest : bool, default=False
///     Compare each arrival against the latest waypoint instead of the point
///     the current trip started from
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "StreamTripExtractor")]
pub struct PyStreamTripExtractor {
    inner: StreamingTripExtractor,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyStreamTripExtractor {
    #[new]
    #[pyo3(signature = (config = None, filter_short_trips = false, follow_latest = false))]
    pub fn new(
        config: Option<PyRef<'_, PyMotionConfig>>,
        filter_short_trips: bool,
        follow_latest: bool,
    ) -> Self {
        let policy = if follow_latest {
            PreviousPointPolicy::FollowLatest
        } else {
            PreviousPointPolicy::FrozenAtTripStart
        };
        let inner = StreamingTripExtractor::with_classifier(classifier_from(config.as_deref()))
            .previous_point_policy(policy)
            .filter_short_trips(filter_short_trips);
        Self { inner }
    }

    pub fn process_waypoint(&mut self, waypoint: PyRef<'_, PyWaypoint>) -> Option<PyTrip> {
        self.inner.process_waypoint(waypoint.inner).map(PyTrip::from)
    }

    /// One of ``"priming"``, ``"idle"`` or ``"driving"``
    #[getter]
    fn state(&self) -> &'static str {
        match self.inner.state() {
            StreamState::Priming => "priming",
            StreamState::Idle => "idle",
            StreamState::Driving => "driving",
        }
    }

    /// Start of the trip in progress, if any
    #[getter]
    fn pending_start(&self) -> Option<PyWaypoint> {
        self.inner.pending_start().copied().map(PyWaypoint::from)
    }

    fn reset(&mut self) {
        self.inner.reset();
    }

    fn __repr__(&self) -> String {
        format!("StreamTripExtractor(state={})", self.state())
    }
}

/// Extract trips from many independent tracks in parallel
///
/// Parameters
/// ----------
/// tracks : list[list[Waypoint]]
///     One chronologically ordered history per vehicle or device
/// config : MotionConfig, optional
///
/// Returns
/// -------
/// list[list[Trip]]
///     Trips per track, in input order
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
#[pyo3(signature = (tracks, config = None))]
pub fn extract_trips_many(
    py: Python<'_>,
    tracks: Vec<Vec<PyRef<'_, PyWaypoint>>>,
    config: Option<PyRef<'_, PyMotionConfig>>,
) -> PyResult<Vec<Vec<PyTrip>>> {
    let tracks = tracks
        .iter()
        .map(|track| collect_waypoints(track))
        .collect::<PyResult<Vec<_>>>()?;
    let classifier = classifier_from(config.as_deref());

    let results = py.detach(|| extract_trips_parallel(&tracks, &classifier));

    Ok(results
        .into_iter()
        .map(|trips| trips.into_iter().map(PyTrip::from).collect())
        .collect())
}
