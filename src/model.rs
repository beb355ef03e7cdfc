use chrono::{DateTime, Utc};
use ferrotrip_core::detection::{
    GPS_NOISE_FLOOR_METERS, MIN_TRIP_DISTANCE_METERS, SIGNAL_LOSS_DISTANCE_CEILING_METERS,
    SIGNAL_LOSS_TIMEOUT_SECONDS, STOP_TIME_SECONDS,
};
use ferrotrip_core::prelude::*;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::{gen_stub_pyclass, gen_stub_pymethods};

use crate::to_py_err;

/// Waypoint
///
/// A single timestamped GPS fix. Timestamps must be timezone-aware and are
/// normalized to UTC.
///
/// Example:
///
/// .. code-block:: python
///
///     wp = Waypoint(datetime(2018, 8, 10, 20, 4, 22, tzinfo=timezone.utc), 51.5, 12.4)
///     wp = Waypoint.parse("2018-08-10T20:04:22Z", "51.5", "12.4")
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "Waypoint", frozen, eq)]
#[derive(Clone, PartialEq)]
pub struct PyWaypoint {
    pub(crate) inner: Waypoint,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyWaypoint {
    #[new]
    pub fn new(timestamp: DateTime<Utc>, lat: f64, lng: f64) -> PyResult<Self> {
        let inner = Waypoint::new(timestamp, lat, lng);
        if !inner.is_valid() {
            return Err(to_py_err(Error::InvalidCoordinates { lat, lng }));
        }
        Ok(Self { inner })
    }

    /// Parse a waypoint from its raw string fields
    /// (``YYYY-MM-DDTHH:MM:SSZ`` timestamp, decimal degrees).
    #[staticmethod]
    pub fn parse(timestamp: &str, lat: &str, lng: &str) -> PyResult<Self> {
        let inner = parse_waypoint(timestamp, lat, lng).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn timestamp(&self) -> DateTime<Utc> {
        self.inner.timestamp
    }

    #[getter]
    fn lat(&self) -> f64 {
        self.inner.lat
    }

    #[getter]
    fn lng(&self) -> f64 {
        self.inner.lng
    }

    /// Return as (lat, lng)
    fn coords(&self) -> (f64, f64) {
        self.inner.coords()
    }

    fn __repr__(&self) -> String {
        format!(
            "Waypoint(timestamp={}, lat={}, lng={})",
            self.inner.timestamp.format(TIMESTAMP_FORMAT),
            self.inner.lat,
            self.inner.lng
        )
    }
}

impl From<Waypoint> for PyWaypoint {
    fn from(inner: Waypoint) -> Self {
        Self { inner }
    }
}

/// Trip
///
/// A detected interval of vehicle motion: start and end waypoints and the
/// start-to-end distance in whole meters.
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "Trip", frozen, eq)]
#[derive(Clone, PartialEq)]
pub struct PyTrip {
    pub(crate) inner: Trip,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyTrip {
    #[getter]
    fn distance(&self) -> Meters {
        self.inner.distance
    }

    #[getter]
    fn start(&self) -> PyWaypoint {
        self.inner.start.into()
    }

    #[getter]
    fn end(&self) -> PyWaypoint {
        self.inner.end.into()
    }

    fn duration_seconds(&self) -> i64 {
        self.inner.duration_seconds()
    }

    /// Serialize as ``{"distance": ..., "start": {...}, "end": {...}}``
    fn to_json(&self) -> PyResult<String> {
        serde_json::to_string(&self.inner).map_err(|e| to_py_err(e.into()))
    }

    fn __repr__(&self) -> String {
        format!(
            "Trip(distance={}m, start={}, end={})",
            self.inner.distance,
            self.inner.start.timestamp.format(TIMESTAMP_FORMAT),
            self.inner.end.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

impl From<Trip> for PyTrip {
    fn from(inner: Trip) -> Self {
        Self { inner }
    }
}

/// MotionConfig
///
/// Thresholds for motion classification and short-trip filtering.
///
/// Parameters
/// ----------
/// gps_noise_floor : int, default=15
///     Distances in meters at or below this are treated as GPS jitter
/// stop_time : int, default=180
///     Max seconds between samples for a normal motion judgment
/// min_trip_distance : int, default=100
///     Trips this short or shorter (meters) are discarded
/// signal_loss_timeout : int, default=600
///     Max seconds tolerated when the distance stays under the ceiling
/// signal_loss_distance_ceiling : int, default=1000
///     Above this distance a long gap is not treated as motion
#[cfg_attr(feature = "stubgen", gen_stub_pyclass)]
#[pyclass(name = "MotionConfig", frozen)]
#[derive(Clone)]
pub struct PyMotionConfig {
    pub(crate) inner: MotionConfig,
}

#[cfg_attr(feature = "stubgen", gen_stub_pymethods)]
#[pymethods]
impl PyMotionConfig {
    #[new]
    #[pyo3(signature = (
        gps_noise_floor = GPS_NOISE_FLOOR_METERS,
        stop_time = STOP_TIME_SECONDS,
        min_trip_distance = MIN_TRIP_DISTANCE_METERS,
        signal_loss_timeout = SIGNAL_LOSS_TIMEOUT_SECONDS,
        signal_loss_distance_ceiling = SIGNAL_LOSS_DISTANCE_CEILING_METERS
    ))]
    pub fn new(
        gps_noise_floor: Meters,
        stop_time: Seconds,
        min_trip_distance: Meters,
        signal_loss_timeout: Seconds,
        signal_loss_distance_ceiling: Meters,
    ) -> PyResult<Self> {
        let inner = MotionConfig {
            gps_noise_floor,
            stop_time,
            min_trip_distance,
            signal_loss_timeout,
            signal_loss_distance_ceiling,
        };
        inner.validate().map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Load thresholds from a TOML document; missing keys keep their defaults.
    #[staticmethod]
    pub fn from_toml(document: &str) -> PyResult<Self> {
        let inner = MotionConfig::from_toml_str(document).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    #[getter]
    fn gps_noise_floor(&self) -> Meters {
        self.inner.gps_noise_floor
    }

    #[getter]
    fn stop_time(&self) -> Seconds {
        self.inner.stop_time
    }

    #[getter]
    fn min_trip_distance(&self) -> Meters {
        self.inner.min_trip_distance
    }

    #[getter]
    fn signal_loss_timeout(&self) -> Seconds {
        self.inner.signal_loss_timeout
    }

    #[getter]
    fn signal_loss_distance_ceiling(&self) -> Meters {
        self.inner.signal_loss_distance_ceiling
    }

    fn __repr__(&self) -> String {
        format!("{:?}", self.inner)
    }
}
