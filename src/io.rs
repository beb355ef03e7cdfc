use std::path::PathBuf;

use ferrotrip_core::prelude::*;
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::derive::gen_stub_pyfunction;

use crate::model::{PyTrip, PyWaypoint};
use crate::to_py_err;

/// Read waypoints from a JSON or CSV file
///
/// Files ending in ``.csv`` are read as CSV with a ``timestamp,lat,lng``
/// header; anything else is read as a JSON array of
/// ``{"timestamp", "lat", "lng"}`` objects.
///
/// Raises
/// ------
/// ValueError
///     On malformed records or non-chronological input
/// IOError
///     If the file cannot be read
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn read_waypoints(py: Python<'_>, path: PathBuf) -> PyResult<Vec<PyWaypoint>> {
    let is_csv = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));

    let waypoints = py
        .detach(|| {
            if is_csv {
                read_waypoints_csv_file(&path)
            } else {
                ferrotrip_core::loading::read_waypoints(&path)
            }
        })
        .map_err(to_py_err)?;

    Ok(waypoints.into_iter().map(PyWaypoint::from).collect())
}

#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn parse_waypoint(timestamp: &str, lat: &str, lng: &str) -> PyResult<PyWaypoint> {
    PyWaypoint::parse(timestamp, lat, lng)
}

/// Save trips as a JSON array of ``{"distance", "start", "end"}`` objects
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn save_trips(trips: Vec<PyRef<'_, PyTrip>>, path: PathBuf) -> PyResult<()> {
    let trips: Vec<Trip> = trips.iter().map(|t| t.inner).collect();
    ferrotrip_core::export::save_trips(&path, &trips).map_err(to_py_err)
}

/// Convert trips to a GeoJSON FeatureCollection string
#[cfg_attr(feature = "stubgen", gen_stub_pyfunction)]
#[pyfunction]
pub fn trips_to_geojson(trips: Vec<PyRef<'_, PyTrip>>) -> PyResult<String> {
    let trips: Vec<Trip> = trips.iter().map(|t| t.inner).collect();
    trips_to_geojson_string(&trips).map_err(to_py_err)
}
