use ferrotrip_core::Error;
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;
#[cfg(feature = "stubgen")]
use pyo3_stub_gen::define_stub_info_gatherer;

use extraction::{PyStreamTripExtractor, PyTripExtractor, extract_trips_many};
use io::{parse_waypoint, read_waypoints, save_trips, trips_to_geojson};
use model::{PyMotionConfig, PyTrip, PyWaypoint};

pub mod extraction;
pub mod io;
pub mod model;

pub(crate) fn to_py_err(error: Error) -> PyErr {
    match error {
        Error::IoError(e) => PyErr::new::<PyIOError, _>(e.to_string()),
        other => PyErr::new::<PyValueError, _>(other.to_string()),
    }
}

/// A Python module implemented in Rust.
#[pymodule]
fn ferrotrip(m: &Bound<'_, PyModule>) -> PyResult<()> {
    pyo3_log::init();

    m.add_class::<PyWaypoint>()?;
    m.add_class::<PyTrip>()?;
    m.add_class::<PyMotionConfig>()?;

    m.add_class::<PyTripExtractor>()?;
    m.add_class::<PyStreamTripExtractor>()?;
    m.add_function(wrap_pyfunction!(extract_trips_many, m)?)?;

    m.add_function(wrap_pyfunction!(parse_waypoint, m)?)?;
    m.add_function(wrap_pyfunction!(read_waypoints, m)?)?;
    m.add_function(wrap_pyfunction!(save_trips, m)?)?;
    m.add_function(wrap_pyfunction!(trips_to_geojson, m)?)?;
    Ok(())
}

#[cfg(feature = "stubgen")]
define_stub_info_gatherer!(stub_info);
