//! Trip segmentation for chronological GPS waypoint sequences.
//!
//! A trip is a contiguous interval of vehicle motion, separated from the next
//! one by a stationary period or a signal gap. Two traversal strategies share
//! the same [`MotionClassifier`]:
//!
//! - [`BatchTripExtractor`] scans a complete, resident waypoint history;
//! - [`StreamingTripExtractor`] receives waypoints one at a time and emits a
//!   trip as soon as it is recognized.
//!
//! The [`loading`] and [`export`] modules are the adapters on either side of
//! the detection core: JSON/CSV ingestion and JSON/GeoJSON output.

pub mod detection;
pub mod error;
pub mod export;
pub mod geodesy;
pub mod loading;
pub mod model;
pub mod prelude;

pub use detection::{
    BatchTripExtractor, Motion, MotionClassifier, MotionConfig, PreviousPointPolicy, StreamState,
    StreamingTripExtractor, extract_trips, extract_trips_parallel,
};
pub use error::Error;
pub use geodesy::{GeoDistance, GeodesicDistance, HaversineDistance};
pub use model::{Trip, Waypoint};

/// Whole meters, truncated toward zero
pub type Meters = u32;
/// Whole seconds, sub-second remainder truncated
pub type Seconds = i64;
