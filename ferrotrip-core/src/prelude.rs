pub use crate::Error;

// Re-export key components
pub use crate::detection::{
    BatchTripExtractor, Motion, MotionClassifier, MotionConfig, PreviousPointPolicy, StreamState,
    StreamingTripExtractor, extract_trips, extract_trips_parallel,
};
pub use crate::export::{
    save_trips, trips_to_geojson, trips_to_geojson_string, trips_to_json_string, write_trips_json,
};
pub use crate::geodesy::{GeoDistance, GeodesicDistance, HaversineDistance};
pub use crate::loading::{
    check_chronology, parse_waypoint, read_waypoints, read_waypoints_csv,
    read_waypoints_csv_file, read_waypoints_json,
};
pub use crate::model::{TIMESTAMP_FORMAT, Trip, Waypoint};

// Units
pub use crate::Meters;
pub use crate::Seconds;
