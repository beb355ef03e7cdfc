//! Output adapters for extracted trips

mod json;
mod to_geojson;

pub use json::{save_trips, trips_to_json_string, write_trips_json};
pub use to_geojson::{trips_to_geojson, trips_to_geojson_string};
