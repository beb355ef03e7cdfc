//! Ingestion of raw waypoint records.
//!
//! Everything that reaches the detection core passes through here: records
//! are parsed into [`Waypoint`](crate::Waypoint) values, coordinates are range
//! checked and the sequence is verified to be chronological.

mod parser;
mod raw_types;
mod reader;

pub use parser::{check_chronology, parse_coordinate, parse_timestamp, parse_waypoint};
pub use reader::{
    read_waypoints, read_waypoints_csv, read_waypoints_csv_file, read_waypoints_json,
};
