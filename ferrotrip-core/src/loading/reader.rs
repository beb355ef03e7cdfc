use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use super::parser::{check_chronology, waypoint_from_csv, waypoint_from_json};
use super::raw_types::{CsvWaypoint, JsonWaypoint};
use crate::{Error, Waypoint};

fn open_file(path: &Path) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    Ok(BufReader::new(file))
}

/// Reads a JSON array of `{timestamp, lat, lng}` records.
///
/// # Errors
///
/// Fails on invalid JSON, on the first malformed record and on
/// non-chronological input.
pub fn read_waypoints_json<R: Read>(reader: R) -> Result<Vec<Waypoint>, Error> {
    let records: Vec<JsonWaypoint> = serde_json::from_reader(reader)?;
    let waypoints = records
        .iter()
        .map(waypoint_from_json)
        .collect::<Result<Vec<_>, _>>()?;
    check_chronology(&waypoints)?;
    Ok(waypoints)
}

/// Reads waypoints from a JSON file
///
/// # Errors
///
/// See [`read_waypoints_json`]; also fails if the file cannot be opened.
pub fn read_waypoints(path: &Path) -> Result<Vec<Waypoint>, Error> {
    let waypoints = read_waypoints_json(open_file(path)?)?;
    info!("Loaded {} waypoints from {}", waypoints.len(), path.display());
    Ok(waypoints)
}

/// Reads CSV with a `timestamp,lat,lng` header.
///
/// # Errors
///
/// Fails on the first unreadable or malformed row and on non-chronological input.
pub fn read_waypoints_csv<R: Read>(reader: R) -> Result<Vec<Waypoint>, Error> {
    let mut waypoints = Vec::new();
    for record in csv::Reader::from_reader(reader).deserialize::<CsvWaypoint>() {
        waypoints.push(waypoint_from_csv(&record?)?);
    }
    check_chronology(&waypoints)?;
    Ok(waypoints)
}

/// # Errors
///
/// See [`read_waypoints_csv`]; also fails if the file cannot be opened.
pub fn read_waypoints_csv_file(path: &Path) -> Result<Vec<Waypoint>, Error> {
    let waypoints = read_waypoints_csv(open_file(path)?)?;
    info!("Loaded {} waypoints from {}", waypoints.len(), path.display());
    Ok(waypoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_accepts_string_and_numeric_coordinates() {
        let data = r#"[
            {"timestamp": "2018-08-10T20:04:22Z", "lat": "51.54987", "lng": "12.41039"},
            {"timestamp": "2018-08-10T20:04:52Z", "lat": 51.55001, "lng": 12.41122}
        ]"#;
        let waypoints = read_waypoints_json(data.as_bytes()).unwrap();

        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[0].lat, 51.54987);
        assert_eq!(waypoints[1].lng, 12.41122);
    }

    #[test]
    fn test_json_empty_array() {
        assert!(read_waypoints_json("[]".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_json_rejects_malformed_record() {
        let data = r#"[{"timestamp": "10/08/2018 20:04", "lat": "51.5", "lng": "12.4"}]"#;
        let err = read_waypoints_json(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedWaypoint { .. }));
    }

    #[test]
    fn test_json_rejects_missing_field() {
        let data = r#"[{"timestamp": "2018-08-10T20:04:22Z", "lat": "51.5"}]"#;
        let err = read_waypoints_json(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::JsonError(_)));
    }

    #[test]
    fn test_json_rejects_out_of_order() {
        let data = r#"[
            {"timestamp": "2018-08-10T20:04:22Z", "lat": "51.5", "lng": "12.4"},
            {"timestamp": "2018-08-10T20:03:00Z", "lat": "51.5", "lng": "12.4"}
        ]"#;
        let err = read_waypoints_json(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::OutOfOrderWaypoint { index: 1, .. }));
    }

    #[test]
    fn test_csv_reader() {
        let data = "timestamp,lat,lng\n\
                    2018-08-10T20:04:22Z,51.54987,12.41039\n\
                    2018-08-10T20:04:52Z,51.55001,12.41122\n";
        let waypoints = read_waypoints_csv(data.as_bytes()).unwrap();

        assert_eq!(waypoints.len(), 2);
        assert_eq!(waypoints[1].lat, 51.55001);
    }

    #[test]
    fn test_csv_rejects_bad_coordinate() {
        let data = "timestamp,lat,lng\n2018-08-10T20:04:22Z,abc,12.41039\n";
        let err = read_waypoints_csv(data.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::MalformedWaypoint { field: "lat", .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_waypoints(Path::new("/nonexistent/waypoints.json")).unwrap_err();
        assert!(matches!(err, Error::IoError(_)));
    }
}
