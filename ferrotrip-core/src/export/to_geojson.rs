use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use crate::model::TIMESTAMP_FORMAT;
use crate::{Error, Trip};

/// Converts trips to a `GeoJSON` `FeatureCollection` with one straight
/// start-to-end `LineString` per trip.
pub fn trips_to_geojson(trips: &[Trip]) -> Result<FeatureCollection, Error> {
    let features = trips
        .iter()
        .enumerate()
        .map(|(idx, trip)| create_trip_feature(idx, trip))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}

pub fn trips_to_geojson_string(trips: &[Trip]) -> Result<String, Error> {
    serde_json::to_string(&trips_to_geojson(trips)?)
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_trip_feature(trip_idx: usize, trip: &Trip) -> Result<Feature, Error> {
    let line = LineString::from(vec![trip.start.point(), trip.end.point()]);
    let geometry = Geometry::new(GeoJsonValue::from(&line));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "trip_index": trip_idx,
            "distance": trip.distance,
            "start_time": trip.start.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "end_time": trip.end.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            "duration_seconds": trip.duration_seconds(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::Waypoint;

    #[test]
    fn test_one_feature_per_trip() {
        let start = Waypoint::new(
            Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap(),
            51.5,
            12.25,
        );
        let end = Waypoint::new(
            Utc.with_ymd_and_hms(2018, 8, 10, 20, 10, 0).unwrap(),
            51.5125,
            12.5,
        );
        let trips = [Trip::new(17_342, start, end), Trip::new(250, end, end)];

        let collection = trips_to_geojson(&trips).unwrap();
        assert_eq!(collection.features.len(), 2);

        let first = &collection.features[0];
        assert_eq!(first.property("distance"), Some(&json!(17_342)));
        assert_eq!(first.property("duration_seconds"), Some(&json!(600)));
        assert_eq!(
            first.property("start_time"),
            Some(&json!("2018-08-10T20:00:00Z"))
        );
        assert_eq!(collection.features[1].property("trip_index"), Some(&json!(1)));
    }

    #[test]
    fn test_coordinates_are_lng_lat() {
        let at = Utc.with_ymd_and_hms(2018, 8, 10, 20, 0, 0).unwrap();
        let trips = [Trip::new(
            500,
            Waypoint::new(at, 51.5, 12.25),
            Waypoint::new(at, 51.75, 12.5),
        )];

        let text = trips_to_geojson_string(&trips).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            parsed["features"][0]["geometry"]["coordinates"],
            json!([[12.25, 51.5], [12.5, 51.75]])
        );
    }
}
