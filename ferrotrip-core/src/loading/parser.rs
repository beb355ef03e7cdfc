use chrono::{DateTime, Utc};

use super::raw_types::{CsvWaypoint, JsonWaypoint, RawCoordinate};
use crate::{Error, Waypoint, model::timestamp_format};

/// Parse a `YYYY-MM-DDTHH:MM:SSZ` timestamp
///
/// # Errors
///
/// Returns [`Error::MalformedWaypoint`] for any other shape.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    timestamp_format::parse(raw).map_err(|e| Error::MalformedWaypoint {
        field: "timestamp",
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

/// # Errors
///
/// Returns [`Error::MalformedWaypoint`] if `raw` is not a finite float.
pub fn parse_coordinate(field: &'static str, raw: &str) -> Result<f64, Error> {
    let malformed = |reason: String| Error::MalformedWaypoint {
        field,
        value: raw.to_string(),
        reason,
    };
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| malformed(e.to_string()))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(malformed("not a finite number".to_string()))
    }
}

/// Builds a waypoint from its raw string fields.
///
/// # Errors
///
/// Returns [`Error::MalformedWaypoint`] for unparseable fields and
/// [`Error::InvalidCoordinates`] for coordinates outside WGS84 bounds.
pub fn parse_waypoint(timestamp: &str, lat: &str, lng: &str) -> Result<Waypoint, Error> {
    let waypoint = Waypoint::new(
        parse_timestamp(timestamp)?,
        parse_coordinate("lat", lat)?,
        parse_coordinate("lng", lng)?,
    );
    validate_coordinates(waypoint)
}

fn validate_coordinates(waypoint: Waypoint) -> Result<Waypoint, Error> {
    if waypoint.is_valid() {
        Ok(waypoint)
    } else {
        Err(Error::InvalidCoordinates {
            lat: waypoint.lat,
            lng: waypoint.lng,
        })
    }
}

fn resolve_coordinate(field: &'static str, raw: &RawCoordinate) -> Result<f64, Error> {
    match raw {
        RawCoordinate::Number(value) => Ok(*value),
        RawCoordinate::Text(text) => parse_coordinate(field, text),
    }
}

pub(super) fn waypoint_from_json(raw: &JsonWaypoint) -> Result<Waypoint, Error> {
    let waypoint = Waypoint::new(
        parse_timestamp(&raw.timestamp)?,
        resolve_coordinate("lat", &raw.lat)?,
        resolve_coordinate("lng", &raw.lng)?,
    );
    validate_coordinates(waypoint)
}

pub(super) fn waypoint_from_csv(raw: &CsvWaypoint) -> Result<Waypoint, Error> {
    parse_waypoint(&raw.timestamp, &raw.lat, &raw.lng)
}

/// Verifies timestamps never decrease.
///
/// # Errors
///
/// Returns [`Error::OutOfOrderWaypoint`] at the first waypoint that is
/// earlier than its predecessor.
pub fn check_chronology(waypoints: &[Waypoint]) -> Result<(), Error> {
    for (index, pair) in waypoints.windows(2).enumerate() {
        if pair[1].timestamp < pair[0].timestamp {
            return Err(Error::OutOfOrderWaypoint {
                index: index + 1,
                previous: pair[0].timestamp,
                current: pair[1].timestamp,
            });
        }
    }
    Ok(())
}
