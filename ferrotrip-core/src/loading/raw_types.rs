use serde::Deserialize;

/// JSON coordinates show up both as numbers and as numeric strings
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum RawCoordinate {
    Number(f64),
    Text(String),
}

#[derive(Debug, Deserialize)]
pub(super) struct JsonWaypoint {
    pub timestamp: String,
    pub lat: RawCoordinate,
    pub lng: RawCoordinate,
}

#[derive(Debug, Deserialize)]
pub(super) struct CsvWaypoint {
    pub timestamp: String,
    pub lat: String,
    pub lng: String,
}
