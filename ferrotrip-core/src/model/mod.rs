//! Value types shared by the classifier and both extractors

mod trip;
mod waypoint;

pub use trip::Trip;
pub use waypoint::{TIMESTAMP_FORMAT, Waypoint};

pub(crate) use waypoint::timestamp_format;
