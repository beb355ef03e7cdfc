use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::info;

use crate::{Error, Trip};

/// Writes trips as a JSON array of `{distance, start, end}` objects.
///
/// # Errors
///
/// Returns an error if serialization or the underlying writer fails.
pub fn write_trips_json<W: Write>(writer: W, trips: &[Trip]) -> Result<(), Error> {
    serde_json::to_writer(writer, trips)?;
    Ok(())
}

pub fn trips_to_json_string(trips: &[Trip]) -> Result<String, Error> {
    Ok(serde_json::to_string(trips)?)
}

/// Persists trips to `path`, replacing any existing file.
///
/// # Errors
///
/// Returns an error if the file cannot be created or written.
pub fn save_trips(path: &Path, trips: &[Trip]) -> Result<(), Error> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    let mut writer = BufWriter::new(file);
    write_trips_json(&mut writer, trips)?;
    writer.flush()?;

    info!("Saved {} trips to {}", trips.len(), path.display());
    Ok(())
}
