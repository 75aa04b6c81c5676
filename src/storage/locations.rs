//! Sensor location index
//!
//! A single `locations.json` document per storage root mapping decimal
//! sensor-id strings to free-text locations. Location is per physical
//! sensor, shared across its measurement kinds. Updates are
//! read-modify-write over the whole document; two concurrent writers can
//! lose one update (last writer wins at document granularity). The primary
//! deployment is a single-writer logger with read-only API handlers, so the
//! race is documented here and in the tests rather than papered over with a
//! lock this crate cannot enforce across processes.

use crate::storage::error::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// File name of the shared location document
pub const LOCATIONS_FILE: &str = "locations.json";

fn locations_path(root: &Path) -> PathBuf {
    root.join(LOCATIONS_FILE)
}

/// Load the whole location document
///
/// Fails with `LocationsNotSet` when no location has ever been recorded
/// under this root.
pub fn load_locations(root: &Path) -> StoreResult<BTreeMap<String, String>> {
    let path = locations_path(root);
    if !path.exists() {
        return Err(StoreError::LocationsNotSet);
    }

    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Look up the location of one sensor
pub fn sensor_location(root: &Path, id: u32) -> StoreResult<String> {
    load_locations(root)?
        .remove(&id.to_string())
        .ok_or(StoreError::SensorLocationNotSet { id })
}

/// Insert or overwrite one sensor's location and persist the document
///
/// An absent document starts from an empty mapping; any other load failure
/// propagates.
pub fn set_sensor_location(root: &Path, id: u32, location: &str) -> StoreResult<()> {
    let mut locations = match load_locations(root) {
        Ok(locations) => locations,
        Err(StoreError::LocationsNotSet) => BTreeMap::new(),
        Err(e) => return Err(e),
    };

    locations.insert(id.to_string(), location.to_string());

    std::fs::create_dir_all(root)?;
    let content = serde_json::to_string_pretty(&locations)?;
    std::fs::write(locations_path(root), content)?;

    tracing::debug!(sensor_id = id, location, "set sensor location");
    Ok(())
}
