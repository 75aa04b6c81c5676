//! Sensor inventory and query layer
//!
//! Reconstructs the sensor inventory by scanning a storage root: every file
//! whose name decodes as a storage key is one (sensor, measurement kind)
//! series. Each record joins the identity with its latest reading, an
//! optional location, and optionally the full series. One bad file never
//! breaks the listing; per-item failures are logged and the scan moves on.

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::{MeasurementKind, Reading, SensorIdentity};
use crate::storage::{self, storage_key};
use serde::Serialize;
use std::path::Path;

/// One inventory entry, constructed on demand and never persisted
#[derive(Debug, Clone, Serialize)]
pub struct SensorRecord {
    pub id: u32,
    pub protocol: String,
    pub model: String,
    pub kind: MeasurementKind,
    /// Last reading in file order (not maximum timestamp)
    pub last_reading: Reading,
    /// Full series, parallel to `values`, when all readings were requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamps: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
    /// Human-readable location, absent until a caller sets one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Enumerate every logged (sensor, measurement kind) series under `root`
///
/// Files that do not decode as storage keys are skipped silently (not every
/// file in the directory is a sensor log), and logs with zero valid readings
/// are omitted rather than failing the listing. Order follows directory
/// enumeration; callers sort when they need determinism.
pub fn list_sensors(root: &Path, include_all_readings: bool) -> StoreResult<Vec<SensorRecord>> {
    let mut records = Vec::new();

    if !root.exists() {
        return Ok(records);
    }

    for entry in std::fs::read_dir(root)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(root = %root.display(), error = %e, "skipping unreadable directory entry");
                continue;
            }
        };
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };

        let identity = match storage::parse_storage_key(name) {
            Ok(identity) => identity,
            Err(_) => continue,
        };

        match build_record(root, &identity, include_all_readings) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {
                tracing::debug!(key = name, "omitting sensor log with no valid readings");
            }
            Err(e) => {
                tracing::warn!(key = name, error = %e, "skipping unreadable sensor log");
            }
        }
    }

    tracing::debug!(count = records.len(), root = %root.display(), "listed sensors");
    Ok(records)
}

fn build_record(
    root: &Path,
    identity: &SensorIdentity,
    include_all_readings: bool,
) -> StoreResult<Option<SensorRecord>> {
    let series = storage::read_series(root, identity)?;
    let Some(last_reading) = series.last().copied() else {
        return Ok(None);
    };

    let location = match storage::sensor_location(root, identity.id) {
        Ok(location) => Some(location),
        // Expected until someone names the sensor
        Err(StoreError::LocationsNotSet) | Err(StoreError::SensorLocationNotSet { .. }) => None,
        Err(e) => {
            tracing::warn!(sensor_id = identity.id, error = %e, "could not read location");
            None
        }
    };

    let (timestamps, values) = if include_all_readings {
        let (ts, vs) = split_series(&series);
        (Some(ts), Some(vs))
    } else {
        (None, None)
    };

    Ok(Some(SensorRecord {
        id: identity.id,
        protocol: identity.protocol.clone(),
        model: identity.model.clone(),
        kind: identity.kind.clone(),
        last_reading,
        timestamps,
        values,
        location,
    }))
}

/// Full series for one identity as parallel (timestamps, values) vectors
pub fn reading_series(
    root: &Path,
    id: u32,
    kind: MeasurementKind,
    protocol: &str,
    model: &str,
) -> StoreResult<(Vec<i64>, Vec<f64>)> {
    let identity = SensorIdentity::new(protocol, model, id, kind);
    let series = storage::read_series(root, &identity)?;
    if series.is_empty() {
        return Err(StoreError::EmptyLog {
            key: storage_key(&identity),
        });
    }
    Ok(split_series(&series))
}

fn split_series(series: &[Reading]) -> (Vec<i64>, Vec<f64>) {
    series
        .iter()
        .map(|reading| (reading.timestamp, reading.value))
        .unzip()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{append, set_sensor_location};
    use std::io::Write;
    use tempfile::tempdir;

    fn temperature(id: u32) -> SensorIdentity {
        SensorIdentity::new("oregon", "1a2d", id, MeasurementKind::Temperature)
    }

    #[test]
    fn test_listing_skips_foreign_files() {
        let dir = tempdir().unwrap();
        append(dir.path(), &temperature(180), Reading::new(100, 20.5)).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a sensor log").unwrap();
        std::fs::write(dir.path().join("broken_name.csv"), "100;1.0\n").unwrap();

        let records = list_sensors(dir.path(), false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 180);
        assert_eq!(records[0].kind, MeasurementKind::Temperature);
    }

    #[test]
    fn test_listing_reports_last_reading_and_location() {
        let dir = tempdir().unwrap();
        let id = temperature(180);
        append(dir.path(), &id, Reading::new(100, 20.5)).unwrap();
        append(dir.path(), &id, Reading::new(200, 21.0)).unwrap();
        set_sensor_location(dir.path(), 180, "greenhouse").unwrap();

        let records = list_sensors(dir.path(), false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].last_reading, Reading::new(200, 21.0));
        assert_eq!(records[0].location.as_deref(), Some("greenhouse"));
        assert!(records[0].timestamps.is_none());
    }

    #[test]
    fn test_listing_without_locations_document() {
        let dir = tempdir().unwrap();
        append(dir.path(), &temperature(180), Reading::new(100, 20.5)).unwrap();

        let records = list_sensors(dir.path(), false).unwrap();
        assert_eq!(records[0].location, None);
    }

    #[test]
    fn test_listing_omits_empty_logs() {
        let dir = tempdir().unwrap();
        append(dir.path(), &temperature(180), Reading::new(100, 20.5)).unwrap();
        std::fs::File::create(dir.path().join("humidity_oregon_1a2d_135.csv")).unwrap();

        let records = list_sensors(dir.path(), false).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 180);
    }

    #[test]
    fn test_listing_with_all_readings() {
        let dir = tempdir().unwrap();
        let id = temperature(180);
        append(dir.path(), &id, Reading::new(100, 20.5)).unwrap();
        append(dir.path(), &id, Reading::new(200, 21.0)).unwrap();

        let records = list_sensors(dir.path(), true).unwrap();
        assert_eq!(records[0].timestamps.as_deref(), Some(&[100, 200][..]));
        assert_eq!(records[0].values.as_deref(), Some(&[20.5, 21.0][..]));
    }

    #[test]
    fn test_listing_missing_root_is_empty() {
        let dir = tempdir().unwrap();
        let records = list_sensors(&dir.path().join("nowhere"), false).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_reading_series_scenario() {
        let dir = tempdir().unwrap();
        let mut file =
            std::fs::File::create(dir.path().join("temperature_oregon_1a2d_180.csv")).unwrap();
        writeln!(file, "100;20.5").unwrap();
        writeln!(file, "200;21.0").unwrap();
        drop(file);

        let (timestamps, values) = reading_series(
            dir.path(),
            180,
            MeasurementKind::Temperature,
            "oregon",
            "1a2d",
        )
        .unwrap();
        assert_eq!(timestamps, vec![100, 200]);
        assert_eq!(values, vec![20.5, 21.0]);
    }

    #[test]
    fn test_reading_series_missing_is_not_found() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            reading_series(
                dir.path(),
                180,
                MeasurementKind::Temperature,
                "oregon",
                "1a2d"
            ),
            Err(StoreError::SeriesNotFound { .. })
        ));
    }
}
