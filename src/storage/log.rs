//! Append-only reading log
//!
//! One semicolon-delimited CSV file per (sensor, measurement kind), lines of
//! `timestamp;value`, no header, never rewritten or compacted. Appends rely
//! on platform append-mode semantics: one short record per call, written and
//! flushed in a single `write`, so concurrent appenders to different files
//! need no coordination and a reader racing an in-progress append sees at
//! worst one partial trailing line, which the parser skips.

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::key::storage_key;
use crate::storage::types::{Reading, SensorIdentity};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Path of the log file for one sensor identity
pub fn log_path(root: &Path, identity: &SensorIdentity) -> PathBuf {
    root.join(storage_key(identity))
}

/// Append one reading to the identity's log, creating it on first use
pub fn append(root: &Path, identity: &SensorIdentity, reading: Reading) -> StoreResult<()> {
    std::fs::create_dir_all(root)?;

    let path = log_path(root, identity);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let mut writer = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_writer(file);
    writer.write_record([
        reading.timestamp.to_string(),
        reading.value.to_string(),
    ])?;
    writer.flush()?;

    tracing::debug!(
        key = %storage_key(identity),
        timestamp = reading.timestamp,
        value = reading.value,
        "appended reading"
    );
    Ok(())
}

/// Read the full series for one identity, in file (append) order
///
/// Lines that do not split into exactly two parseable fields are skipped
/// with a warning; a torn trailing line from a concurrent append lands here
/// too. Fails with `SeriesNotFound` when no log file exists.
pub fn read_series(root: &Path, identity: &SensorIdentity) -> StoreResult<Vec<Reading>> {
    let key = storage_key(identity);
    let path = root.join(&key);
    if !path.exists() {
        return Err(StoreError::SeriesNotFound { key });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_path(&path)?;

    let mut readings = Vec::new();
    for (line, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(key = %key, line, error = %e, "skipping unreadable log line");
                continue;
            }
        };

        match parse_record(&record) {
            Some(reading) => readings.push(reading),
            None => {
                tracing::warn!(key = %key, line, "skipping malformed log line");
            }
        }
    }

    Ok(readings)
}

/// The most recent reading: the last record in file order, which is append
/// order, not the maximum timestamp (late writes can arrive out of order).
///
/// Fails with `EmptyLog` when the file exists but holds no valid lines.
pub fn last_reading(root: &Path, identity: &SensorIdentity) -> StoreResult<Reading> {
    read_series(root, identity)?
        .pop()
        .ok_or_else(|| StoreError::EmptyLog {
            key: storage_key(identity),
        })
}

fn parse_record(record: &csv::StringRecord) -> Option<Reading> {
    if record.len() != 2 {
        return None;
    }
    let timestamp: i64 = record[0].trim().parse().ok()?;
    let value: f64 = record[1].trim().parse().ok()?;
    Some(Reading { timestamp, value })
}
