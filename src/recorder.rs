//! Sensor hub event recorder
//!
//! Translates the hub's per-event callback tuple into a `SensorIdentity`
//! plus `Reading` and appends it. This is the only write path into the
//! reading log. Event delivery happens on the hub's own loop, so a handled
//! event must never panic and must not block beyond the single filesystem
//! append.

use crate::storage::error::StoreResult;
use crate::storage::types::{MeasurementKind, Reading, SensorIdentity};
use crate::storage::{self, storage_key};
use std::path::PathBuf;

/// One event as delivered by the sensor hub
#[derive(Debug, Clone)]
pub struct SensorEvent {
    pub protocol: String,
    pub model: String,
    pub id: u32,
    /// Hub bitmask datatype code (1=temperature, 2=humidity, ...)
    pub datatype: u32,
    pub value: f64,
    /// Unix seconds
    pub timestamp: i64,
    /// Hub callback correlation id, carried through for log tracing
    pub correlation_id: u32,
}

/// Appends incoming hub events to per-sensor logs under one storage root
#[derive(Debug, Clone)]
pub struct Recorder {
    root: PathBuf,
}

impl Recorder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Handle one hub event
    ///
    /// Events with a datatype code outside the known table are logged and
    /// dropped; storage failures propagate to the dispatch loop, which
    /// decides whether to keep running.
    pub fn handle(&self, event: &SensorEvent) -> StoreResult<()> {
        let Some(kind) = MeasurementKind::from_hub_code(event.datatype) else {
            tracing::warn!(
                sensor_id = event.id,
                datatype = event.datatype,
                correlation_id = event.correlation_id,
                "dropping event with unknown datatype code"
            );
            return Ok(());
        };

        let identity = SensorIdentity::new(&event.protocol, &event.model, event.id, kind);
        storage::append(
            &self.root,
            &identity,
            Reading::new(event.timestamp, event.value),
        )?;

        tracing::debug!(
            key = %storage_key(&identity),
            correlation_id = event.correlation_id,
            "recorded hub event"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn event(datatype: u32, value: f64, timestamp: i64) -> SensorEvent {
        SensorEvent {
            protocol: "oregon".to_string(),
            model: "1a2d".to_string(),
            id: 180,
            datatype,
            value,
            timestamp,
            correlation_id: 7,
        }
    }

    #[test]
    fn test_events_land_in_per_kind_logs() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::new(dir.path());

        recorder.handle(&event(1, 20.5, 100)).unwrap();
        recorder.handle(&event(2, 55.0, 100)).unwrap();
        recorder.handle(&event(1, 21.0, 200)).unwrap();

        let temp = SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::Temperature);
        let humid = SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::Humidity);
        assert_eq!(storage::read_series(dir.path(), &temp).unwrap().len(), 2);
        assert_eq!(storage::read_series(dir.path(), &humid).unwrap().len(), 1);
    }

    #[test]
    fn test_unknown_datatype_is_dropped_not_fatal() {
        let dir = tempdir().unwrap();
        let recorder = Recorder::new(dir.path());

        recorder.handle(&event(128, 1.0, 100)).unwrap();
        assert!(crate::inventory::list_sensors(dir.path(), false)
            .unwrap()
            .is_empty());
    }
}
