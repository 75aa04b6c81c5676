//! Durable per-sensor storage
//!
//! The storage root is a plain directory: one append-only CSV log per
//! (sensor, measurement kind) plus a shared `locations.json` document. The
//! root is threaded explicitly through every operation; there is no ambient
//! global path.

pub mod error;
pub mod key;
pub mod locations;
pub mod log;
pub mod types;

pub use error::{StoreError, StoreResult};
pub use key::{parse_storage_key, storage_key, LOG_EXTENSION};
pub use locations::{load_locations, sensor_location, set_sensor_location, LOCATIONS_FILE};
pub use log::{append, last_reading, log_path, read_series};
pub use types::{MeasurementKind, Reading, SensorIdentity};
