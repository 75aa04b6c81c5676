//! # sensorlog
//!
//! Durable logging and querying for wireless environmental sensors
//! (temperature, humidity, rain, wind).
//!
//! Readings arrive as hub events and land in append-only CSV logs, one file
//! per (sensor, measurement kind) under a storage root. A shared
//! `locations.json` document names where each physical sensor sits. On top
//! of the raw logs sit an inventory scanner, calendar-bucket mean
//! aggregation, and a small REST API.
//!
//! ## Modules
//!
//! - [`storage`]: Filename codec, reading log, and location index
//! - [`inventory`]: Directory scan joining series, latest readings, locations
//! - [`aggregate`]: Hourly/daily mean series
//! - [`recorder`]: Hub event to log append translation
//! - [`api`]: REST API server with Axum
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use sensorlog::storage::{append, MeasurementKind, Reading, SensorIdentity};
//! use sensorlog::inventory::list_sensors;
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let root = Path::new("./sensorlog_data");
//!
//!     let identity = SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::Temperature);
//!     append(root, &identity, Reading::new(1_700_000_000, 20.5))?;
//!
//!     for sensor in list_sensors(root, false)? {
//!         println!("{} {} = {}", sensor.id, sensor.kind, sensor.last_reading.value);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod api;
pub mod config;
pub mod inventory;
pub mod recorder;
pub mod storage;

// Re-export top-level types for convenience
pub use aggregate::{bucket_mean, Granularity};
pub use api::{build_router, serve, ApiError, ApiResult, AppState};
pub use config::{ApiServerConfig, Config, ConfigError, LoggingConfig, StorageConfig};
pub use inventory::{list_sensors, reading_series, SensorRecord};
pub use recorder::{Recorder, SensorEvent};
pub use storage::{MeasurementKind, Reading, SensorIdentity, StoreError, StoreResult};
