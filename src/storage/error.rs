//! Storage error types
//!
//! Defines all errors that can occur in the storage layer.

use thiserror::Error;

/// Errors that can occur in the storage layer
#[derive(Error, Debug)]
pub enum StoreError {
    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV encoding/decoding failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A file name does not follow the storage key convention
    #[error("Malformed storage key: {0}")]
    MalformedKey(String),

    /// No log file exists for the requested sensor identity
    #[error("No reading series stored for {key}")]
    SeriesNotFound { key: String },

    /// The log file exists but holds no valid readings
    #[error("Reading log {key} is empty")]
    EmptyLog { key: String },

    /// Aggregation was asked to summarize an empty series
    #[error("Cannot aggregate an empty reading series")]
    EmptyAggregation,

    /// The locations document has not been created yet
    #[error("No sensor locations have been set")]
    LocationsNotSet,

    /// The locations document exists but has no entry for this sensor
    #[error("No location set for sensor {id}")]
    SensorLocationNotSet { id: u32 },
}

/// Result type alias for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::SensorLocationNotSet { id: 180 };
        assert_eq!(err.to_string(), "No location set for sensor 180");

        let err = StoreError::MalformedKey("notasensor.csv".to_string());
        assert_eq!(err.to_string(), "Malformed storage key: notasensor.csv");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::Io(_)));
    }
}
