//! Data transfer objects
//!
//! Request and response types for the API endpoints, serialized to/from
//! JSON.

use crate::aggregate::Granularity;
use crate::inventory::SensorRecord;
use serde::{Deserialize, Serialize};

/// Query parameters for the sensor listing
#[derive(Debug, Default, Deserialize)]
pub struct ListSensorsParams {
    /// Attach the full series to every record, not just the last reading
    #[serde(default)]
    pub all_readings: bool,
}

/// GET /sensors response
#[derive(Debug, Serialize)]
pub struct SensorListResponse {
    pub total: usize,
    pub sensors: Vec<SensorRecord>,
}

/// GET /sensors/{id} response: one physical sensor with all of its logged
/// measurement series
#[derive(Debug, Serialize)]
pub struct SensorDetailResponse {
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub measurements: Vec<SensorRecord>,
}

/// PUT /sensors/{id} request body
#[derive(Debug, Deserialize)]
pub struct SetLocationRequest {
    /// Absent or non-string location is a 400, matching the original API
    pub location: Option<String>,
}

/// PUT /sensors/{id} response
#[derive(Debug, Serialize)]
pub struct SetLocationResponse {
    pub id: u32,
    pub location: String,
}

/// Query parameters for GET /sensors/{id}/readings
#[derive(Debug, Deserialize)]
pub struct ReadingsParams {
    /// Measurement kind token (e.g. "temperature")
    pub kind: String,
    pub protocol: String,
    pub model: String,
    /// When set, return calendar bucket means instead of the raw series
    #[serde(default)]
    pub granularity: Option<Granularity>,
}

/// GET /sensors/{id}/readings response: parallel series vectors
#[derive(Debug, Serialize)]
pub struct ReadingSeriesResponse {
    pub timestamps: Vec<i64>,
    pub values: Vec<f64>,
}

/// GET /health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
