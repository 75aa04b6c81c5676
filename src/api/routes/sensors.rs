//! Sensor routes
//!
//! - GET /sensors - List all logged sensor series
//! - GET /sensors/{id} - One physical sensor with all its series
//! - PUT /sensors/{id} - Set the sensor's location
//! - GET /sensors/{id}/readings - Raw or bucket-mean series for one key

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use std::sync::Arc;

use crate::aggregate::bucket_mean;
use crate::api::dto::{
    ListSensorsParams, ReadingSeriesResponse, ReadingsParams, SensorDetailResponse,
    SensorListResponse, SetLocationRequest, SetLocationResponse,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::inventory::{list_sensors, reading_series, SensorRecord};
use crate::storage::types::{MeasurementKind, Reading};
use crate::storage;

/// GET /sensors
pub async fn get_sensors(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListSensorsParams>,
) -> ApiResult<Json<SensorListResponse>> {
    let sensors = list_sensors(state.root(), params.all_readings)?;

    Ok(Json(SensorListResponse {
        total: sensors.len(),
        sensors,
    }))
}

/// GET /sensors/:id
pub async fn get_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(params): Query<ListSensorsParams>,
) -> ApiResult<Json<SensorDetailResponse>> {
    let measurements: Vec<SensorRecord> = list_sensors(state.root(), params.all_readings)?
        .into_iter()
        .filter(|record| record.id == id)
        .collect();

    if measurements.is_empty() {
        return Err(ApiError::NotFound(format!("Sensor {} is unknown", id)));
    }

    let location = measurements.iter().find_map(|r| r.location.clone());

    Ok(Json(SensorDetailResponse {
        id,
        location,
        measurements,
    }))
}

/// PUT /sensors/:id
///
/// Any body that does not carry a location string is a 400: missing body,
/// unparseable JSON, a non-string location, or a wrong content type all
/// land in the same rejection.
pub async fn put_sensor(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    payload: Result<Json<SetLocationRequest>, JsonRejection>,
) -> ApiResult<Json<SetLocationResponse>> {
    let location = payload
        .map_err(|rejection| ApiError::Validation(rejection.body_text()))?
        .0
        .location
        .ok_or_else(|| ApiError::Validation("Request body must carry a location".to_string()))?;

    let known = list_sensors(state.root(), false)?
        .iter()
        .any(|record| record.id == id);
    if !known {
        return Err(ApiError::NotFound(format!("Sensor {} is unknown", id)));
    }

    storage::set_sensor_location(state.root(), id, &location)?;
    tracing::info!(sensor_id = id, location = %location, "set sensor location");

    Ok(Json(SetLocationResponse { id, location }))
}

/// GET /sensors/:id/readings
pub async fn get_readings(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u32>,
    Query(params): Query<ReadingsParams>,
) -> ApiResult<Json<ReadingSeriesResponse>> {
    let kind = MeasurementKind::from_token(&params.kind);
    let (timestamps, values) =
        reading_series(state.root(), id, kind, &params.protocol, &params.model)?;

    let (timestamps, values) = match params.granularity {
        None => (timestamps, values),
        Some(granularity) => {
            let series: Vec<Reading> = timestamps
                .iter()
                .zip(&values)
                .map(|(&timestamp, &value)| Reading { timestamp, value })
                .collect();
            bucket_mean(&series, granularity)?.into_iter().unzip()
        }
    };

    Ok(Json(ReadingSeriesResponse { timestamps, values }))
}
