//! Calendar bucket means
//!
//! Buckets a raw reading series by calendar hour or calendar day in the
//! local timezone and reduces each bucket to its arithmetic mean. Consumers
//! build plot x-axes from the bucket starts, so the same timezone must be
//! used for both; everything here goes through `chrono::Local`.

use crate::storage::error::{StoreError, StoreResult};
use crate::storage::types::Reading;
use chrono::{Datelike, Local, LocalResult, TimeZone, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bucket width for mean aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Hour,
    Day,
}

impl Granularity {
    /// Truncate a unix timestamp to the start of its containing bucket
    fn bucket_start(&self, timestamp: i64) -> i64 {
        let dt = match Local.timestamp_opt(timestamp, 0) {
            LocalResult::Single(dt) => dt,
            // Unreachable for instant -> local conversion, but never panic
            // in the aggregation path
            _ => return timestamp,
        };

        let hour = match self {
            Granularity::Hour => dt.hour(),
            Granularity::Day => 0,
        };

        match Local.with_ymd_and_hms(dt.year(), dt.month(), dt.day(), hour, 0, 0) {
            LocalResult::Single(start) => start.timestamp(),
            // A DST fold makes the wall-clock bucket start ambiguous; take
            // the earlier instant so bucketing stays monotonic
            LocalResult::Ambiguous(earlier, _) => earlier.timestamp(),
            LocalResult::None => timestamp,
        }
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Granularity::Hour => write!(f, "hour"),
            Granularity::Day => write!(f, "day"),
        }
    }
}

/// Mean value per calendar bucket, ascending by bucket start
///
/// Fails with `EmptyAggregation` on an empty input so callers can tell "no
/// data" apart from a bucket that really averaged to zero.
pub fn bucket_mean(series: &[Reading], granularity: Granularity) -> StoreResult<Vec<(i64, f64)>> {
    if series.is_empty() {
        return Err(StoreError::EmptyAggregation);
    }

    let mut buckets: BTreeMap<i64, Vec<f64>> = BTreeMap::new();
    for reading in series {
        buckets
            .entry(granularity.bucket_start(reading.timestamp))
            .or_default()
            .push(reading.value);
    }

    Ok(buckets
        .into_iter()
        .map(|(start, values)| {
            let mean = values.iter().sum::<f64>() / values.len() as f64;
            (start, mean)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> i64 {
        Local
            .with_ymd_and_hms(y, mo, d, h, mi, 0)
            .single()
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_hourly_means() {
        let series = vec![
            Reading::new(local_ts(2024, 6, 1, 0, 15), 1.0),
            Reading::new(local_ts(2024, 6, 1, 0, 45), 3.0),
            Reading::new(local_ts(2024, 6, 1, 1, 10), 5.0),
        ];

        let means = bucket_mean(&series, Granularity::Hour).unwrap();
        assert_eq!(
            means,
            vec![
                (local_ts(2024, 6, 1, 0, 0), 2.0),
                (local_ts(2024, 6, 1, 1, 0), 5.0),
            ]
        );
    }

    #[test]
    fn test_daily_means() {
        let series = vec![
            Reading::new(local_ts(2024, 6, 1, 8, 0), 10.0),
            Reading::new(local_ts(2024, 6, 1, 20, 0), 20.0),
            Reading::new(local_ts(2024, 6, 2, 12, 0), 30.0),
        ];

        let means = bucket_mean(&series, Granularity::Day).unwrap();
        assert_eq!(
            means,
            vec![
                (local_ts(2024, 6, 1, 0, 0), 15.0),
                (local_ts(2024, 6, 2, 0, 0), 30.0),
            ]
        );
    }

    #[test]
    fn test_output_sorted_even_for_unordered_input() {
        let series = vec![
            Reading::new(local_ts(2024, 6, 2, 1, 0), 4.0),
            Reading::new(local_ts(2024, 6, 1, 1, 0), 2.0),
        ];

        let means = bucket_mean(&series, Granularity::Day).unwrap();
        assert!(means[0].0 < means[1].0);
    }

    #[test]
    fn test_empty_series_is_an_error() {
        assert!(matches!(
            bucket_mean(&[], Granularity::Hour),
            Err(StoreError::EmptyAggregation)
        ));
    }
}
