//! sensorlog CLI
//!
//! Command-line interface for the sensor reading store:
//! - List the sensor inventory
//! - Set a sensor's location
//! - Export plot-ready hourly/daily mean series
//! - Record hub events piped on stdin

use anyhow::Context;
use clap::{Parser, Subcommand};
use sensorlog::aggregate::{bucket_mean, Granularity};
use sensorlog::config::Config;
use sensorlog::inventory::list_sensors;
use sensorlog::recorder::{Recorder, SensorEvent};
use sensorlog::storage::{set_sensor_location, Reading};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "sensorlog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Append-only logger and query tool for wireless environmental sensors")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage root (default: from config / SENSORLOG_DATA_DIR)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all logged sensor series
    List {
        /// Print every reading, not just the latest
        #[arg(long)]
        all: bool,
    },

    /// Set a sensor's human-readable location
    SetLocation {
        /// Numeric sensor id
        id: u32,
        /// Free-text location (e.g. "greenhouse")
        location: String,
    },

    /// Export hourly and daily mean series as JSON, keyed by location
    Export {
        /// Measurement kinds to include (default: temperature, humidity)
        #[arg(short, long)]
        kind: Vec<String>,
    },

    /// Record hub events from stdin, one per line:
    /// protocol;model;id;datatype;value[;timestamp]
    Record,
}

fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config);

    let cli = Cli::parse();
    let root = cli.data_dir.unwrap_or_else(|| config.data_dir());
    tracing::debug!(root = %root.display(), "using storage root");

    match cli.command {
        Commands::List { all } => {
            let records = list_sensors(&root, all)?;
            if records.is_empty() {
                println!("no sensors found in {}", root.display());
                return Ok(());
            }

            for record in records {
                let location = record.location.as_deref().unwrap_or("-");
                println!(
                    "{:>6}  {:<14} {:<10} {:<12} {:>12}  {:>10}  {}",
                    record.id,
                    record.kind,
                    record.protocol,
                    record.model,
                    record.last_reading.timestamp,
                    record.last_reading.value,
                    location
                );
                if all {
                    if let (Some(timestamps), Some(values)) =
                        (&record.timestamps, &record.values)
                    {
                        for (ts, value) in timestamps.iter().zip(values) {
                            println!("        {};{}", ts, value);
                        }
                    }
                }
            }
        }

        Commands::SetLocation { id, location } => {
            set_sensor_location(&root, id, &location)?;
            println!("sensor {} location set to {:?}", id, location);
        }

        Commands::Export { kind } => {
            let kinds = if kind.is_empty() {
                vec!["temperature".to_string(), "humidity".to_string()]
            } else {
                kind
            };
            let export = export_mean_series(&root, &kinds)?;
            println!("{}", serde_json::to_string_pretty(&export)?);
        }

        Commands::Record => {
            record_from_stdin(&root)?;
        }
    }

    Ok(())
}

/// Plot-ready series: one entry per (sensor, kind, granularity), keyed
/// `{location-or-id}_{kind}_{hour|day}`
fn export_mean_series(
    root: &std::path::Path,
    kinds: &[String],
) -> anyhow::Result<BTreeMap<String, SeriesExport>> {
    let mut export = BTreeMap::new();

    for record in list_sensors(root, true)? {
        if !kinds.iter().any(|k| k.eq_ignore_ascii_case(record.kind.token())) {
            continue;
        }

        let (Some(timestamps), Some(values)) = (&record.timestamps, &record.values) else {
            continue;
        };
        let series: Vec<Reading> = timestamps
            .iter()
            .zip(values)
            .map(|(&timestamp, &value)| Reading { timestamp, value })
            .collect();

        let label = record
            .location
            .clone()
            .unwrap_or_else(|| record.id.to_string());

        for granularity in [Granularity::Hour, Granularity::Day] {
            let means = bucket_mean(&series, granularity)
                .with_context(|| format!("aggregating {}_{}", label, record.kind))?;
            let (timestamps, values) = means.into_iter().unzip();
            export.insert(
                format!("{}_{}_{}", label, record.kind, granularity),
                SeriesExport { timestamps, values },
            );
        }
    }

    Ok(export)
}

#[derive(serde::Serialize)]
struct SeriesExport {
    timestamps: Vec<i64>,
    values: Vec<f64>,
}

/// Feed semicolon-delimited hub events from stdin into the recorder
fn record_from_stdin(root: &std::path::Path) -> anyhow::Result<()> {
    let recorder = Recorder::new(root);
    let stdin = std::io::stdin();

    let mut recorded = 0u64;
    for (line_no, line) in stdin.lock().lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        match parse_event_line(&line, line_no as u32) {
            Some(event) => {
                recorder.handle(&event)?;
                recorded += 1;
            }
            None => {
                tracing::warn!(line = line_no, "skipping malformed event line");
            }
        }
    }

    tracing::info!(recorded, "events saved to {}", root.display());
    Ok(())
}

fn parse_event_line(line: &str, correlation_id: u32) -> Option<SensorEvent> {
    let fields: Vec<&str> = line.trim().split(';').collect();
    if fields.len() < 5 || fields.len() > 6 {
        return None;
    }

    let timestamp = match fields.get(5) {
        Some(raw) => raw.parse().ok()?,
        None => chrono::Utc::now().timestamp(),
    };

    Some(SensorEvent {
        protocol: fields[0].to_string(),
        model: fields[1].to_string(),
        id: fields[2].parse().ok()?,
        datatype: fields[3].parse().ok()?,
        value: fields[4].parse().ok()?,
        timestamp,
        correlation_id,
    })
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("sensorlog={}", config.logging.level).into());

    if config.logging.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sensorlog::storage::{append, MeasurementKind, SensorIdentity};
    use tempfile::tempdir;

    #[test]
    fn test_parse_event_line() {
        let event = parse_event_line("oregon;1a2d;180;1;20.5;100", 3).unwrap();
        assert_eq!(event.protocol, "oregon");
        assert_eq!(event.id, 180);
        assert_eq!(event.datatype, 1);
        assert_eq!(event.value, 20.5);
        assert_eq!(event.timestamp, 100);
        assert_eq!(event.correlation_id, 3);
    }

    #[test]
    fn test_parse_event_line_defaults_timestamp_to_now() {
        let before = chrono::Utc::now().timestamp();
        let event = parse_event_line("oregon;1a2d;180;2;55.0", 0).unwrap();
        assert!(event.timestamp >= before);
    }

    #[test]
    fn test_parse_event_line_rejects_garbage() {
        assert!(parse_event_line("not an event", 0).is_none());
        assert!(parse_event_line("oregon;1a2d;x;1;20.5", 0).is_none());
        assert!(parse_event_line("oregon;1a2d;180;1;20.5;100;extra", 0).is_none());
    }

    #[test]
    fn test_export_groups_by_location_and_granularity() {
        let dir = tempdir().unwrap();
        let identity = SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::Temperature);
        append(dir.path(), &identity, Reading::new(1_700_000_000, 20.0)).unwrap();
        append(dir.path(), &identity, Reading::new(1_700_000_060, 22.0)).unwrap();
        set_sensor_location(dir.path(), 180, "greenhouse").unwrap();

        let export = export_mean_series(dir.path(), &["temperature".to_string()]).unwrap();
        let keys: Vec<&str> = export.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["greenhouse_temperature_day", "greenhouse_temperature_hour"]
        );

        let hourly = &export["greenhouse_temperature_hour"];
        assert_eq!(hourly.values, vec![21.0]);
    }

    #[test]
    fn test_export_skips_other_kinds() {
        let dir = tempdir().unwrap();
        let identity = SensorIdentity::new("oregon", "1a2d", 180, MeasurementKind::WindGust);
        append(dir.path(), &identity, Reading::new(1_700_000_000, 4.2)).unwrap();

        let export = export_mean_series(dir.path(), &["temperature".to_string()]).unwrap();
        assert!(export.is_empty());
    }
}
