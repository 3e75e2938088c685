use crate::error::{Result, WaterMeError};
use crate::models::{Location, Sensor, SensorKind, SensorReading, SensorSet, WateringThreshold};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;

/// Controller telemetry as reported by the ingestion pipeline: free-form
/// sensor type strings, string-encoded reading values, schema defaults for
/// unconfigured thresholds. Conversion to the typed model happens here, once;
/// downstream code never sees raw tags or string values.
#[derive(Debug, Deserialize)]
struct RawController {
    mac_address: String,
    #[serde(default = "default_location")]
    location: String,
    #[serde(default)]
    sensors: Vec<RawSensor>,
}

fn default_location() -> String {
    "-".to_string()
}

#[derive(Debug, Deserialize)]
struct RawSensor {
    #[serde(rename = "type")]
    sensor_type: String,
    #[serde(default)]
    watering_threshold: RawThreshold,
    #[serde(default)]
    readings: Vec<RawReading>,
}

#[derive(Debug, Deserialize)]
struct RawThreshold {
    #[serde(default)]
    min: f64,
    #[serde(default = "default_threshold_max")]
    max: f64,
}

fn default_threshold_max() -> f64 {
    100.0
}

impl Default for RawThreshold {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: default_threshold_max(),
        }
    }
}

/// Firmware reports both fields as strings.
#[derive(Debug, Deserialize)]
struct RawReading {
    time: String,
    value: String,
}

/// One controller's telemetry, fully typed and ready for evaluation.
#[derive(Debug, Clone)]
pub struct ControllerSnapshot {
    pub mac_address: String,
    pub location: Location,
    pub sensors: SensorSet,
}

/// Load a controller telemetry snapshot from a JSON file.
pub fn load_snapshot(path: &Path) -> Result<ControllerSnapshot> {
    let content = std::fs::read_to_string(path)?;
    parse_snapshot(&content)
}

/// Parse a controller telemetry snapshot from JSON.
///
/// Sensors with an unrecognized type string are skipped with a warning;
/// unparsable reading values or timestamps fail the whole snapshot.
pub fn parse_snapshot(json: &str) -> Result<ControllerSnapshot> {
    let raw: RawController = serde_json::from_str(json)?;

    let mut sensors = Vec::with_capacity(raw.sensors.len());
    for raw_sensor in &raw.sensors {
        let Some(kind) = SensorKind::from_type_tag(&raw_sensor.sensor_type) else {
            tracing::warn!(
                sensor_type = %raw_sensor.sensor_type,
                mac_address = %raw.mac_address,
                "skipping sensor with unrecognized type"
            );
            continue;
        };

        let threshold = WateringThreshold::new(
            raw_sensor.watering_threshold.min,
            raw_sensor.watering_threshold.max,
        );

        let readings = raw_sensor
            .readings
            .iter()
            .map(|r| convert_reading(r, kind))
            .collect::<Result<Vec<_>>>()?;

        sensors.push(Sensor::new(kind, threshold, readings));
    }

    Ok(ControllerSnapshot {
        mac_address: raw.mac_address,
        location: Location::new(raw.location),
        sensors: SensorSet::new(sensors),
    })
}

fn convert_reading(raw: &RawReading, kind: SensorKind) -> Result<SensorReading> {
    let value: f64 = raw.value.parse().map_err(|_| {
        WaterMeError::InvalidData(format!(
            "unparsable {} reading value '{}'",
            kind, raw.value
        ))
    })?;

    let timestamp = DateTime::parse_from_rfc3339(&raw.time)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| {
            WaterMeError::InvalidData(format!("unparsable reading timestamp '{}'", raw.time))
        })?;

    Ok(SensorReading { timestamp, value })
}
