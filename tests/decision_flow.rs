//! End-to-end flow: raw controller telemetry JSON through ingestion and into
//! the watering decision, with and without a weather snapshot.

use chrono::Utc;
use waterme::datasources::telemetry;
use waterme::{evaluate, EvaluationPolicy, WateringDecisionEvaluator, WeatherCondition, WeatherSnapshot};

const DRY_CONTROLLER: &str = r#"{
    "mac_address": "AA:BB:CC:DD:EE:FF",
    "location": "Lisbon",
    "sensors": [
        {
            "type": "SMS-v2",
            "watering_threshold": {"min": 30, "max": 80},
            "readings": [
                {"time": "2024-06-01T10:00:00Z", "value": "45.0"},
                {"time": "2024-06-01T12:00:00Z", "value": "20.0"}
            ]
        },
        {
            "type": "temp_dht22",
            "watering_threshold": {"min": 10, "max": 35},
            "readings": [{"time": "2024-06-01T12:00:00Z", "value": "22.0"}]
        },
        {
            "type": "hum_dht22",
            "watering_threshold": {"min": 30, "max": 70},
            "readings": [{"time": "2024-06-01T12:00:00Z", "value": "50.0"}]
        }
    ]
}"#;

fn weather(condition: WeatherCondition, wind_speed_kmh: f64) -> WeatherSnapshot {
    WeatherSnapshot {
        fetched_at: Utc::now(),
        condition,
        wind_speed_kmh,
        cloud_cover_percent: 10.0,
    }
}

#[test]
fn dry_controller_without_weather_waters() {
    let snapshot = telemetry::parse_snapshot(DRY_CONTROLLER).unwrap();
    assert!(!snapshot.location.is_unset());
    assert!(evaluate(&snapshot.sensors, None).unwrap());
}

#[test]
fn rain_overrides_dry_soil() {
    let snapshot = telemetry::parse_snapshot(DRY_CONTROLLER).unwrap();
    let rainy = weather(WeatherCondition::Rain, 5.0);
    assert!(!evaluate(&snapshot.sensors, Some(&rainy)).unwrap());
}

#[test]
fn calm_clear_weather_keeps_verdict() {
    let snapshot = telemetry::parse_snapshot(DRY_CONTROLLER).unwrap();
    let clear = weather(WeatherCondition::Clear, 12.0);
    assert!(evaluate(&snapshot.sensors, Some(&clear)).unwrap());
}

#[test]
fn symmetric_policy_flips_dry_soil_verdict() {
    // Under first-generation semantics a reading below min is out of range,
    // so the same dry controller does not water.
    let snapshot = telemetry::parse_snapshot(DRY_CONTROLLER).unwrap();
    let evaluator = WateringDecisionEvaluator::new(&snapshot.sensors, None)
        .with_policy(EvaluationPolicy::SymmetricRange);
    assert!(!evaluator.evaluate_water_me().unwrap());
}

#[test]
fn bare_controller_approves_vacuously() {
    let json = r#"{"mac_address": "AA:BB", "sensors": []}"#;
    let snapshot = telemetry::parse_snapshot(json).unwrap();
    assert!(snapshot.location.is_unset());
    assert!(evaluate(&snapshot.sensors, None).unwrap());
}
