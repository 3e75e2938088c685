use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sensor classification, decided once at ingestion time.
///
/// Controller firmware reports free-form type strings; a sensor is classified
/// by the first tag its type string contains, checked in a fixed order so a
/// string matching more than one tag resolves deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SensorKind {
    SoilMoisture,
    Temperature,
    Humidity,
}

impl SensorKind {
    /// Tag match is substring-based and case-sensitive, matching the
    /// controller firmware's reporting convention ("SMS-v2", "temp_dht22", ...).
    pub fn from_type_tag(type_tag: &str) -> Option<Self> {
        if type_tag.contains("SMS") {
            Some(SensorKind::SoilMoisture)
        } else if type_tag.contains("temp") {
            Some(SensorKind::Temperature)
        } else if type_tag.contains("hum") {
            Some(SensorKind::Humidity)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SensorKind::SoilMoisture => "soil moisture",
            SensorKind::Temperature => "temperature",
            SensorKind::Humidity => "humidity",
        }
    }
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single telemetry data point. Readings are appended in collection order;
/// the ingestion layer guarantees the last element is the chronologically
/// latest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

/// Tolerable range for a sensor's readings. Both bounds are exclusive:
/// a value is in range iff `min < value < max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WateringThreshold {
    min: f64,
    max: f64,
}

impl WateringThreshold {
    /// `min <= max` is the responsibility of upstream configuration;
    /// an inverted range simply never contains anything.
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, value: f64) -> bool {
        value > self.min && value < self.max
    }
}

impl Default for WateringThreshold {
    fn default() -> Self {
        // Controller schema defaults for an unconfigured sensor.
        Self {
            min: 0.0,
            max: 100.0,
        }
    }
}

/// One physical sensor attached to a controller: its classification, the
/// configured watering threshold, and the reading history for the current
/// snapshot. Fields are read-only after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sensor {
    kind: SensorKind,
    threshold: WateringThreshold,
    readings: Vec<SensorReading>,
}

impl Sensor {
    pub fn new(kind: SensorKind, threshold: WateringThreshold, readings: Vec<SensorReading>) -> Self {
        Self {
            kind,
            threshold,
            readings,
        }
    }

    pub fn kind(&self) -> SensorKind {
        self.kind
    }

    pub fn threshold(&self) -> &WateringThreshold {
        &self.threshold
    }

    pub fn readings(&self) -> &[SensorReading] {
        &self.readings
    }

    /// Structurally last reading; `None` when the sensor has reported nothing.
    pub fn latest_reading(&self) -> Option<&SensorReading> {
        self.readings.last()
    }
}

/// The sensors of one controller at one point in time. Unordered, zero or
/// more sensors per kind; lookups are first-match-wins.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensorSet {
    sensors: Vec<Sensor>,
}

impl SensorSet {
    pub fn new(sensors: Vec<Sensor>) -> Self {
        Self { sensors }
    }

    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sensor> {
        self.sensors.iter()
    }

    pub fn has_kind(&self, kind: SensorKind) -> bool {
        self.sensors.iter().any(|s| s.kind() == kind)
    }

    pub fn first_of_kind(&self, kind: SensorKind) -> Option<&Sensor> {
        self.sensors.iter().find(|s| s.kind() == kind)
    }
}

impl From<Vec<Sensor>> for SensorSet {
    fn from(sensors: Vec<Sensor>) -> Self {
        Self::new(sensors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reading(value: f64) -> SensorReading {
        SensorReading {
            timestamp: Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap(),
            value,
        }
    }

    #[test]
    fn kind_from_type_tag_substring_match() {
        assert_eq!(
            SensorKind::from_type_tag("SMS-v2"),
            Some(SensorKind::SoilMoisture)
        );
        assert_eq!(
            SensorKind::from_type_tag("temp_dht22"),
            Some(SensorKind::Temperature)
        );
        assert_eq!(
            SensorKind::from_type_tag("hum_dht22"),
            Some(SensorKind::Humidity)
        );
        assert_eq!(SensorKind::from_type_tag("pressure"), None);
    }

    #[test]
    fn kind_from_type_tag_is_case_sensitive() {
        assert_eq!(SensorKind::from_type_tag("sms"), None);
        assert_eq!(SensorKind::from_type_tag("Temp"), None);
    }

    #[test]
    fn kind_from_type_tag_collision_resolves_in_fixed_order() {
        // A string matching two tags classifies as the first in match order.
        assert_eq!(
            SensorKind::from_type_tag("temp_hum_combo"),
            Some(SensorKind::Temperature)
        );
        assert_eq!(
            SensorKind::from_type_tag("SMS_temp"),
            Some(SensorKind::SoilMoisture)
        );
    }

    #[test]
    fn threshold_bounds_are_exclusive() {
        let t = WateringThreshold::new(40.0, 60.0);
        assert!(t.contains(50.0));
        assert!(!t.contains(40.0));
        assert!(!t.contains(60.0));
        assert!(!t.contains(61.0));
    }

    #[test]
    fn threshold_default_matches_controller_schema() {
        let t = WateringThreshold::default();
        assert_eq!(t.min(), 0.0);
        assert_eq!(t.max(), 100.0);
    }

    #[test]
    fn latest_reading_is_last_element() {
        let sensor = Sensor::new(
            SensorKind::Temperature,
            WateringThreshold::default(),
            vec![reading(10.0), reading(20.0), reading(30.0)],
        );
        assert_eq!(sensor.latest_reading().map(|r| r.value), Some(30.0));
    }

    #[test]
    fn latest_reading_none_when_empty() {
        let sensor = Sensor::new(SensorKind::Humidity, WateringThreshold::default(), vec![]);
        assert!(sensor.latest_reading().is_none());
    }

    #[test]
    fn first_of_kind_is_first_match() {
        let set = SensorSet::new(vec![
            Sensor::new(
                SensorKind::Humidity,
                WateringThreshold::new(0.0, 50.0),
                vec![reading(1.0)],
            ),
            Sensor::new(
                SensorKind::Humidity,
                WateringThreshold::new(0.0, 99.0),
                vec![reading(2.0)],
            ),
        ]);
        let first = set.first_of_kind(SensorKind::Humidity).unwrap();
        assert_eq!(first.threshold().max(), 50.0);
    }

    #[test]
    fn has_kind_reflects_membership() {
        let set = SensorSet::new(vec![Sensor::new(
            SensorKind::SoilMoisture,
            WateringThreshold::default(),
            vec![reading(0.5)],
        )]);
        assert!(set.has_kind(SensorKind::SoilMoisture));
        assert!(!set.has_kind(SensorKind::Temperature));
    }
}
