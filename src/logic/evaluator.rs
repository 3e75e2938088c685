use super::EvaluationPolicy;
use crate::error::{Result, WaterMeError};
use crate::models::{Sensor, SensorKind, SensorSet, Signal, WeatherCondition, WeatherSnapshot};

/// Minimum latest soil-moisture value for the sensor to count as available.
/// Filters out a disconnected or degenerate probe reporting near-zero.
const SOIL_VALIDITY_FLOOR: f64 = 0.1;

/// Wind speed above which watering is pointless (km/h).
const WIND_SPEED_LIMIT_KMH: f64 = 25.0;

/// Point-in-time watering decision over one controller snapshot.
///
/// Four signals feed the verdict: temperature, humidity, soil moisture, and
/// external weather. Each signal is gated behind its own availability check;
/// an unavailable signal passes vacuously and only an available, unfavorably
/// evaluated signal can veto watering. The evaluator is pure and holds no
/// state across calls.
pub struct WateringDecisionEvaluator<'a> {
    sensors: &'a SensorSet,
    weather: Option<&'a WeatherSnapshot>,
    policy: EvaluationPolicy,
}

impl<'a> WateringDecisionEvaluator<'a> {
    pub fn new(sensors: &'a SensorSet, weather: Option<&'a WeatherSnapshot>) -> Self {
        Self {
            sensors,
            weather,
            policy: EvaluationPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: EvaluationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> EvaluationPolicy {
        self.policy
    }

    /// Soil moisture is available only when a sensor exists AND its latest
    /// reading value clears the validity floor. A sensor with no readings
    /// has no latest value and is therefore unavailable.
    pub fn soil_moisture_available(&self) -> bool {
        self.sensors
            .first_of_kind(SensorKind::SoilMoisture)
            .and_then(Sensor::latest_reading)
            .is_some_and(|r| r.value > SOIL_VALIDITY_FLOOR)
    }

    pub fn temperature_available(&self) -> bool {
        self.sensors.has_kind(SensorKind::Temperature)
    }

    pub fn humidity_available(&self) -> bool {
        self.sensors.has_kind(SensorKind::Humidity)
    }

    pub fn weather_available(&self) -> bool {
        self.weather.is_some()
    }

    /// True while humidity sits inside the sensor's tolerable range.
    pub fn evaluate_humidity(&self) -> Result<bool> {
        let (sensor, value) = self.sensor_with_latest(SensorKind::Humidity, Signal::Humidity)?;
        Ok(sensor.threshold().contains(value))
    }

    /// True while temperature sits inside the sensor's tolerable range.
    pub fn evaluate_temperature(&self) -> Result<bool> {
        let (sensor, value) =
            self.sensor_with_latest(SensorKind::Temperature, Signal::Temperature)?;
        Ok(sensor.threshold().contains(value))
    }

    /// True when the soil votes for watering under the configured policy
    /// (default: deficit-only, `value < min`).
    pub fn evaluate_soil_moisture(&self) -> Result<bool> {
        let (sensor, value) =
            self.sensor_with_latest(SensorKind::SoilMoisture, Signal::SoilMoisture)?;
        Ok(self.policy.evaluate_soil(value, sensor.threshold()))
    }

    /// True when wind makes watering pointless.
    pub fn evaluate_wind(&self) -> Result<bool> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.wind_speed_kmh > WIND_SPEED_LIMIT_KMH)
    }

    /// True when it is currently raining.
    pub fn evaluate_rain(&self) -> Result<bool> {
        let snapshot = self.snapshot()?;
        Ok(snapshot.condition == WeatherCondition::Rain)
    }

    /// The watering verdict: the conjunction of all four signals, each gated
    /// behind its own availability check. An unavailable signal approves
    /// vacuously; favorable weather means neither rain nor strong wind.
    pub fn evaluate_water_me(&self) -> Result<bool> {
        let temperature_ok = if self.temperature_available() {
            self.evaluate_temperature()?
        } else {
            true
        };

        let humidity_ok = if self.humidity_available() {
            self.evaluate_humidity()?
        } else {
            true
        };

        let soil_ok = if self.soil_moisture_available() {
            self.evaluate_soil_moisture()?
        } else {
            true
        };

        let weather_ok = if self.weather_available() {
            !(self.evaluate_rain()? || self.evaluate_wind()?)
        } else {
            true
        };

        tracing::debug!(
            temperature_ok,
            humidity_ok,
            soil_ok,
            weather_ok,
            "watering signals evaluated"
        );

        Ok(temperature_ok && humidity_ok && soil_ok && weather_ok)
    }

    fn sensor_with_latest(&self, kind: SensorKind, signal: Signal) -> Result<(&Sensor, f64)> {
        let sensor = self
            .sensors
            .first_of_kind(kind)
            .ok_or(WaterMeError::MissingSignal(signal))?;
        let reading = sensor
            .latest_reading()
            .ok_or(WaterMeError::EmptyReadings(kind))?;
        Ok((sensor, reading.value))
    }

    fn snapshot(&self) -> Result<&WeatherSnapshot> {
        self.weather.ok_or(WaterMeError::MissingSignal(Signal::Weather))
    }
}

/// Evaluate one controller snapshot under the default policy. This is the
/// single public entry point for callers that do not need policy selection.
pub fn evaluate(sensors: &SensorSet, weather: Option<&WeatherSnapshot>) -> Result<bool> {
    WateringDecisionEvaluator::new(sensors, weather).evaluate_water_me()
}
