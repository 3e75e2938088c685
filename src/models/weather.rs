use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weather condition categories from OpenWeatherMap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum WeatherCondition {
    #[default]
    Clear,
    Clouds,
    Rain,
    Drizzle,
    Thunderstorm,
    Snow,
    Mist,
    Fog,
    Other,
}

impl WeatherCondition {
    /// Map an OpenWeatherMap `weather.main` value. Exact match against the
    /// fixed API vocabulary; anything unrecognized is `Other`.
    pub fn from_owm_main(main: &str) -> Self {
        match main {
            "Clear" => WeatherCondition::Clear,
            "Clouds" => WeatherCondition::Clouds,
            "Rain" => WeatherCondition::Rain,
            "Drizzle" => WeatherCondition::Drizzle,
            "Thunderstorm" => WeatherCondition::Thunderstorm,
            "Snow" => WeatherCondition::Snow,
            "Mist" => WeatherCondition::Mist,
            "Fog" => WeatherCondition::Fog,
            _ => WeatherCondition::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WeatherCondition::Clear => "Clear",
            WeatherCondition::Clouds => "Cloudy",
            WeatherCondition::Rain => "Rain",
            WeatherCondition::Drizzle => "Drizzle",
            WeatherCondition::Thunderstorm => "Thunderstorm",
            WeatherCondition::Snow => "Snow",
            WeatherCondition::Mist => "Mist",
            WeatherCondition::Fog => "Fog",
            WeatherCondition::Other => "Other",
        }
    }
}

impl std::fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A fully-resolved point-in-time weather observation. Constructed by the
/// weather datasource after a successful lookup; the evaluator only ever
/// sees a complete snapshot or none at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub fetched_at: DateTime<Utc>,
    pub condition: WeatherCondition,
    pub wind_speed_kmh: f64,
    pub cloud_cover_percent: f64,
}

/// Controller location used to key the weather lookup. The controller schema
/// defaults to `"-"` for units without a configured location, which disables
/// weather integration entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location(String);

impl Location {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_empty() || self.0 == "-"
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
