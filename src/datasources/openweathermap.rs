use crate::config::OpenWeatherMapConfig;
use crate::error::{Result, WaterMeError};
use crate::models::{Location, WeatherCondition, WeatherSnapshot};
use chrono::Utc;
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

/// Metric-unit responses report wind in m/s; the evaluator works in km/h.
const MS_TO_KMH: f64 = 3.6;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures
#[derive(Debug, Deserialize)]
struct OwmCurrentResponse {
    weather: Vec<OwmWeather>,
    wind: OwmWind,
    clouds: OwmClouds,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    #[allow(dead_code)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwmClouds {
    all: f64, // cloudiness percentage
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the current weather observation for a controller location.
    ///
    /// Returns `Ok(None)` without touching the network when the integration
    /// is disabled or the location is the unset sentinel; the weather signal
    /// is then simply unavailable to the evaluator.
    pub async fn fetch_current(&self, location: &Location) -> Result<Option<WeatherSnapshot>> {
        if !self.config.enabled || location.is_unset() {
            return Ok(None);
        }

        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL,
            location.as_str(),
            self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                WaterMeError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(WaterMeError::DataSourceUnavailable(format!(
                "OpenWeatherMap returned {}: {}",
                status, body
            )));
        }

        let owm_response: OwmCurrentResponse = response.json().await.map_err(|e| {
            WaterMeError::DataSourceUnavailable(format!(
                "Failed to parse OpenWeatherMap response: {}",
                e
            ))
        })?;

        Ok(Some(self.convert_response(owm_response)))
    }

    /// Test connection to OpenWeatherMap API
    pub async fn test_connection(&self, location: &Location) -> Result<bool> {
        if !self.config.enabled || location.is_unset() {
            return Ok(false);
        }

        let url = format!(
            "{}/weather?q={}&appid={}&units=metric",
            API_BASE_URL,
            location.as_str(),
            self.config.api_key
        );

        let response =
            self.client.get(&url).send().await.map_err(|e| {
                WaterMeError::DataSourceUnavailable(format!("OpenWeatherMap: {}", e))
            })?;

        Ok(response.status().is_success())
    }

    fn convert_response(&self, response: OwmCurrentResponse) -> WeatherSnapshot {
        let condition = response
            .weather
            .first()
            .map(|w| WeatherCondition::from_owm_main(&w.main))
            .unwrap_or_default();

        WeatherSnapshot {
            fetched_at: Utc::now(),
            condition,
            wind_speed_kmh: response.wind.speed * MS_TO_KMH,
            cloud_cover_percent: response.clouds.all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> OpenWeatherMapConfig {
        OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            enabled: true,
        }
    }

    fn sample_response(main: &str, wind_ms: f64) -> OwmCurrentResponse {
        OwmCurrentResponse {
            weather: vec![OwmWeather {
                main: main.to_string(),
                description: String::new(),
            }],
            wind: OwmWind { speed: wind_ms },
            clouds: OwmClouds { all: 40.0 },
        }
    }

    #[test]
    fn converts_condition_and_wind_units() {
        let client = OpenWeatherMapClient::new(sample_config());
        let snapshot = client.convert_response(sample_response("Rain", 10.0));
        assert_eq!(snapshot.condition, WeatherCondition::Rain);
        assert!((snapshot.wind_speed_kmh - 36.0).abs() < 0.001);
        assert_eq!(snapshot.cloud_cover_percent, 40.0);
    }

    #[test]
    fn empty_weather_list_defaults_to_clear() {
        let client = OpenWeatherMapClient::new(sample_config());
        let mut response = sample_response("Rain", 5.0);
        response.weather.clear();
        let snapshot = client.convert_response(response);
        assert_eq!(snapshot.condition, WeatherCondition::Clear);
    }

    #[tokio::test]
    async fn sentinel_location_skips_lookup() {
        let client = OpenWeatherMapClient::new(sample_config());
        let snapshot = client.fetch_current(&Location::new("-")).await.unwrap();
        assert!(snapshot.is_none());
    }

    #[tokio::test]
    async fn disabled_integration_skips_lookup() {
        let client = OpenWeatherMapClient::new(OpenWeatherMapConfig {
            api_key: "test_key".to_string(),
            enabled: false,
        });
        let snapshot = client
            .fetch_current(&Location::new("Lisbon"))
            .await
            .unwrap();
        assert!(snapshot.is_none());
    }
}
