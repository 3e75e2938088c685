use crate::models::{SensorKind, Signal};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaterMeError {
    #[error("Signal evaluated without an availability check: {0}")]
    MissingSignal(Signal),

    #[error("Sensor has no readings: {0}")]
    EmptyReadings(SensorKind),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, WaterMeError>;
