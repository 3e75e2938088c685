pub mod config;
pub mod datasources;
pub mod error;
pub mod logic;
pub mod models;

pub use error::{Result, WaterMeError};
pub use logic::{evaluate, EvaluationPolicy, WateringDecisionEvaluator};
pub use models::{
    Location, Sensor, SensorKind, SensorReading, SensorSet, Signal, WateringThreshold,
    WeatherCondition, WeatherSnapshot,
};
