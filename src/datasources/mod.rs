pub mod openweathermap;
pub mod telemetry;

pub use openweathermap::OpenWeatherMapClient;
pub use telemetry::ControllerSnapshot;
