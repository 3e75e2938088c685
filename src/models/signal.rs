use serde::{Deserialize, Serialize};

/// One of the four independent inputs to the watering decision.
///
/// Each signal is either available (backed by data in the current snapshot)
/// or not; an unavailable signal never blocks watering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Temperature,
    Humidity,
    SoilMoisture,
    Weather,
}

impl Signal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Temperature => "temperature",
            Signal::Humidity => "humidity",
            Signal::SoilMoisture => "soil moisture",
            Signal::Weather => "weather",
        }
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
