use crate::models::WateringThreshold;
use serde::{Deserialize, Serialize};

/// How the soil-moisture reading is turned into a "water now" vote.
///
/// Humidity and temperature always use the symmetric in-range check; only the
/// soil-moisture semantics differ between the two controller firmware
/// generations, so the policy applies to that signal alone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationPolicy {
    /// First-generation semantics: soil moisture votes for watering while the
    /// reading sits inside the configured range, same as humidity and
    /// temperature.
    SymmetricRange,
    /// Second-generation semantics: soil moisture votes for watering only on
    /// a deficit, `value < min`. The upper bound is ignored.
    #[default]
    SoilDeficit,
}

impl EvaluationPolicy {
    pub fn evaluate_soil(&self, value: f64, threshold: &WateringThreshold) -> bool {
        match self {
            EvaluationPolicy::SymmetricRange => threshold.contains(value),
            EvaluationPolicy::SoilDeficit => value < threshold.min(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EvaluationPolicy::SymmetricRange => "symmetric-range",
            EvaluationPolicy::SoilDeficit => "soil-deficit",
        }
    }
}

impl std::fmt::Display for EvaluationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
