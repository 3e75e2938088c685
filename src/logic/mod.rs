pub mod evaluator;
pub mod policy;

pub use evaluator::{evaluate, WateringDecisionEvaluator};
pub use policy::EvaluationPolicy;
