use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use waterme::EvaluationPolicy;

#[derive(Parser)]
#[command(name = "waterme", version, about = "Watering decision engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config.yaml
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Path to a controller telemetry snapshot (JSON)
    #[arg(short, long)]
    pub telemetry: Option<PathBuf>,

    /// Soil-moisture evaluation policy
    #[arg(long, value_enum, default_value_t = PolicyArg::Deficit)]
    pub policy: PolicyArg,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate config and telemetry, test the weather connection
    Check,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum PolicyArg {
    /// Soil votes for watering only on a deficit (value below min)
    Deficit,
    /// Soil uses the same in-range check as humidity and temperature
    Symmetric,
}

impl std::fmt::Display for PolicyArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyArg::Deficit => write!(f, "deficit"),
            PolicyArg::Symmetric => write!(f, "symmetric"),
        }
    }
}

impl From<PolicyArg> for EvaluationPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Deficit => EvaluationPolicy::SoilDeficit,
            PolicyArg::Symmetric => EvaluationPolicy::SymmetricRange,
        }
    }
}
