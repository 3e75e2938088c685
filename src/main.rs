mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;
use waterme::config::Config;
use waterme::datasources::{telemetry, OpenWeatherMapClient};
use waterme::error::{Result, WaterMeError};
use waterme::models::WeatherSnapshot;
use waterme::WateringDecisionEvaluator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging; -v for debug, -vv for trace
    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Some(Commands::Check) => check(&cli).await,
        None => evaluate(&cli).await,
    }
}

async fn evaluate(cli: &Cli) -> Result<()> {
    let telemetry_path = cli.telemetry.as_ref().ok_or_else(|| {
        WaterMeError::Config("No telemetry snapshot given (use --telemetry <file>)".into())
    })?;
    let snapshot = telemetry::load_snapshot(telemetry_path)?;

    tracing::debug!(
        mac_address = %snapshot.mac_address,
        location = %snapshot.location,
        sensors = snapshot.sensors.len(),
        "loaded controller telemetry"
    );

    let weather = fetch_weather(cli, &snapshot.location).await;

    let evaluator = WateringDecisionEvaluator::new(&snapshot.sensors, weather.as_ref())
        .with_policy(cli.policy.into());
    let verdict = evaluator.evaluate_water_me()?;

    let signal_status = [
        ("soil", evaluator.soil_moisture_available()),
        ("temperature", evaluator.temperature_available()),
        ("humidity", evaluator.humidity_available()),
        ("weather", evaluator.weather_available()),
    ]
    .map(|(name, available)| format!("{}: {}", name, if available { "OK" } else { "ABSENT" }))
    .join(" | ");

    println!("{}", signal_status);
    println!("Water now: {}", if verdict { "yes" } else { "no" });

    Ok(())
}

async fn check(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.clone())?;
    println!("Config: OK");

    let Some(telemetry_path) = cli.telemetry.as_ref() else {
        println!("Telemetry: skipped (no --telemetry given)");
        return Ok(());
    };

    let snapshot = telemetry::load_snapshot(telemetry_path)?;
    println!(
        "Telemetry: OK ({} sensors, location '{}')",
        snapshot.sensors.len(),
        snapshot.location
    );

    match config.openweathermap {
        Some(owm) if !snapshot.location.is_unset() => {
            let client = OpenWeatherMapClient::new(owm);
            if client.test_connection(&snapshot.location).await? {
                println!("OpenWeatherMap: OK");
            } else {
                println!("OpenWeatherMap: OFFLINE");
            }
        }
        Some(_) => println!("OpenWeatherMap: skipped (controller location unset)"),
        None => println!("OpenWeatherMap: not configured"),
    }

    Ok(())
}

/// Resolve the optional weather snapshot. Any failure downgrades to an
/// unavailable weather signal rather than blocking the evaluation.
async fn fetch_weather(
    cli: &Cli,
    location: &waterme::models::Location,
) -> Option<WeatherSnapshot> {
    if !Config::exists(cli.config.as_ref()) {
        return None;
    }

    let config = match Config::load(cli.config.clone()) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to load config, proceeding without weather: {}", e);
            return None;
        }
    };

    let owm = config.openweathermap?;
    let client = OpenWeatherMapClient::new(owm);
    match client.fetch_current(location).await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Weather lookup failed, proceeding without weather: {}", e);
            None
        }
    }
}
