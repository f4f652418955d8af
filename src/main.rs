//! Boost flight simulator - headless replay of a scripted flight
//!
//! Loads configuration from the environment, replays a flight script
//! (`BOOST_SCRIPT`, or the built-in demo landing) at the configured tick
//! rate and prints the flight report as JSON.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use boost_flight::config::Config;
use boost_flight::sim::{self, FlightScript, Simulation};
use boost_flight::util::time::tick_duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    info!("Starting Boost flight simulator");
    info!(
        tick_rate = config.tick_rate,
        build_mode = ?config.flight.build_mode,
        "Simulation settings"
    );

    let script = match &config.script_path {
        Some(path) => {
            info!(path = %path.display(), "Loading flight script");
            FlightScript::from_path(path)?
        }
        None => FlightScript::demo()?,
    };

    let simulation = Simulation::new(&config.flight, config.tick_rate, script)?;
    let report = sim::run(simulation, tick_duration(config.tick_rate)).await;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json()))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_target(true)))
        .init();
}
