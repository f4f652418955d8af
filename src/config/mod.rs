//! Configuration module - environment variable parsing

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::util::time::DEFAULT_TICK_RATE;

/// Which build the controller runs in. Debug cheats only exist in development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    Production,
    Development,
}

impl BuildMode {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }
}

impl FromStr for BuildMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" | "release" => Ok(Self::Production),
            "development" | "dev" | "debug" => Ok(Self::Development),
            _ => Err(ConfigError::Invalid("BOOST_BUILD_MODE")),
        }
    }
}

/// Gameplay tuning for the flight controller
#[derive(Clone, Debug)]
pub struct FlightConfig {
    /// Up-axis force per second of held thrust
    pub thrust_speed: f32,
    /// Degrees per second of controlled roll
    pub rotation_speed: f32,
    /// Maximum craft/pad roll difference for a good landing (degrees)
    pub landing_allowance_deg: f32,
    /// Continuous good orientation needed to complete a landing
    pub landing_hold: Duration,
    /// Delay between winning/dying and the level transition
    pub transition_delay: Duration,
    /// Whether lethal contacts kill the craft at startup
    pub collisions_enabled: bool,
    /// Gates the debug cheats
    pub build_mode: BuildMode,
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            thrust_speed: 200.0,
            rotation_speed: 100.0,
            landing_allowance_deg: 10.0,
            landing_hold: Duration::from_secs(3),
            transition_delay: Duration::from_secs(3),
            collisions_enabled: true,
            build_mode: BuildMode::Production,
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Simulation ticks per second
    pub tick_rate: u32,
    /// Optional flight script to replay instead of the built-in demo
    pub script_path: Option<PathBuf>,
    /// Controller tuning
    pub flight: FlightConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = FlightConfig::default();

        let tick_rate = parse_or(&lookup, "BOOST_TICK_RATE", DEFAULT_TICK_RATE)?;
        if tick_rate == 0 {
            return Err(ConfigError::Invalid("BOOST_TICK_RATE"));
        }

        let flight = FlightConfig {
            thrust_speed: parse_or(&lookup, "BOOST_THRUST_SPEED", defaults.thrust_speed)?,
            rotation_speed: parse_or(&lookup, "BOOST_ROTATION_SPEED", defaults.rotation_speed)?,
            landing_allowance_deg: parse_or(
                &lookup,
                "BOOST_LANDING_ALLOWANCE_DEG",
                defaults.landing_allowance_deg,
            )?,
            landing_hold: parse_secs_or(&lookup, "BOOST_LANDING_HOLD_SECS", defaults.landing_hold)?,
            transition_delay: parse_secs_or(
                &lookup,
                "BOOST_TRANSITION_DELAY_SECS",
                defaults.transition_delay,
            )?,
            collisions_enabled: parse_or(&lookup, "BOOST_COLLISIONS", defaults.collisions_enabled)?,
            build_mode: match lookup("BOOST_BUILD_MODE") {
                Some(raw) => raw.parse()?,
                None => defaults.build_mode,
            },
        };

        if flight.landing_allowance_deg < 0.0 {
            return Err(ConfigError::Invalid("BOOST_LANDING_ALLOWANCE_DEG"));
        }

        Ok(Self {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            tick_rate,
            script_path: lookup("BOOST_SCRIPT").map(PathBuf::from),
            flight,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        None => Ok(default),
    }
}

fn parse_secs_or<F>(
    lookup: &F,
    key: &'static str,
    default: Duration,
) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => {
            let secs: f64 = raw.trim().parse().map_err(|_| ConfigError::Invalid(key))?;
            Duration::try_from_secs_f64(secs).map_err(|_| ConfigError::Invalid(key))
        }
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
