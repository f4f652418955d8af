//! Boost flight controller
//!
//! Frame-driven flight and landing logic for a rocket lander:
//! - `flight`: the per-tick state machine (thrust, rotation, collisions, landing)
//! - `host`: capability traits the engine provides, plus headless implementations
//! - `rocket`: binds a controller to a host object and applies its commands
//! - `props`: landing pad lights and oscillating platforms
//! - `sim`: scripted headless driver

pub mod config;
pub mod flight;
pub mod host;
pub mod props;
pub mod rocket;
pub mod sim;
pub mod util;

pub use config::{BuildMode, Config, FlightConfig};
pub use flight::FlightController;
pub use rocket::{AttachError, Rocket};
