//! Decorative level props driven alongside the craft

pub mod oscillator;
pub mod pad;

pub use oscillator::Oscillator;
pub use pad::{LandingPad, LightColor, PadRegistry};
