//! Flight and landing state machine

pub mod controller;
pub mod landing;
pub mod timer;

pub use controller::FlightController;
pub use landing::{orientation_difference, LandingSession};
pub use timer::TransitionTimer;

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Identity of a collidable object in the host scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u32);

/// Input snapshot sampled once per frame by the host
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputState {
    /// Thrust key held
    pub thrust_held: bool,
    /// Rotate-left key held
    pub rotate_left_held: bool,
    /// Rotate-right key held
    pub rotate_right_held: bool,
    /// Skip-level cheat pressed this frame
    pub debug_next_level: bool,
    /// Collision cheat pressed this frame
    pub debug_toggle_collisions: bool,
}

/// Classification label of the object the craft touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Tag {
    Friendly,
    Fuel,
    Landing,
    Launching,
    Lethal,
}

impl From<&str> for Tag {
    /// Unknown labels are lethal.
    fn from(s: &str) -> Self {
        match s {
            "Friendly" => Self::Friendly,
            "Fuel" => Self::Fuel,
            "Landing" => Self::Landing,
            "Launching" => Self::Launching,
            _ => Self::Lethal,
        }
    }
}

impl From<String> for Tag {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

/// Current contact state with another object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub other: ObjectId,
    pub other_tag: Tag,
    /// Roll of the other object in degrees
    pub other_orientation_deg: f32,
    /// False on the frame the contact ends
    pub active: bool,
}

/// Flight phase of the craft
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightState {
    Flying,
    /// Settled on a pad with good orientation
    Landing(LandingSession),
    Winning,
    Dying,
}

impl FlightState {
    /// Winning and Dying only end with a level transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Winning | Self::Dying)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Flying => "flying",
            Self::Landing(_) => "landing",
            Self::Winning => "winning",
            Self::Dying => "dying",
        }
    }
}

/// Per-frame context supplied by the driver
#[derive(Debug, Clone, Copy)]
pub struct FrameContext {
    /// Simulation time of this frame
    pub now: Duration,
    /// Time since the previous frame
    pub delta: Duration,
    /// Craft roll in degrees before this frame's rotation
    pub craft_roll_deg: f32,
}

/// Audio command for the craft's emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AudioCue {
    /// Keep the engine loop running, never restart it
    EngineLoop,
    Stop,
    /// Stop the engine loop, then the one-shot win jingle
    Win,
    /// Stop everything, then the one-shot death sound
    Death,
}

/// Particle command for the craft's emitters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleCue {
    BoosterOn,
    BoosterOff,
    /// Booster off, explosion on
    Explosion,
}

/// Level change requested from the host sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionRequest {
    /// Next level, wrapping to the first
    Advance,
    /// Previous level, clamped at the first
    Retreat,
}

/// Commands emitted by one controller update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    /// Up-axis force to apply this frame
    pub thrust: Option<f32>,
    /// Clear externally induced angular velocity
    pub clear_spin: bool,
    /// Controlled roll change in degrees (left positive)
    pub rotation_delta_deg: f32,
    pub audio: Option<AudioCue>,
    pub particles: Option<ParticleCue>,
    pub transition: Option<TransitionRequest>,
    /// Pad engagement changes, applied in order
    pub pad_engaged: Vec<(ObjectId, bool)>,
}

impl FrameOutput {
    /// True when the frame carries no command at all
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_are_lethal() {
        assert_eq!(Tag::from("Landing"), Tag::Landing);
        assert_eq!(Tag::from("Obstacle"), Tag::Lethal);
        assert_eq!(Tag::from("landing"), Tag::Lethal);
    }

    #[test]
    fn tags_deserialize_from_strings() {
        let tags: Vec<Tag> = serde_json::from_str(r#"["Fuel", "Launching", "Wall"]"#).unwrap();
        assert_eq!(tags, vec![Tag::Fuel, Tag::Launching, Tag::Lethal]);
    }

    #[test]
    fn missing_input_fields_default_to_released() {
        let input: InputState = serde_json::from_str(r#"{"thrust_held": true}"#).unwrap();
        assert!(input.thrust_held);
        assert!(!input.rotate_left_held);
        assert!(!input.debug_next_level);
    }
}
