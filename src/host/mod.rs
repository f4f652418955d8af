//! Capabilities the host engine provides to the craft

pub mod headless;
pub mod levels;

pub use levels::{next_level, previous_level};

use serde::Serialize;

/// Sound clips the craft can play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clip {
    MainEngine,
    Death,
    Win,
}

/// Rigid body of the craft
pub trait PhysicsBody {
    /// Force along the body's own up axis
    fn add_relative_force(&mut self, up: f32);
    fn angular_velocity(&self) -> f32;
    fn clear_angular_velocity(&mut self);
    /// Roll angle in degrees
    fn roll_deg(&self) -> f32;
    fn set_roll_deg(&mut self, deg: f32);

    /// Rotate around the roll axis
    fn rotate(&mut self, delta_deg: f32) {
        let roll = self.roll_deg();
        self.set_roll_deg(roll + delta_deg);
    }
}

pub trait AudioEmitter {
    fn play_looped(&mut self, clip: Clip);
    fn play_one_shot(&mut self, clip: Clip);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

pub trait ParticleEmitter {
    fn play(&mut self);
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

/// Ordered list of levels the host can load
pub trait LevelSequencer {
    fn current(&self) -> usize;
    fn count(&self) -> usize;
    fn load(&mut self, index: usize);

    /// Load the next level, wrapping to the first after the last
    fn advance(&mut self) -> usize {
        let next = next_level(self.current(), self.count());
        self.load(next);
        next
    }

    /// Load the previous level, staying on the first
    fn retreat(&mut self) -> usize {
        let prev = previous_level(self.current());
        self.load(prev);
        prev
    }
}

/// The host object a rocket is attached to, with whatever capabilities it carries
#[derive(Default)]
pub struct Rig {
    pub name: String,
    pub body: Option<Box<dyn PhysicsBody>>,
    pub audio: Option<Box<dyn AudioEmitter>>,
    pub booster: Option<Box<dyn ParticleEmitter>>,
    pub explosion: Option<Box<dyn ParticleEmitter>>,
}

impl Rig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_body(mut self, body: impl PhysicsBody + 'static) -> Self {
        self.body = Some(Box::new(body));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioEmitter + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_booster(mut self, booster: impl ParticleEmitter + 'static) -> Self {
        self.booster = Some(Box::new(booster));
        self
    }

    pub fn with_explosion(mut self, explosion: impl ParticleEmitter + 'static) -> Self {
        self.explosion = Some(Box::new(explosion));
        self
    }
}
