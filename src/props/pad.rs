//! Landing pad status lights

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::flight::ObjectId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LightColor {
    Red,
    Green,
}

/// A pad whose lights turn green while a craft is settled on it
#[derive(Debug, Clone)]
pub struct LandingPad {
    pub key: String,
    pub roll_deg: f32,
    engaged: bool,
    lights: Vec<LightColor>,
}

impl LandingPad {
    pub fn new(key: impl Into<String>, roll_deg: f32, light_count: usize) -> Self {
        Self {
            key: key.into(),
            roll_deg,
            engaged: false,
            lights: vec![LightColor::Red; light_count],
        }
    }

    pub fn engaged(&self) -> bool {
        self.engaged
    }

    pub fn lights(&self) -> &[LightColor] {
        &self.lights
    }

    pub fn set_engaged(&mut self, engaged: bool) {
        self.engaged = engaged;
        self.refresh_lights();
    }

    pub fn refresh_lights(&mut self) {
        let color = if self.engaged {
            LightColor::Green
        } else {
            LightColor::Red
        };
        self.lights.fill(color);
    }
}

/// Pads in the current level, keyed by scene object
#[derive(Debug, Clone, Default)]
pub struct PadRegistry {
    pads: HashMap<ObjectId, LandingPad>,
}

impl PadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: ObjectId, pad: LandingPad) {
        self.pads.insert(id, pad);
    }

    pub fn get(&self, id: ObjectId) -> Option<&LandingPad> {
        self.pads.get(&id)
    }

    pub fn len(&self) -> usize {
        self.pads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }

    /// Apply an engagement update; unknown objects are ignored
    pub fn set_engaged(&mut self, id: ObjectId, engaged: bool) {
        match self.pads.get_mut(&id) {
            Some(pad) => pad.set_engaged(engaged),
            None => debug!(object = id.0, "Engagement update for unknown pad"),
        }
    }

    /// Disengage every pad, used when a level restarts
    pub fn disengage_all(&mut self) {
        for pad in self.pads.values_mut() {
            pad.set_engaged(false);
        }
    }
}
