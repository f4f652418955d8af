//! Flight scripts replayed by the headless driver

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::Deserialize;

use crate::flight::{InputState, ObjectId, Tag};

use super::SimError;

const DEMO_SCRIPT: &str = include_str!("../../flights/demo.json");

/// A scripted flight: the level layout plus timed input segments
#[derive(Debug, Clone, Deserialize)]
pub struct FlightScript {
    /// Roll of the craft at spawn
    #[serde(default)]
    pub craft_roll_deg: f32,
    #[serde(default = "default_level_count")]
    pub levels: usize,
    #[serde(default)]
    pub start_level: usize,
    #[serde(default)]
    pub pads: Vec<PadSpec>,
    #[serde(default)]
    pub platforms: Vec<PlatformSpec>,
    pub segments: Vec<Segment>,
}

fn default_level_count() -> usize {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct PadSpec {
    pub id: ObjectId,
    pub key: String,
    #[serde(default)]
    pub roll_deg: f32,
    #[serde(default)]
    pub lights: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformSpec {
    pub start: Vec3,
    pub movement: Vec3,
    pub period_secs: f32,
}

/// Input and contact held for `secs`
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub secs: f32,
    #[serde(default)]
    pub input: InputState,
    #[serde(default)]
    pub contact: Option<ContactSpec>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ContactSpec {
    pub other: ObjectId,
    pub tag: Tag,
    /// Roll of the touched object; pads fall back to their own roll
    #[serde(default)]
    pub roll_deg: Option<f32>,
}

impl FlightScript {
    pub fn from_json(raw: &str) -> Result<Self, SimError> {
        let script: Self = serde_json::from_str(raw)?;
        script.validate()?;
        Ok(script)
    }

    pub fn from_path(path: &Path) -> Result<Self, SimError> {
        let raw = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Lift off, steer and settle on the pad
    pub fn demo() -> Result<Self, SimError> {
        Self::from_json(DEMO_SCRIPT)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.levels == 0 {
            return Err(SimError::NoLevels);
        }
        if self.start_level >= self.levels {
            return Err(SimError::StartLevelOutOfRange {
                start: self.start_level,
                count: self.levels,
            });
        }
        if let Some(index) = self
            .segments
            .iter()
            .position(|s| !s.secs.is_finite() || s.secs < 0.0)
        {
            return Err(SimError::InvalidSegment(index));
        }
        Ok(())
    }

    /// Number of ticks a segment lasts at `tick_rate`
    pub fn segment_ticks(segment: &Segment, tick_rate: u32) -> u64 {
        (segment.secs * tick_rate as f32).round() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_script_parses() {
        let script = FlightScript::demo().unwrap();
        assert!(script.levels > 1);
        assert!(!script.segments.is_empty());
        assert!(script.pads.iter().any(|p| p.key == "landing"));
    }

    #[test]
    fn rejects_bad_layouts() {
        let err = FlightScript::from_json(r#"{"levels": 0, "segments": []}"#).unwrap_err();
        assert!(matches!(err, SimError::NoLevels));

        let err = FlightScript::from_json(r#"{"levels": 2, "start_level": 2, "segments": []}"#)
            .unwrap_err();
        assert!(matches!(err, SimError::StartLevelOutOfRange { start: 2, count: 2 }));

        let err = FlightScript::from_json(r#"{"segments": [{"secs": 1.0}, {"secs": -1.0}]}"#)
            .unwrap_err();
        assert!(matches!(err, SimError::InvalidSegment(1)));

        let err = FlightScript::from_json("not json").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn segment_ticks_round_to_the_nearest_tick() {
        let segment = Segment {
            secs: 0.51,
            input: InputState::default(),
            contact: None,
        };
        assert_eq!(FlightScript::segment_ticks(&segment, 60), 31);
    }
}
