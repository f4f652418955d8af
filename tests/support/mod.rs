#![allow(dead_code)]

use std::time::Duration;

use boost_flight::config::FlightConfig;
use boost_flight::flight::{CollisionEvent, FrameOutput, InputState, ObjectId, Tag};
use boost_flight::host::headless::{HeadlessAudio, HeadlessBody, HeadlessLevels, HeadlessParticles};
use boost_flight::host::Rig;
use boost_flight::props::{LandingPad, PadRegistry};
use boost_flight::Rocket;

pub const TICK: Duration = Duration::from_millis(20);
pub const PAD: ObjectId = ObjectId(2);
pub const SECOND_PAD: ObjectId = ObjectId(3);
pub const ROCK: ObjectId = ObjectId(9);

/// A rocket on headless capabilities, with handles kept for inspection
pub struct Harness {
    pub rocket: Rocket,
    pub body: HeadlessBody,
    pub audio: HeadlessAudio,
    pub booster: HeadlessParticles,
    pub explosion: HeadlessParticles,
    pub pads: PadRegistry,
    pub levels: HeadlessLevels,
    pub tick: u32,
}

impl Harness {
    pub fn new(config: FlightConfig, craft_roll: f32, levels: HeadlessLevels) -> Self {
        let body = HeadlessBody::with_roll(craft_roll);
        let audio = HeadlessAudio::default();
        let booster = HeadlessParticles::default();
        let explosion = HeadlessParticles::default();
        let rig = Rig::new("rocket")
            .with_body(body.clone())
            .with_audio(audio.clone())
            .with_booster(booster.clone())
            .with_explosion(explosion.clone());
        let rocket = Rocket::attach(rig, &config).expect("complete rig attaches");

        let mut pads = PadRegistry::new();
        pads.insert(PAD, LandingPad::new("landing", 0.0, 2));
        pads.insert(SECOND_PAD, LandingPad::new("landing_east", 0.0, 2));

        Self {
            rocket,
            body,
            audio,
            booster,
            explosion,
            pads,
            levels,
            tick: 0,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(FlightConfig::default(), 0.0, HeadlessLevels::new(3, 1))
    }

    pub fn step(&mut self, input: InputState, contact: Option<CollisionEvent>) -> FrameOutput {
        self.tick += 1;
        self.rocket.tick(
            TICK * self.tick,
            TICK,
            &input,
            contact.as_ref(),
            &mut self.pads,
            &mut self.levels,
        )
    }

    /// Step for `secs` of simulated time with the same frame
    pub fn hold(
        &mut self,
        secs: f32,
        input: InputState,
        contact: Option<CollisionEvent>,
    ) -> Vec<FrameOutput> {
        let ticks = (secs / TICK.as_secs_f32()).round() as u32;
        (0..ticks).map(|_| self.step(input, contact)).collect()
    }

    pub fn pad_engaged(&self) -> bool {
        self.is_engaged(PAD)
    }

    pub fn is_engaged(&self, pad: ObjectId) -> bool {
        self.pads.get(pad).is_some_and(LandingPad::engaged)
    }
}

pub fn thrust() -> InputState {
    InputState {
        thrust_held: true,
        ..Default::default()
    }
}

pub fn touching(other: ObjectId, tag: Tag, roll_deg: f32) -> CollisionEvent {
    CollisionEvent {
        other,
        other_tag: tag,
        other_orientation_deg: roll_deg,
        active: true,
    }
}
