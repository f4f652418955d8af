//! Headless simulation driver
//!
//! Replays a [`FlightScript`] against a [`Rocket`] attached to in-memory host
//! capabilities. [`Simulation::step`] advances one fixed tick; [`run`] paces
//! those ticks on a tokio interval.

pub mod script;

pub use script::{ContactSpec, FlightScript, PadSpec, PlatformSpec, Segment};

use std::time::Duration;

use glam::Vec3;
use serde::Serialize;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{info, info_span, Span};
use uuid::Uuid;

use crate::config::FlightConfig;
use crate::flight::{CollisionEvent, FlightState, InputState, TransitionRequest};
use crate::host::headless::{HeadlessAudio, HeadlessBody, HeadlessLevels, HeadlessParticles};
use crate::host::{Clip, LevelSequencer, Rig};
use crate::props::{LandingPad, Oscillator, PadRegistry};
use crate::rocket::{AttachError, Rocket};
use crate::util::time::SimClock;

/// How the most recent attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    InFlight,
    Landed,
    Crashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransitionRecord {
    pub tick: u64,
    pub request: TransitionRequest,
    /// Level loaded by the transition
    pub level: usize,
}

/// Summary of a finished (or interrupted) run
#[derive(Debug, Clone, Serialize)]
pub struct FlightReport {
    pub flight_id: Uuid,
    pub ticks: u64,
    pub elapsed_secs: f32,
    pub outcome: Outcome,
    pub level: usize,
    pub transitions: Vec<TransitionRecord>,
    pub total_thrust: f32,
    pub one_shots: Vec<Clip>,
    pub platform_positions: Vec<Vec3>,
}

#[derive(Debug, Default)]
struct Cursor {
    segment: usize,
    ticks_done: u64,
}

pub struct Simulation {
    flight_id: Uuid,
    span: Span,
    tick_rate: u32,
    clock: SimClock,
    rocket: Rocket,
    body: HeadlessBody,
    audio: HeadlessAudio,
    pads: PadRegistry,
    platforms: Vec<Oscillator>,
    platform_positions: Vec<Vec3>,
    levels: HeadlessLevels,
    script: FlightScript,
    cursor: Cursor,
    touching: Option<CollisionEvent>,
    outcome: Outcome,
    transitions: Vec<TransitionRecord>,
}

impl Simulation {
    pub fn new(
        flight: &FlightConfig,
        tick_rate: u32,
        script: FlightScript,
    ) -> Result<Self, SimError> {
        script.validate()?;

        let flight_id = Uuid::new_v4();
        let span = info_span!("flight", %flight_id);

        let body = HeadlessBody::with_roll(script.craft_roll_deg);
        let audio = HeadlessAudio::default();
        let rig = Rig::new("rocket")
            .with_body(body.clone())
            .with_audio(audio.clone())
            .with_booster(HeadlessParticles::default())
            .with_explosion(HeadlessParticles::default());
        let rocket = span.in_scope(|| Rocket::attach(rig, flight))?;

        let mut pads = PadRegistry::new();
        for spec in &script.pads {
            pads.insert(spec.id, LandingPad::new(spec.key.clone(), spec.roll_deg, spec.lights));
        }

        let platforms: Vec<Oscillator> = script
            .platforms
            .iter()
            .map(|p| Oscillator::new(p.start, p.movement, p.period_secs))
            .collect();
        let platform_positions = platforms.iter().map(Oscillator::start_position).collect();

        Ok(Self {
            flight_id,
            span,
            tick_rate,
            clock: SimClock::new(tick_rate),
            rocket,
            body,
            audio,
            pads,
            platforms,
            platform_positions,
            levels: HeadlessLevels::new(script.levels, script.start_level),
            script,
            cursor: Cursor::default(),
            touching: None,
            outcome: Outcome::default(),
            transitions: Vec::new(),
        })
    }

    pub fn flight_id(&self) -> Uuid {
        self.flight_id
    }

    pub fn rocket(&self) -> &Rocket {
        &self.rocket
    }

    pub fn pads(&self) -> &PadRegistry {
        &self.pads
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Script exhausted and no transition left to fire
    pub fn is_finished(&self) -> bool {
        self.cursor.segment >= self.script.segments.len()
            && self.rocket.controller().pending_transition().is_none()
    }

    /// Advance one tick. Returns false once the run is finished.
    pub fn step(&mut self) -> bool {
        self.skip_spent_segments();
        if self.is_finished() {
            return false;
        }
        let _guard = self.span.clone().entered();

        let (input, spec) = match self.script.segments.get(self.cursor.segment) {
            Some(segment) => (segment.input, segment.contact),
            None => (InputState::default(), None),
        };

        let now = self.clock.advance();
        let contact = self.next_contact(spec);
        let out = self.rocket.tick(
            now,
            self.clock.step(),
            &input,
            contact.as_ref(),
            &mut self.pads,
            &mut self.levels,
        );

        match self.rocket.state() {
            FlightState::Winning => self.outcome = Outcome::Landed,
            FlightState::Dying => self.outcome = Outcome::Crashed,
            _ => {}
        }

        if let Some(request) = out.transition {
            self.transitions.push(TransitionRecord {
                tick: self.clock.ticks(),
                request,
                level: self.levels.current(),
            });
            self.touching = None;
        }

        let elapsed = now.as_secs_f32();
        self.platform_positions = self
            .platforms
            .iter_mut()
            .map(|platform| platform.update(elapsed))
            .collect();

        self.cursor.ticks_done += 1;
        true
    }

    /// Step until the script and any pending transition are done
    pub fn run_to_end(&mut self) -> FlightReport {
        while self.step() {}
        self.report()
    }

    pub fn report(&self) -> FlightReport {
        FlightReport {
            flight_id: self.flight_id,
            ticks: self.clock.ticks(),
            elapsed_secs: self.clock.now().as_secs_f32(),
            outcome: self.outcome,
            level: self.levels.current(),
            transitions: self.transitions.clone(),
            total_thrust: self.body.total_force(),
            one_shots: self.audio.one_shots(),
            platform_positions: self.platform_positions.clone(),
        }
    }

    fn skip_spent_segments(&mut self) {
        while let Some(segment) = self.script.segments.get(self.cursor.segment) {
            if self.cursor.ticks_done < FlightScript::segment_ticks(segment, self.tick_rate) {
                break;
            }
            self.cursor.segment += 1;
            self.cursor.ticks_done = 0;
        }
    }

    /// Contact for this tick. A change of object first reports the old
    /// contact as ended.
    fn next_contact(&mut self, spec: Option<ContactSpec>) -> Option<CollisionEvent> {
        match (self.touching, spec) {
            (Some(prev), next) if next.map(|n| n.other) != Some(prev.other) => {
                self.touching = None;
                Some(CollisionEvent {
                    active: false,
                    ..prev
                })
            }
            (_, Some(next)) => {
                let pad_roll = self.pads.get(next.other).map(|pad| pad.roll_deg);
                let event = CollisionEvent {
                    other: next.other,
                    other_tag: next.tag,
                    other_orientation_deg: next.roll_deg.or(pad_roll).unwrap_or(0.0),
                    active: true,
                };
                self.touching = Some(event);
                Some(event)
            }
            (_, None) => None,
        }
    }
}

/// Drive a simulation at wall-clock pace until it finishes
pub async fn run(mut sim: Simulation, tick_interval: Duration) -> FlightReport {
    let mut ticker = interval(tick_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(flight_id = %sim.flight_id(), ?tick_interval, "Flight started");
    loop {
        ticker.tick().await;
        if !sim.step() {
            break;
        }
    }

    let report = sim.report();
    info!(
        flight_id = %report.flight_id,
        outcome = ?report.outcome,
        level = report.level,
        ticks = report.ticks,
        "Flight finished"
    );
    report
}

/// Simulation setup errors
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Failed to read flight script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid flight script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Flight script declares no levels")]
    NoLevels,

    #[error("Start level {start} is out of range for {count} levels")]
    StartLevelOutOfRange { start: usize, count: usize },

    #[error("Segment {0} has a negative or non-finite duration")]
    InvalidSegment(usize),

    #[error(transparent)]
    Attach(#[from] AttachError),
}
