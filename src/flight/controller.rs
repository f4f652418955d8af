//! Per-frame flight controller

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::FlightConfig;

use super::landing::{is_oriented_within, LandingSession};
use super::timer::{fire_if_due, TransitionTimer};
use super::{
    AudioCue, CollisionEvent, FlightState, FrameContext, FrameOutput, InputState, ParticleCue, Tag,
    TransitionRequest,
};

/// Decides thrust, rotation, collision outcome and landing for one craft.
///
/// The controller never touches host objects. Each call to [`update`] turns
/// one frame of input and contact state into a [`FrameOutput`] that the
/// binding layer applies.
///
/// [`update`]: FlightController::update
#[derive(Debug, Clone)]
pub struct FlightController {
    config: FlightConfig,
    state: FlightState,
    collisions_enabled: bool,
    pending: Option<TransitionTimer>,
}

impl FlightController {
    pub fn new(config: &FlightConfig) -> Self {
        Self {
            config: config.clone(),
            state: FlightState::Flying,
            collisions_enabled: config.collisions_enabled,
            pending: None,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn config(&self) -> &FlightConfig {
        &self.config
    }

    /// Input latch, set once winning or dying begins
    pub fn is_input_ignored(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn collisions_enabled(&self) -> bool {
        self.collisions_enabled
    }

    pub fn landing_session(&self) -> Option<&LandingSession> {
        match &self.state {
            FlightState::Landing(session) => Some(session),
            _ => None,
        }
    }

    /// Transition scheduled by winning or dying, if not yet fired
    pub fn pending_transition(&self) -> Option<&TransitionTimer> {
        self.pending.as_ref()
    }

    /// Back to a fresh flight. Cancels any scheduled transition.
    pub fn reset(&mut self) {
        self.state = FlightState::Flying;
        self.collisions_enabled = self.config.collisions_enabled;
        self.pending = None;
    }

    /// Run one simulation tick
    pub fn update(
        &mut self,
        ctx: FrameContext,
        input: &InputState,
        contact: Option<&CollisionEvent>,
    ) -> FrameOutput {
        let mut out = FrameOutput::default();

        if self.state.is_terminal() {
            out.transition = fire_if_due(&mut self.pending, ctx.now);
            return out;
        }

        let dt = ctx.delta.as_secs_f32();
        self.apply_thrust(input, dt, &mut out);
        self.apply_rotation(input, dt, &mut out);

        if let Some(contact) = contact {
            let craft_roll = ctx.craft_roll_deg + out.rotation_delta_deg;
            self.process_contact(ctx.now, craft_roll, contact, &mut out);
        }

        if let FlightState::Landing(session) = self.state {
            if session.is_complete(ctx.now, self.config.landing_hold) {
                self.enter_winning(ctx.now, &mut out);
            }
        }

        if !self.state.is_terminal() {
            self.apply_debug_options(input, &mut out);
        }

        out
    }

    fn apply_thrust(&self, input: &InputState, dt: f32, out: &mut FrameOutput) {
        if input.thrust_held {
            out.thrust = Some(self.config.thrust_speed * dt);
            out.audio = Some(AudioCue::EngineLoop);
            out.particles = Some(ParticleCue::BoosterOn);
        } else {
            out.audio = Some(AudioCue::Stop);
            out.particles = Some(ParticleCue::BoosterOff);
        }
    }

    fn apply_rotation(&self, input: &InputState, dt: f32, out: &mut FrameOutput) {
        out.clear_spin = true;

        // Steering needs the engine lit; both keys together cancel out.
        if !input.thrust_held || (input.rotate_left_held && input.rotate_right_held) {
            return;
        }

        let step = self.config.rotation_speed * dt;
        if input.rotate_left_held {
            out.rotation_delta_deg = step;
        } else if input.rotate_right_held {
            out.rotation_delta_deg = -step;
        }
    }

    fn process_contact(
        &mut self,
        now: Duration,
        craft_roll_deg: f32,
        contact: &CollisionEvent,
        out: &mut FrameOutput,
    ) {
        if !contact.active {
            self.leave_contact(contact, out);
            return;
        }

        match contact.other_tag {
            Tag::Launching => {}
            // Refuelling was never finished; touching fuel is harmless.
            Tag::Fuel => {}
            Tag::Landing => self.evaluate_landing(now, craft_roll_deg, contact, out),
            Tag::Friendly | Tag::Lethal => {
                if self.collisions_enabled {
                    self.enter_dying(now, out);
                } else {
                    debug!(other = contact.other.0, "Lethal contact ignored, collisions disabled");
                }
            }
        }
    }

    fn leave_contact(&mut self, contact: &CollisionEvent, out: &mut FrameOutput) {
        let closes_session =
            matches!(self.state, FlightState::Landing(session) if session.pad == contact.other);
        if closes_session {
            debug!(pad = contact.other.0, "Left pad before landing completed");
            self.state = FlightState::Flying;
        }
        if closes_session || contact.other_tag == Tag::Landing {
            out.pad_engaged.push((contact.other, false));
        }
    }

    fn evaluate_landing(
        &mut self,
        now: Duration,
        craft_roll_deg: f32,
        contact: &CollisionEvent,
        out: &mut FrameOutput,
    ) {
        let good = is_oriented_within(
            craft_roll_deg,
            contact.other_orientation_deg,
            self.config.landing_allowance_deg,
        );

        // A session belongs to one pad; touching another one starts over.
        if let FlightState::Landing(session) = self.state {
            if session.pad != contact.other {
                debug!(
                    from = session.pad.0,
                    to = contact.other.0,
                    "Moved to another pad, landing restarted"
                );
                out.pad_engaged.push((session.pad, false));
                self.state = FlightState::Flying;
            }
        }
        out.pad_engaged.push((contact.other, good));

        match self.state {
            FlightState::Flying if good => {
                debug!(pad = contact.other.0, ?now, "Landing session opened");
                self.state = FlightState::Landing(LandingSession::open(contact.other, now));
            }
            FlightState::Landing(session) if !good => {
                debug!(
                    pad = session.pad.0,
                    craft_roll_deg,
                    pad_roll_deg = contact.other_orientation_deg,
                    "Landing aborted, orientation out of allowance"
                );
                self.state = FlightState::Flying;
            }
            _ => {}
        }
    }

    fn enter_winning(&mut self, now: Duration, out: &mut FrameOutput) {
        info!(?now, "Landing complete");
        self.state = FlightState::Winning;
        self.pending = Some(TransitionTimer::schedule(
            TransitionRequest::Advance,
            now,
            self.config.transition_delay,
        ));
        out.audio = Some(AudioCue::Win);
        out.particles = Some(ParticleCue::BoosterOff);
    }

    fn enter_dying(&mut self, now: Duration, out: &mut FrameOutput) {
        info!(?now, "Craft destroyed");
        if let FlightState::Landing(session) = self.state {
            out.pad_engaged.push((session.pad, false));
        }
        self.state = FlightState::Dying;
        self.pending = Some(TransitionTimer::schedule(
            TransitionRequest::Retreat,
            now,
            self.config.transition_delay,
        ));
        out.audio = Some(AudioCue::Death);
        out.particles = Some(ParticleCue::Explosion);
    }

    fn apply_debug_options(&mut self, input: &InputState, out: &mut FrameOutput) {
        if !self.config.build_mode.is_development() {
            return;
        }

        if input.debug_next_level {
            warn!("Debug skip to next level");
            out.transition = Some(TransitionRequest::Advance);
        }

        if input.debug_toggle_collisions {
            self.collisions_enabled = !self.collisions_enabled;
            warn!(enabled = self.collisions_enabled, "Debug collision toggle");
        }
    }
}
