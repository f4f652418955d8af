//! Binds a flight controller to the host capabilities of one craft

use std::time::Duration;

use tracing::info;

use crate::config::FlightConfig;
use crate::flight::{
    AudioCue, CollisionEvent, FlightController, FlightState, FrameContext, FrameOutput,
    InputState, ParticleCue, TransitionRequest,
};
use crate::host::{AudioEmitter, Clip, LevelSequencer, ParticleEmitter, PhysicsBody, Rig};
use crate::props::PadRegistry;

/// A craft whose required capabilities were all present at attach time
pub struct Rocket {
    name: String,
    controller: FlightController,
    spawn_roll_deg: f32,
    body: Box<dyn PhysicsBody>,
    audio: Box<dyn AudioEmitter>,
    booster: Box<dyn ParticleEmitter>,
    explosion: Box<dyn ParticleEmitter>,
}

impl Rocket {
    /// Take ownership of the rig's capabilities, failing fast on any missing one
    pub fn attach(rig: Rig, config: &FlightConfig) -> Result<Self, AttachError> {
        let Rig {
            name,
            body,
            audio,
            booster,
            explosion,
        } = rig;

        let body = body.ok_or_else(|| AttachError::MissingBody(name.clone()))?;
        let audio = audio.ok_or_else(|| AttachError::MissingAudio(name.clone()))?;
        let booster = booster.ok_or_else(|| AttachError::MissingBooster(name.clone()))?;
        let explosion = explosion.ok_or_else(|| AttachError::MissingExplosion(name.clone()))?;

        info!(rocket = %name, build_mode = ?config.build_mode, "Rocket attached");

        Ok(Self {
            spawn_roll_deg: body.roll_deg(),
            name,
            controller: FlightController::new(config),
            body,
            audio,
            booster,
            explosion,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &FlightState {
        self.controller.state()
    }

    pub fn controller(&self) -> &FlightController {
        &self.controller
    }

    pub fn roll_deg(&self) -> f32 {
        self.body.roll_deg()
    }

    /// Run one frame and apply its commands to the host
    pub fn tick(
        &mut self,
        now: Duration,
        delta: Duration,
        input: &InputState,
        contact: Option<&CollisionEvent>,
        pads: &mut PadRegistry,
        levels: &mut dyn LevelSequencer,
    ) -> FrameOutput {
        let before = self.controller.state().name();
        let ctx = FrameContext {
            now,
            delta,
            craft_roll_deg: self.body.roll_deg(),
        };
        let out = self.controller.update(ctx, input, contact);

        let after = self.controller.state().name();
        if before != after {
            info!(rocket = %self.name, from = before, to = after, "Flight state changed");
        }

        self.apply_motion(&out);
        self.apply_audio(out.audio);
        self.apply_particles(out.particles);

        for &(pad, engaged) in &out.pad_engaged {
            pads.set_engaged(pad, engaged);
        }

        if let Some(request) = out.transition {
            self.load_level(request, pads, levels);
        }

        out
    }

    fn apply_motion(&mut self, out: &FrameOutput) {
        if let Some(force) = out.thrust {
            self.body.add_relative_force(force);
        }
        if out.clear_spin {
            self.body.clear_angular_velocity();
        }
        if out.rotation_delta_deg != 0.0 {
            self.body.rotate(out.rotation_delta_deg);
        }
    }

    fn apply_audio(&mut self, cue: Option<AudioCue>) {
        match cue {
            Some(AudioCue::EngineLoop) => {
                if !self.audio.is_playing() {
                    self.audio.play_looped(Clip::MainEngine);
                }
            }
            Some(AudioCue::Stop) => self.audio.stop(),
            Some(AudioCue::Win) => {
                self.audio.stop();
                self.audio.play_one_shot(Clip::Win);
            }
            Some(AudioCue::Death) => {
                self.audio.stop();
                self.audio.play_one_shot(Clip::Death);
            }
            None => {}
        }
    }

    fn apply_particles(&mut self, cue: Option<ParticleCue>) {
        match cue {
            Some(ParticleCue::BoosterOn) => {
                if !self.booster.is_playing() {
                    self.booster.play();
                }
            }
            Some(ParticleCue::BoosterOff) => self.booster.stop(),
            Some(ParticleCue::Explosion) => {
                self.booster.stop();
                self.explosion.play();
            }
            None => {}
        }
    }

    /// Load the requested level and respawn the craft on it
    fn load_level(
        &mut self,
        request: TransitionRequest,
        pads: &mut PadRegistry,
        levels: &mut dyn LevelSequencer,
    ) {
        let from = levels.current();
        let to = match request {
            TransitionRequest::Advance => levels.advance(),
            TransitionRequest::Retreat => levels.retreat(),
        };
        info!(rocket = %self.name, ?request, from, to, "Level transition");

        self.controller.reset();
        self.body.set_roll_deg(self.spawn_roll_deg);
        self.body.clear_angular_velocity();
        self.audio.stop();
        self.booster.stop();
        self.explosion.stop();
        pads.disengage_all();
    }
}

/// Attach failures, each naming the object missing the capability
#[derive(Debug, thiserror::Error)]
pub enum AttachError {
    #[error("'{0}' does not have a physics body")]
    MissingBody(String),

    #[error("'{0}' does not have an audio emitter")]
    MissingAudio(String),

    #[error("'{0}' does not have a booster particle system")]
    MissingBooster(String),

    #[error("'{0}' does not have an explosion particle system")]
    MissingExplosion(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::headless::{HeadlessAudio, HeadlessBody, HeadlessParticles};

    fn full_rig() -> Rig {
        Rig::new("rocket")
            .with_body(HeadlessBody::default())
            .with_audio(HeadlessAudio::default())
            .with_booster(HeadlessParticles::default())
            .with_explosion(HeadlessParticles::default())
    }

    #[test]
    fn attach_accepts_complete_rig() {
        let rocket = Rocket::attach(full_rig(), &FlightConfig::default()).unwrap();
        assert_eq!(rocket.name(), "rocket");
        assert_eq!(rocket.state(), &FlightState::Flying);
    }

    #[test]
    fn attach_rejects_each_missing_capability() {
        let config = FlightConfig::default();

        let mut rig = full_rig();
        rig.body = None;
        let err = Rocket::attach(rig, &config).err().unwrap();
        assert!(matches!(err, AttachError::MissingBody(ref name) if name == "rocket"));
        assert_eq!(err.to_string(), "'rocket' does not have a physics body");

        let mut rig = full_rig();
        rig.audio = None;
        assert!(matches!(
            Rocket::attach(rig, &config),
            Err(AttachError::MissingAudio(_))
        ));

        let mut rig = full_rig();
        rig.booster = None;
        assert!(matches!(
            Rocket::attach(rig, &config),
            Err(AttachError::MissingBooster(_))
        ));

        let mut rig = full_rig();
        rig.explosion = None;
        assert!(matches!(
            Rocket::attach(rig, &config),
            Err(AttachError::MissingExplosion(_))
        ));
    }
}
