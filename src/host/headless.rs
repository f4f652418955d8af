//! In-memory host capabilities for the headless driver and tests.
//!
//! Every type here is a cheap handle: clones share the same state, so a
//! caller can keep one handle for inspection after moving another into a
//! [`Rig`](super::Rig).

use std::cell::RefCell;
use std::rc::Rc;

use tracing::info;

use super::{AudioEmitter, Clip, LevelSequencer, ParticleEmitter, PhysicsBody};

#[derive(Debug, Default)]
struct BodyState {
    roll_deg: f32,
    angular_velocity: f32,
    total_force: f32,
    force_frames: u32,
}

/// Physics body that records forces and roll without integrating motion
#[derive(Debug, Clone, Default)]
pub struct HeadlessBody {
    inner: Rc<RefCell<BodyState>>,
}

impl HeadlessBody {
    pub fn with_roll(roll_deg: f32) -> Self {
        let body = Self::default();
        body.inner.borrow_mut().roll_deg = roll_deg;
        body
    }

    /// Simulate an outside knock that spins the craft
    pub fn knock(&self, angular_velocity: f32) {
        self.inner.borrow_mut().angular_velocity = angular_velocity;
    }

    /// Sum of every force applied so far
    pub fn total_force(&self) -> f32 {
        self.inner.borrow().total_force
    }

    /// Number of frames that applied force
    pub fn force_frames(&self) -> u32 {
        self.inner.borrow().force_frames
    }
}

impl PhysicsBody for HeadlessBody {
    fn add_relative_force(&mut self, up: f32) {
        let mut state = self.inner.borrow_mut();
        state.total_force += up;
        state.force_frames += 1;
    }

    fn angular_velocity(&self) -> f32 {
        self.inner.borrow().angular_velocity
    }

    fn clear_angular_velocity(&mut self) {
        self.inner.borrow_mut().angular_velocity = 0.0;
    }

    fn roll_deg(&self) -> f32 {
        self.inner.borrow().roll_deg
    }

    fn set_roll_deg(&mut self, deg: f32) {
        self.inner.borrow_mut().roll_deg = deg;
    }
}

#[derive(Debug, Default)]
struct AudioState {
    looping: Option<Clip>,
    one_shots: Vec<Clip>,
    loop_starts: u32,
}

/// Audio emitter that keeps a log of what it was asked to play
#[derive(Debug, Clone, Default)]
pub struct HeadlessAudio {
    inner: Rc<RefCell<AudioState>>,
}

impl HeadlessAudio {
    /// Clip currently looping
    pub fn looping(&self) -> Option<Clip> {
        self.inner.borrow().looping
    }

    /// Every one-shot played, oldest first
    pub fn one_shots(&self) -> Vec<Clip> {
        self.inner.borrow().one_shots.clone()
    }

    /// How many times a loop was (re)started
    pub fn loop_starts(&self) -> u32 {
        self.inner.borrow().loop_starts
    }
}

impl AudioEmitter for HeadlessAudio {
    fn play_looped(&mut self, clip: Clip) {
        let mut state = self.inner.borrow_mut();
        state.looping = Some(clip);
        state.loop_starts += 1;
    }

    fn play_one_shot(&mut self, clip: Clip) {
        self.inner.borrow_mut().one_shots.push(clip);
    }

    fn stop(&mut self) {
        self.inner.borrow_mut().looping = None;
    }

    fn is_playing(&self) -> bool {
        self.inner.borrow().looping.is_some()
    }
}

#[derive(Debug, Default)]
struct ParticleState {
    playing: bool,
    starts: u32,
}

/// Particle emitter reduced to an on/off flag
#[derive(Debug, Clone, Default)]
pub struct HeadlessParticles {
    inner: Rc<RefCell<ParticleState>>,
}

impl HeadlessParticles {
    /// How many times the emitter was started
    pub fn starts(&self) -> u32 {
        self.inner.borrow().starts
    }
}

impl ParticleEmitter for HeadlessParticles {
    fn play(&mut self) {
        let mut state = self.inner.borrow_mut();
        state.playing = true;
        state.starts += 1;
    }

    fn stop(&mut self) {
        self.inner.borrow_mut().playing = false;
    }

    fn is_playing(&self) -> bool {
        self.inner.borrow().playing
    }
}

/// Level list that only remembers which index is loaded
#[derive(Debug, Clone)]
pub struct HeadlessLevels {
    current: usize,
    count: usize,
    loads: Vec<usize>,
}

impl HeadlessLevels {
    pub fn new(count: usize, current: usize) -> Self {
        Self {
            current,
            count,
            loads: Vec::new(),
        }
    }

    /// Every index loaded, oldest first
    pub fn loads(&self) -> &[usize] {
        &self.loads
    }
}

impl LevelSequencer for HeadlessLevels {
    fn current(&self) -> usize {
        self.current
    }

    fn count(&self) -> usize {
        self.count
    }

    fn load(&mut self, index: usize) {
        info!(level = index, count = self.count, "Loading level");
        self.current = index;
        self.loads.push(index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let body = HeadlessBody::with_roll(10.0);
        let mut handle = body.clone();
        handle.rotate(5.0);
        handle.add_relative_force(2.5);
        assert_eq!(body.roll_deg(), 15.0);
        assert_eq!(body.total_force(), 2.5);
        assert_eq!(body.force_frames(), 1);
    }

    #[test]
    fn audio_tracks_loop_and_one_shots() {
        let audio = HeadlessAudio::default();
        let mut handle = audio.clone();
        handle.play_looped(Clip::MainEngine);
        handle.play_one_shot(Clip::Win);
        assert!(audio.is_playing());
        handle.stop();
        assert!(!audio.is_playing());
        assert_eq!(audio.one_shots(), vec![Clip::Win]);
        assert_eq!(audio.loop_starts(), 1);
    }

    #[test]
    fn levels_wrap_and_clamp() {
        let mut levels = HeadlessLevels::new(3, 2);
        assert_eq!(levels.advance(), 0);
        assert_eq!(levels.retreat(), 0);
        assert_eq!(levels.advance(), 1);
        assert_eq!(levels.loads(), &[0, 0, 1]);
    }
}
