//! Sine-wave platform motion

use std::f32::consts::TAU;

use glam::Vec3;

/// Moves a platform back and forth between its start and `start + movement`
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub movement_vector: Vec3,
    pub period_secs: f32,
    pub enabled: bool,
    /// 0 = at start, 1 = fully displaced
    movement_factor: f32,
    start_position: Vec3,
}

impl Oscillator {
    pub fn new(start_position: Vec3, movement_vector: Vec3, period_secs: f32) -> Self {
        Self {
            movement_vector,
            period_secs,
            enabled: true,
            movement_factor: 0.0,
            start_position,
        }
    }

    /// Pin the platform at a fixed fraction of its travel
    pub fn with_factor(mut self, factor: f32) -> Self {
        self.movement_factor = factor.clamp(0.0, 1.0);
        self
    }

    pub fn movement_factor(&self) -> f32 {
        self.movement_factor
    }

    pub fn start_position(&self) -> Vec3 {
        self.start_position
    }

    /// Position at `elapsed_secs` since the level started
    pub fn update(&mut self, elapsed_secs: f32) -> Vec3 {
        // A zero period would divide by zero; keep the last factor instead.
        if self.enabled && self.period_secs > f32::EPSILON {
            let cycles = elapsed_secs / self.period_secs;
            let raw_sin_wave = (cycles * TAU).sin();
            self.movement_factor = raw_sin_wave / 2.0 + 0.5;
        }
        self.start_position + self.movement_vector * self.movement_factor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_within_travel() {
        let start = Vec3::new(1.0, 2.0, 0.0);
        let mut osc = Oscillator::new(start, Vec3::new(10.0, 0.0, 0.0), 2.0);
        for step in 0..200 {
            let pos = osc.update(step as f32 * 0.037);
            assert!(pos.x >= start.x - 1e-4 && pos.x <= start.x + 10.0 + 1e-4);
            assert_eq!(pos.y, start.y);
        }
    }

    #[test]
    fn follows_the_period() {
        let mut osc = Oscillator::new(Vec3::ZERO, Vec3::Y, 4.0);
        assert!((osc.update(0.0).y - 0.5).abs() < 1e-5);
        assert!((osc.update(1.0).y - 1.0).abs() < 1e-5);
        assert!((osc.update(3.0).y - 0.0).abs() < 1e-5);
    }

    #[test]
    fn disabled_or_zero_period_holds_position() {
        let mut osc = Oscillator::new(Vec3::ZERO, Vec3::X, 0.0).with_factor(0.25);
        assert_eq!(osc.update(1.3), Vec3::new(0.25, 0.0, 0.0));

        let mut osc = Oscillator::new(Vec3::ZERO, Vec3::X, 2.0).with_factor(3.0);
        osc.enabled = false;
        assert_eq!(osc.update(0.5), Vec3::X);
        assert!(osc.update(0.7).is_finite());
    }
}
