//! Time utilities for the frame-driven simulation

use std::time::Duration;

/// Default tick rate for the headless driver
pub const DEFAULT_TICK_RATE: u32 = 60; // 60 ticks per second

/// Duration of a single tick at the given rate
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_secs(1) / tick_rate.max(1)
}

/// Simulation clock advanced once per tick.
///
/// All controller timestamps are offsets on this clock, never wall-clock
/// time, so a replayed flight behaves identically on every run.
#[derive(Debug, Clone)]
pub struct SimClock {
    now: Duration,
    step: Duration,
    ticks: u64,
}

impl SimClock {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            now: Duration::ZERO,
            step: tick_duration(tick_rate),
            ticks: 0,
        }
    }

    /// Current simulation time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Fixed step between ticks
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Ticks elapsed since the clock was created
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one tick, returns the new time
    pub fn advance(&mut self) -> Duration {
        self.now += self.step;
        self.ticks += 1;
        self.now
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_advances_by_fixed_step() {
        let mut clock = SimClock::new(50);
        assert_eq!(clock.step(), Duration::from_millis(20));
        clock.advance();
        clock.advance();
        assert_eq!(clock.now(), Duration::from_millis(40));
        assert_eq!(clock.ticks(), 2);
    }

    #[test]
    fn zero_tick_rate_is_treated_as_one() {
        assert_eq!(tick_duration(0), Duration::from_secs(1));
        assert_eq!(SimClock::new(0).step(), Duration::from_secs(1));
    }
}
