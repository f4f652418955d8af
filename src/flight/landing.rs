//! Landing orientation check and hold timing

use std::time::Duration;

use super::ObjectId;

/// Continuous good-orientation contact with a landing pad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandingSession {
    pub pad: ObjectId,
    pub started_at: Duration,
}

impl LandingSession {
    pub fn open(pad: ObjectId, now: Duration) -> Self {
        Self {
            pad,
            started_at: now,
        }
    }

    /// Time spent settled so far
    pub fn held_for(&self, now: Duration) -> Duration {
        now.saturating_sub(self.started_at)
    }

    /// Whether the craft has been settled for at least `hold`
    pub fn is_complete(&self, now: Duration, hold: Duration) -> bool {
        self.held_for(now) >= hold
    }
}

/// Absolute roll difference in degrees, normalized to 0..=180
pub fn orientation_difference(craft_deg: f32, pad_deg: f32) -> f32 {
    // `a - b` and `b - a` differ only in sign, so wrapping the magnitude keeps
    // the result identical for swapped arguments.
    let diff = (craft_deg - pad_deg).abs().rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Whether the craft is aligned with the pad within `allowance_deg`
pub fn is_oriented_within(craft_deg: f32, pad_deg: f32, allowance_deg: f32) -> bool {
    orientation_difference(craft_deg, pad_deg) <= allowance_deg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difference_is_symmetric() {
        let pairs = [
            (0.0, 5.0),
            (350.0, 10.0),
            (-30.0, 45.0),
            (720.5, 3.25),
            (90.0, 270.0),
            (0.1, 0.3),
            (10.00001, 0.0),
            (-0.7, 359.9),
            (123.456, -987.654),
        ];
        for (a, b) in pairs {
            assert_eq!(
                orientation_difference(a, b),
                orientation_difference(b, a),
                "({a}, {b})"
            );
        }
    }

    #[test]
    fn swapped_angles_agree_at_the_allowance_edge() {
        assert_eq!(
            is_oriented_within(10.00001, 0.0, 10.0),
            is_oriented_within(0.0, 10.00001, 10.0)
        );
        assert!(!is_oriented_within(0.0, 10.00001, 10.0));
        assert_eq!(
            is_oriented_within(-0.1, 9.9, 10.0),
            is_oriented_within(9.9, -0.1, 10.0)
        );
    }

    #[test]
    fn difference_wraps_around_full_turns() {
        assert!((orientation_difference(359.0, 1.0) - 2.0).abs() < 1e-4);
        assert!((orientation_difference(-5.0, 5.0) - 10.0).abs() < 1e-4);
        assert!((orientation_difference(0.0, 180.0) - 180.0).abs() < 1e-4);
        assert_eq!(orientation_difference(30.0, 30.0), 0.0);
    }

    #[test]
    fn allowance_is_inclusive() {
        assert!(is_oriented_within(10.0, 0.0, 10.0));
        assert!(is_oriented_within(5.0, 0.0, 10.0));
        assert!(!is_oriented_within(15.0, 0.0, 10.0));
    }

    #[test]
    fn session_completes_after_hold() {
        let session = LandingSession::open(ObjectId(1), Duration::from_secs(2));
        let hold = Duration::from_secs(3);
        assert!(!session.is_complete(Duration::from_millis(4_999), hold));
        assert!(session.is_complete(Duration::from_secs(5), hold));
        assert_eq!(session.held_for(Duration::from_secs(1)), Duration::ZERO);
    }
}
