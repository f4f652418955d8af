//! Single-shot transition timer on the tick clock

use std::time::Duration;

use super::TransitionRequest;

/// A transition request that fires once its due time is reached
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionTimer {
    request: TransitionRequest,
    due_at: Duration,
}

impl TransitionTimer {
    pub fn schedule(request: TransitionRequest, now: Duration, delay: Duration) -> Self {
        Self {
            request,
            due_at: now + delay,
        }
    }

    pub fn request(&self) -> TransitionRequest {
        self.request
    }

    pub fn due_at(&self) -> Duration {
        self.due_at
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.due_at
    }
}

/// Take the request out of `slot` when due, leaving the slot empty
pub fn fire_if_due(slot: &mut Option<TransitionTimer>, now: Duration) -> Option<TransitionRequest> {
    match slot {
        Some(timer) if timer.is_due(now) => slot.take().map(|t| t.request),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_exactly_once() {
        let mut slot = Some(TransitionTimer::schedule(
            TransitionRequest::Advance,
            Duration::from_secs(1),
            Duration::from_secs(3),
        ));
        assert_eq!(fire_if_due(&mut slot, Duration::from_secs(2)), None);
        assert_eq!(
            fire_if_due(&mut slot, Duration::from_secs(4)),
            Some(TransitionRequest::Advance)
        );
        assert_eq!(fire_if_due(&mut slot, Duration::from_secs(5)), None);
        assert!(slot.is_none());
    }
}
