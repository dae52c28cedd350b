use std::time::{Duration, Instant};

/// Turns wall-clock instants into per-frame delta seconds for interactive
/// harnesses.
///
/// Deltas are clamped into `[0, max_delta]`: a stalled terminal or suspended
/// process yields one long-but-bounded step instead of a tunnel-through-
/// everything frame, and a non-monotonic timestamp yields zero rather than
/// running the simulation backwards. Tests and the CLI skip this entirely
/// and feed fixed deltas straight into the session.
#[derive(Debug)]
pub struct FrameClock {
    last: Instant,
    max_delta: Duration,
}

impl FrameClock {
    pub const DEFAULT_MAX_DELTA: Duration = Duration::from_millis(250);

    pub fn new(now: Instant) -> Self {
        Self::with_max_delta(now, Self::DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(now: Instant, max_delta: Duration) -> Self {
        Self {
            last: now,
            max_delta,
        }
    }

    /// Seconds since the previous call, clamped.
    pub fn delta(&mut self, now: Instant) -> f32 {
        let raw = now.saturating_duration_since(self.last);
        self.last = now;
        raw.min(self.max_delta).as_secs_f32()
    }
}
