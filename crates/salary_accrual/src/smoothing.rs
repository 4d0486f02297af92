use std::time::{Duration, Instant};

/// How long a displayed number takes to glide to a new value.
pub const SMOOTHING_DURATION: Duration = Duration::from_millis(600);

/// `1 - (1 - t)^3`, with `t` clamped to `[0, 1]`.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// A displayed number easing towards its latest target.
///
/// Only affects what is drawn between ticks; the target itself is the
/// computed value and is never altered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedValue {
    from: f64,
    to: f64,
    started_at: Instant,
    duration: Duration,
}

impl SmoothedValue {
    pub fn new(value: f64, now: Instant) -> Self {
        Self::with_duration(value, now, SMOOTHING_DURATION)
    }

    pub fn with_duration(value: f64, now: Instant, duration: Duration) -> Self {
        Self {
            from: value,
            to: value,
            started_at: now,
            duration,
        }
    }

    /// Starts a new glide from whatever is currently displayed.
    pub fn retarget(&mut self, value: f64, now: Instant) {
        if value == self.to {
            return;
        }
        self.from = self.value_at(now);
        self.to = value;
        self.started_at = now;
    }

    pub fn value_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        self.from + (self.to - self.from) * ease_out_cubic(t)
    }

    pub fn is_settled(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.started_at) >= self.duration
    }
}
