use std::time::{Duration, Instant};

/// "Earned since opening" counter.
///
/// The start instant is fixed when the counter is created and never moves;
/// each reading is recomputed from scratch rather than accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionCounter {
    started_at: Instant,
}

impl SessionCounter {
    pub fn start(now: Instant) -> Self {
        Self { started_at: now }
    }

    /// Time since the session began, zero if `now` precedes it.
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn earned(&self, now: Instant, per_second: f64) -> f64 {
        self.elapsed(now).as_secs_f64() * per_second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_at_session_start() {
        let now = Instant::now();
        let session = SessionCounter::start(now);
        assert_eq!(session.earned(now, 0.5), 0.0);
    }

    #[test]
    fn test_linear_in_elapsed_seconds() {
        let now = Instant::now();
        let session = SessionCounter::start(now);
        let per_second = 30000.0 / 30.0 / 24.0 / 60.0 / 60.0;

        let earned = session.earned(now + Duration::from_secs(90), per_second);
        assert!((earned - 90.0 * per_second).abs() < 1e-12);

        let earned = session.earned(now + Duration::from_millis(1500), 2.0);
        assert!((earned - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_clock_before_start_reads_zero() {
        let now = Instant::now() + Duration::from_secs(10);
        let session = SessionCounter::start(now);
        assert_eq!(session.earned(now - Duration::from_secs(5), 1.0), 0.0);
    }
}
