use chrono::{Duration, Utc};
use gbce_core::Timestamp;
use gbce_ports::Clock;
use parking_lot::RwLock;
use std::sync::Arc;

/// Controllable clock for deterministic tests and replays
///
/// Time is frozen at the configured instant and only moves through
/// [`advance`](Self::advance) or [`set_time`](Self::set_time).
pub struct ManualClock {
    current_time: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at `initial_time`
    pub fn new(initial_time: Timestamp) -> Arc<Self> {
        Arc::new(Self {
            current_time: RwLock::new(initial_time),
        })
    }

    /// Create a clock frozen at the current wall time
    pub fn starting_now() -> Arc<Self> {
        Self::new(Utc::now())
    }

    /// Advance the time by a specified duration
    pub fn advance(&self, duration: Duration) {
        *self.current_time.write() += duration;
    }

    /// Explicitly set the time
    ///
    /// Moving backwards is allowed; callers replaying history rely on it.
    pub fn set_time(&self, time: Timestamp) {
        *self.current_time.write() = time;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current_time.read()
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}
