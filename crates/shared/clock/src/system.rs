use chrono::Utc;
use gbce_core::Timestamp;
use gbce_ports::Clock;
use std::sync::Arc;

/// Real system clock for production use
///
/// This simply returns the current wall-clock time.
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }

    /// Shared handle, ready to inject into instruments
    pub fn shared() -> Arc<dyn Clock> {
        Arc::new(Self)
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::thread;

    #[test]
    fn test_system_clock_advances() {
        let clock = SystemClock::new();
        let time1 = clock.now();
        thread::sleep(std::time::Duration::from_millis(10));
        let time2 = clock.now();

        assert!(time2 > time1);
        let diff = time2 - time1;
        assert!(diff >= Duration::milliseconds(9));
    }

    #[test]
    fn test_window_start() {
        let clock = SystemClock::shared();
        let start = clock.window_start(Duration::minutes(5));
        let lag = clock.now() - start;
        assert!(lag >= Duration::minutes(5));
        assert!(lag < Duration::minutes(6));
    }
}
