use chrono::{DateTime, Duration, Utc};
use gbce_core::Timestamp;

/// Port for time abstraction
///
/// This allows the market to use different time sources:
/// - Real system time for production
/// - Manually controlled time for deterministic tests
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Start of the trailing window of length `window` ending now
    ///
    /// Clamps to the earliest representable time when the window reaches
    /// past it.
    fn window_start(&self, window: Duration) -> Timestamp {
        self.now()
            .checked_sub_signed(window)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
