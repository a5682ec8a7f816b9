use std::time::{SystemTime, UNIX_EPOCH};

/// Trait for time operations to enable testing
///
/// This trait provides an abstraction over the wall clock, allowing code
/// to work with either real system time or mocked time for testing.
pub trait Clock: Send + Sync + 'static {
    /// Get current system time (wall clock)
    fn system_time(&self) -> SystemTime;

    /// Get milliseconds since UNIX epoch
    ///
    /// Clocks set before the epoch report zero.
    fn millis_since_epoch(&self) -> u64 {
        let millis = self.system_time().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis();
        u64::try_from(millis).unwrap_or(u64::MAX)
    }
}

/// Real system clock implementation
///
/// Use this in production code.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn system_time(&self) -> SystemTime {
        SystemTime::now()
    }
}
