use core::ops::RangeInclusive;

/// Bounded retry budget used while waiting on an external event
/// (Wi-Fi association, broker session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_ms: u32,
}

impl RetryPolicy {
    pub const fn new(max_attempts: u32, delay_ms: u32) -> Self {
        Self {
            max_attempts,
            delay_ms,
        }
    }

    /// Number of attempts actually made, at least one.
    pub fn limit(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// 1-based attempt numbers.
    pub fn attempts(&self) -> RangeInclusive<u32> {
        1..=self.limit()
    }

    pub fn is_last(&self, attempt: u32) -> bool {
        attempt >= self.limit()
    }

    /// Upper bound of the time spent sleeping between attempts.
    pub fn budget_ms(&self) -> u64 {
        u64::from(self.limit() - 1) * u64::from(self.delay_ms)
    }
}
