use chrono::{DateTime, Utc};

#[cfg_attr(feature = "mock", mockall::automock)]
pub trait TimeService: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

#[cfg(feature = "mock")]
impl MockTimeService {
    pub fn with_now(self, now: DateTime<Utc>) -> Self {
        self.with_frozen_now(now, 1)
    }

    /// Expect exactly `calls` clock reads, all returning `now`.
    pub fn with_frozen_now(mut self, now: DateTime<Utc>, calls: usize) -> Self {
        self.expect_now().times(calls).return_const(now);
        self
    }
}
