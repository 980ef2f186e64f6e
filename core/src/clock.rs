use std::time::Duration;

/// # Clock
/// Turns elapsed wall-clock time into a whole number of periods at a fixed rate.
///
/// Time that doesn't add up to a full period is carried into the next call, so a host calling
/// in at an irregular rate still gets `hz` periods per second on average.
///
/// A plain clock never drops time. A `capped` clock forgets any backlog larger than its cap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Clock {
    period: Duration,
    owed: Duration,
    cap: Option<u32>,
}

impl Clock {
    /// `hz` is clamped to at least 1.
    pub fn new(hz: u32) -> Self {
        Clock {
            period: Duration::from_secs(1) / hz.max(1),
            owed: Duration::ZERO,
            cap: None,
        }
    }

    /// Limits a single `advance` to `max` periods, e.g. `MAX_CATCH_UP_PERIODS`.
    pub fn capped(mut self, max: u32) -> Self {
        self.cap = Some(max);
        self
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Adds `elapsed` to the clock and returns how many periods are now due.
    ///
    /// A capped clock returns at most its cap; the rest of the backlog is forgotten.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.owed += elapsed;
        let due = u32::try_from(self.owed.as_nanos() / self.period.as_nanos()).unwrap_or(u32::MAX);
        if let Some(cap) = self.cap {
            if due > cap {
                self.owed = Duration::ZERO;
                return cap;
            }
        }
        self.owed -= self.period * due;
        due
    }

    /// How long until the next period is due.
    pub fn until_next(&self) -> Duration {
        self.period.saturating_sub(self.owed)
    }
}
