use derive_more::{Display, Error};
use std::time::{Duration, Instant};

#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Error)]
#[display(fmt = "time is up!")]
pub struct Timeout;

/// A deadline measured against some [`Clock`][`crate::util::Clock`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Timer {
    deadline: Option<Instant>,
}

impl Timer {
    /// Constructs a timer that elapses once `duration` has passed since `now`.
    pub fn start(now: Instant, duration: Duration) -> Self {
        Timer {
            deadline: now.checked_add(duration),
        }
    }

    /// Checks whether the timer has elapsed as of `now`.
    pub fn elapsed(&self, now: Instant) -> Result<(), Timeout> {
        match self.deadline {
            Some(t) if now > t => Err(Timeout),
            _ => Ok(()),
        }
    }
}
