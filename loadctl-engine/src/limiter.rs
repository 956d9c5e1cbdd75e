//! Rate Limiter
//!
//! Pacing uses an absolute virtual schedule shared by all workers of a run:
//! each call reserves the next slot and advances the schedule by one
//! interval. A slow request delays only its own worker's next reservation,
//! never the schedule itself, so scheduling error does not accumulate.

use parking_lot::Mutex;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;

/// Result of waiting for a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permit {
    /// The caller may issue its request now
    Granted,
    /// The run was cancelled while waiting
    Cancelled,
}

#[derive(Debug)]
struct Schedule {
    interval: Duration,
    /// Slots older than this are skipped rather than replayed as a burst
    max_lag: Duration,
    next: Mutex<Instant>,
}

/// Paces the aggregate request rate of one run
#[derive(Debug)]
pub struct RateLimiter {
    schedule: Option<Schedule>,
}

impl RateLimiter {
    /// Limiter for `requests_per_sec` spread across `workers`; 0 disables pacing
    pub fn new(requests_per_sec: u32, workers: u32) -> Self {
        if requests_per_sec == 0 {
            return Self::unlimited();
        }

        let interval = Duration::from_nanos(1_000_000_000 / u64::from(requests_per_sec));
        Self {
            schedule: Some(Schedule {
                interval,
                max_lag: interval * workers.max(1),
                next: Mutex::new(Instant::now()),
            }),
        }
    }

    pub fn unlimited() -> Self {
        Self { schedule: None }
    }

    pub fn is_unlimited(&self) -> bool {
        self.schedule.is_none()
    }

    /// Wait for the next slot, returning early if `cancel` fires
    pub async fn wait(&self, cancel: &CancellationToken) -> Permit {
        if cancel.is_cancelled() {
            return Permit::Cancelled;
        }
        let Some(schedule) = &self.schedule else {
            return Permit::Granted;
        };

        let slot = schedule.reserve(Instant::now());
        if slot <= Instant::now() {
            return Permit::Granted;
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Permit::Cancelled,
            _ = sleep_until(slot) => Permit::Granted,
        }
    }
}

impl Schedule {
    fn reserve(&self, now: Instant) -> Instant {
        let mut next = self.next.lock();
        let floor = now.checked_sub(self.max_lag).unwrap_or(now);
        if *next < floor {
            *next = floor;
        }
        let slot = *next;
        *next += self.interval;
        slot
    }
}
