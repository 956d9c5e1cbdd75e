//! Stat Accumulator
//!
//! Every worker of a run records into one accumulator. All counters live
//! behind a single mutex so an update is applied as a unit: a snapshot can
//! never see `total` bumped without the matching success or failure count.

use loadctl_core::Stats;
use loadctl_http::is_success_status;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::time::Duration;

/// How one request ended, for the status breakdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A response arrived with this status code
    Status(u16),
    /// No usable response; the label names the failure kind
    Failure(&'static str),
}

impl Outcome {
    /// Failures never succeed; responses follow the status classification
    pub fn is_success(&self) -> bool {
        match self {
            Outcome::Status(code) => is_success_status(*code),
            Outcome::Failure(_) => false,
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    total: u64,
    success: u64,
    failed: u64,
    latency_sum: Duration,
    latency_min: Option<Duration>,
    latency_max: Option<Duration>,
    by_status: BTreeMap<u16, u64>,
    by_failure: BTreeMap<&'static str, u64>,
    frozen: bool,
}

impl Counters {
    fn fold(&mut self, success: bool, latency: Duration) {
        self.total += 1;
        if success {
            self.success += 1;
        } else {
            self.failed += 1;
        }
        self.latency_sum += latency;
        self.latency_min = Some(self.latency_min.map_or(latency, |min| min.min(latency)));
        self.latency_max = Some(self.latency_max.map_or(latency, |max| max.max(latency)));
    }

    fn to_stats(&self) -> Stats {
        if self.total == 0 {
            return Stats::default();
        }

        let mut status_counts = BTreeMap::new();
        for (code, count) in &self.by_status {
            status_counts.insert(code.to_string(), *count);
        }
        for (kind, count) in &self.by_failure {
            status_counts.insert((*kind).to_string(), *count);
        }

        Stats {
            total_requests: self.total,
            success_requests: self.success,
            failed_requests: self.failed,
            avg_response_time: as_millis(self.latency_sum) / self.total as f64,
            min_response_time: self.latency_min.map(as_millis).unwrap_or_default(),
            max_response_time: self.latency_max.map(as_millis).unwrap_or_default(),
            status_counts,
        }
    }
}

fn as_millis(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

/// Shared, lock-protected aggregate of request outcomes
#[derive(Debug, Default)]
pub struct StatAccumulator {
    inner: Mutex<Counters>,
}

impl StatAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one outcome into the counters
    pub fn record(&self, success: bool, latency: Duration) {
        let mut counters = self.inner.lock();
        if counters.frozen {
            return;
        }
        counters.fold(success, latency);
    }

    /// Fold one classified outcome, including it in the status breakdown
    pub fn record_outcome(&self, outcome: Outcome, latency: Duration) {
        let mut counters = self.inner.lock();
        if counters.frozen {
            return;
        }
        counters.fold(outcome.is_success(), latency);
        match outcome {
            Outcome::Status(code) => *counters.by_status.entry(code).or_insert(0) += 1,
            Outcome::Failure(kind) => *counters.by_failure.entry(kind).or_insert(0) += 1,
        }
    }

    /// Copy of the current aggregate
    pub fn snapshot(&self) -> Stats {
        self.inner.lock().to_stats()
    }

    /// Stop accepting outcomes and return the final aggregate
    ///
    /// Outcomes recorded after this call are dropped, so a finished run's
    /// totals never move.
    pub fn freeze(&self) -> Stats {
        let mut counters = self.inner.lock();
        counters.frozen = true;
        counters.to_stats()
    }

    pub fn is_frozen(&self) -> bool {
        self.inner.lock().frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_empty_snapshot_is_all_zero() {
        let stats = StatAccumulator::new().snapshot();
        assert_eq!(stats, Stats::default());
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_record_folds_latency() {
        let acc = StatAccumulator::new();
        acc.record(true, ms(10));
        acc.record(true, ms(30));
        acc.record(false, ms(20));

        let stats = acc.snapshot();
        assert_eq!(stats.total_requests, 3);
        assert_eq!(stats.success_requests, 2);
        assert_eq!(stats.failed_requests, 1);
        assert!((stats.avg_response_time - 20.0).abs() < 1e-9);
        assert!((stats.min_response_time - 10.0).abs() < 1e-9);
        assert!((stats.max_response_time - 30.0).abs() < 1e-9);
        assert!(stats.is_consistent());
    }

    #[test]
    fn test_status_breakdown() {
        let acc = StatAccumulator::new();
        acc.record_outcome(Outcome::Status(200), ms(5));
        acc.record_outcome(Outcome::Status(200), ms(5));
        acc.record_outcome(Outcome::Status(302), ms(5));
        acc.record_outcome(Outcome::Status(503), ms(5));
        acc.record_outcome(Outcome::Failure("timeout"), ms(5));

        let stats = acc.snapshot();
        assert_eq!(stats.success_requests, 3);
        assert_eq!(stats.failed_requests, 2);
        assert_eq!(stats.status_counts.get("200"), Some(&2));
        assert_eq!(stats.status_counts.get("302"), Some(&1));
        assert_eq!(stats.status_counts.get("503"), Some(&1));
        assert_eq!(stats.status_counts.get("timeout"), Some(&1));
    }

    #[test]
    fn test_freeze_drops_late_outcomes() {
        let acc = StatAccumulator::new();
        acc.record(true, ms(1));
        let frozen = acc.freeze();
        acc.record(true, ms(1));
        acc.record_outcome(Outcome::Failure("panic"), ms(1));

        assert!(acc.is_frozen());
        assert_eq!(frozen.total_requests, 1);
        assert_eq!(acc.snapshot(), frozen);
    }

    #[test]
    fn test_concurrent_records_keep_counters_consistent() {
        let acc = Arc::new(StatAccumulator::new());
        let writers: Vec<_> = (0..8)
            .map(|i| {
                let acc = Arc::clone(&acc);
                std::thread::spawn(move || {
                    for n in 0..1_000u64 {
                        acc.record((n + i) % 3 != 0, ms(n % 50 + 1));
                    }
                })
            })
            .collect();

        // Read while the writers are running
        for _ in 0..200 {
            assert!(acc.snapshot().is_consistent());
        }
        for writer in writers {
            writer.join().unwrap();
        }

        let stats = acc.snapshot();
        assert_eq!(stats.total_requests, 8_000);
        assert!(stats.is_consistent());
        assert!((stats.min_response_time - 1.0).abs() < 1e-9);
        assert!((stats.max_response_time - 50.0).abs() < 1e-9);
    }
}
