//! Aggregate statistics snapshot

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Point-in-time copy of a run's request statistics
///
/// Response times are in milliseconds. When no request has completed every
/// counter and timing field is zero. A snapshot always satisfies
/// `total_requests == success_requests + failed_requests`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_requests: u64,
    pub success_requests: u64,
    pub failed_requests: u64,
    pub avg_response_time: f64,
    pub min_response_time: f64,
    pub max_response_time: f64,

    /// Outcome breakdown keyed by HTTP status code or failure kind
    #[serde(default)]
    pub status_counts: BTreeMap<String, u64>,
}

impl Stats {
    /// Fraction of requests that failed, 0.0 when nothing ran
    pub fn error_rate(&self) -> f64 {
        if self.total_requests == 0 {
            return 0.0;
        }
        self.failed_requests as f64 / self.total_requests as f64
    }

    /// Whether the counters agree with each other
    pub fn is_consistent(&self) -> bool {
        if self.total_requests != self.success_requests + self.failed_requests {
            return false;
        }
        if self.total_requests == 0 {
            return self.avg_response_time == 0.0
                && self.min_response_time == 0.0
                && self.max_response_time == 0.0;
        }
        // Allow for floating point error in the mean
        let epsilon = 1e-9;
        self.min_response_time <= self.avg_response_time + epsilon
            && self.avg_response_time <= self.max_response_time + epsilon
    }
}
