//! Engine settings derived from process configuration

use loadctl_config::LoadctlConfig;
use std::time::Duration;

/// Limits and defaults applied to every run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineSettings {
    /// Used when a test leaves its duration at 0
    pub default_duration: Duration,
    pub max_concurrency: u32,
    pub max_duration: Duration,
    /// Per-request timeout when a test does not set `timeout_ms`
    pub request_timeout: Duration,
    pub drain_grace_factor: u32,
}

impl EngineSettings {
    /// How long a controller waits for workers after cancelling them
    ///
    /// Workers finish their in-flight request before exiting, so the bound
    /// scales with the run's per-request timeout.
    pub fn drain_timeout(&self, request_timeout: Duration) -> Duration {
        request_timeout
            .saturating_mul(self.drain_grace_factor.max(1))
            .saturating_add(Duration::from_secs(1))
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&LoadctlConfig::default())
    }
}

impl From<&LoadctlConfig> for EngineSettings {
    fn from(config: &LoadctlConfig) -> Self {
        Self {
            default_duration: config.engine.default_duration,
            max_concurrency: config.engine.max_concurrency,
            max_duration: config.engine.max_duration,
            request_timeout: config.http.timeout,
            drain_grace_factor: config.engine.drain_grace_factor,
        }
    }
}
