//! Load generation engine configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, Validatable};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Engine limits and defaults applied to submitted tests
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Duration used when a test does not specify one
    #[serde(with = "humantime_serde", default = "default_duration")]
    pub default_duration: Duration,

    /// Upper bound on a test's worker count
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,

    /// Upper bound on a test's duration
    #[serde(with = "humantime_serde", default = "default_max_duration")]
    pub max_duration: Duration,

    /// After cancellation the controller waits at most
    /// `request_timeout * drain_grace_factor + 1s` for workers to exit
    #[serde(default = "default_drain_grace_factor")]
    pub drain_grace_factor: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_duration: default_duration(),
            max_concurrency: default_max_concurrency(),
            max_duration: default_max_duration(),
            drain_grace_factor: default_drain_grace_factor(),
        }
    }
}

impl Validatable for EngineConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_positive(
            self.default_duration.as_secs(),
            "default_duration",
            self.domain_name(),
        )?;
        validate_positive(self.max_concurrency, "max_concurrency", self.domain_name())?;
        validate_positive(self.max_duration.as_secs(), "max_duration", self.domain_name())?;
        validate_positive(
            self.drain_grace_factor,
            "drain_grace_factor",
            self.domain_name(),
        )?;

        if self.default_duration > self.max_duration {
            return Err(self.validation_error(format!(
                "default_duration ({}s) exceeds max_duration ({}s)",
                self.default_duration.as_secs(),
                self.max_duration.as_secs()
            )));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "engine"
    }
}

fn default_duration() -> Duration {
    Duration::from_secs(10)
}

fn default_max_concurrency() -> u32 {
    10_000
}

fn default_max_duration() -> Duration {
    Duration::from_secs(24 * 60 * 60)
}

fn default_drain_grace_factor() -> u32 {
    2
}
