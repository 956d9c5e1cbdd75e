//! Test run domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::TestConfig;
use crate::stats::Stats;
use crate::types::ParseError;

/// Unique, generation-ordered identifier of a test run
///
/// Rendered as `test_<n>`; parsing also accepts the bare number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TestId(pub u64);

impl TestId {
    const PREFIX: &'static str = "test_";
}

impl fmt::Display for TestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

impl FromStr for TestId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        digits
            .parse::<u64>()
            .map(TestId)
            .map_err(|_| ParseError::InvalidTestId(s.to_string()))
    }
}

impl TryFrom<String> for TestId {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TestId> for String {
    fn from(id: TestId) -> Self {
        id.to_string()
    }
}

/// Lifecycle status of a test run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestStatus {
    /// Registered but not started
    Created,
    /// Workers are generating load
    Running,
    /// The configured duration elapsed
    Completed,
    /// Stopped on request before the duration elapsed
    Stopped,
    /// Setup failed before any worker started
    Failed,
}

impl TestStatus {
    /// Check if the run is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TestStatus::Completed | TestStatus::Stopped | TestStatus::Failed
        )
    }

    /// Check if the run is still generating load
    pub fn is_active(&self) -> bool {
        matches!(self, TestStatus::Running)
    }

    /// Get the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TestStatus::Created => "created",
            TestStatus::Running => "running",
            TestStatus::Completed => "completed",
            TestStatus::Stopped => "stopped",
            TestStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of one test run
///
/// This is a copy: holding a `TestRun` never keeps the live statistics
/// alive or lets a caller mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestRun {
    pub id: TestId,
    pub config: TestConfig,
    pub status: TestStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// Set exactly once, on the terminal transition
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub stats: Stats,

    /// Completed requests divided by elapsed wall time
    #[serde(default)]
    pub requests_per_second: f64,

    /// Setup error for failed runs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TestRun {
    /// Wall time between start and end (or `now` while running)
    pub fn elapsed_at(&self, now: DateTime<Utc>) -> Option<chrono::Duration> {
        let start = self.start_time?;
        let end = self.end_time.unwrap_or(now);
        Some(end - start)
    }
}
