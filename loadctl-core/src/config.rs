//! Load test configuration as submitted by callers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::types::HttpMethod;

/// Traffic profile for one load test
///
/// Numeric fields use `0` for "not set": concurrency and duration are
/// defaulted by the engine when the run starts, and a zero rate means the
/// workers run at maximum throughput. A configuration is frozen once its
/// run starts; the engine only ever hands out copies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfig {
    /// Target URL (http or https)
    pub url: String,

    /// HTTP method, `GET` when blank or absent
    #[serde(default)]
    pub method: HttpMethod,

    /// Request headers; keys are unique by construction
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request body; an empty string means no body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Number of concurrent workers
    #[serde(default)]
    pub concurrency: u32,

    /// Test duration in seconds
    #[serde(default)]
    pub duration: u64,

    /// Target aggregate request rate; 0 = unlimited
    #[serde(default)]
    pub requests_per_sec: u32,

    /// Per-request timeout override in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl TestConfig {
    /// Create a GET configuration for `url` with every other field unset
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            body: None,
            concurrency: 0,
            duration: 0,
            requests_per_sec: 0,
            timeout_ms: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_concurrency(mut self, concurrency: u32) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.duration = seconds;
        self
    }

    pub fn with_rate(mut self, requests_per_sec: u32) -> Self {
        self.requests_per_sec = requests_per_sec;
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Run duration as a [`Duration`]
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration)
    }

    /// Body to send, with blank payloads treated as absent
    pub fn effective_body(&self) -> Option<&str> {
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}
