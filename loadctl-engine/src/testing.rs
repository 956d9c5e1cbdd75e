//! In-process fakes for engine tests

use async_trait::async_trait;
use loadctl_core::TestConfig;
use loadctl_http::{HttpError, LoadClient, RequestSpec, ResponseInfo};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, Copy)]
enum Behavior {
    Status(u16),
    ConnectError,
    Panic,
}

/// A [`LoadClient`] that answers after a fixed (virtual) delay
#[derive(Debug, Clone)]
pub struct FakeClient {
    behavior: Behavior,
    delay: Duration,
    calls: Arc<AtomicU64>,
}

impl FakeClient {
    pub fn ok(delay: Duration) -> Self {
        Self::status(200, delay)
    }

    pub fn status(status: u16, delay: Duration) -> Self {
        Self::with_behavior(Behavior::Status(status), delay)
    }

    pub fn refusing(delay: Duration) -> Self {
        Self::with_behavior(Behavior::ConnectError, delay)
    }

    pub fn panicking(delay: Duration) -> Self {
        Self::with_behavior(Behavior::Panic, delay)
    }

    fn with_behavior(behavior: Behavior, delay: Duration) -> Self {
        Self {
            behavior,
            delay,
            calls: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Counter of `execute` calls, shared with every clone
    pub fn calls(&self) -> Arc<AtomicU64> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl LoadClient for FakeClient {
    async fn execute(&self, _request: &RequestSpec) -> Result<ResponseInfo, HttpError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        match self.behavior {
            Behavior::Status(status) => Ok(ResponseInfo { status, bytes: 2 }),
            Behavior::ConnectError => Err(HttpError::Connect("connection refused".to_string())),
            Behavior::Panic => panic!("fake client panic"),
        }
    }
}

pub fn request_spec(timeout: Duration) -> RequestSpec {
    let config = TestConfig::new("http://example.test/ok");
    RequestSpec::from_config(&config, timeout).unwrap()
}
