//! Worker loop

use futures::FutureExt;
use loadctl_http::{HttpError, LoadClient, RequestSpec};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::limiter::{Permit, RateLimiter};
use crate::stats::{Outcome, StatAccumulator};

/// One concurrent request loop of a run
///
/// A worker issues one request at a time until the run is cancelled or its
/// deadline passes. Cancellation and the deadline are checked before every
/// request and never interrupt one already in flight; that request is
/// bounded by its own timeout and its outcome is still recorded.
pub struct Worker {
    id: u32,
    client: Arc<dyn LoadClient>,
    request: Arc<RequestSpec>,
    limiter: Arc<RateLimiter>,
    stats: Arc<StatAccumulator>,
    cancel: CancellationToken,
    deadline: Instant,
}

impl Worker {
    pub fn new(
        id: u32,
        client: Arc<dyn LoadClient>,
        request: Arc<RequestSpec>,
        limiter: Arc<RateLimiter>,
        stats: Arc<StatAccumulator>,
        cancel: CancellationToken,
        deadline: Instant,
    ) -> Self {
        Self {
            id,
            client,
            request,
            limiter,
            stats,
            cancel,
            deadline,
        }
    }

    /// Run until cancelled, returning the number of requests issued
    pub async fn run(self) -> u64 {
        debug!("Worker {} started", self.id);
        let mut issued = 0u64;

        loop {
            if self.should_stop() {
                break;
            }
            if self.limiter.wait(&self.cancel).await == Permit::Cancelled {
                break;
            }
            // The slot may land on or after the deadline
            if self.should_stop() {
                break;
            }

            let started = Instant::now();
            let outcome = self.execute_once().await;
            self.stats.record_outcome(outcome, started.elapsed());
            issued += 1;
        }

        debug!("Worker {} exiting after {} requests", self.id, issued);
        issued
    }

    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || Instant::now() >= self.deadline
    }

    async fn execute_once(&self) -> Outcome {
        let timeout = self.request.timeout;
        let call = tokio::time::timeout(timeout, self.client.execute(&self.request));

        match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Ok(Ok(response))) => Outcome::Status(response.status),
            Ok(Ok(Err(error))) => {
                debug!("Worker {} request failed: {}", self.id, error);
                Outcome::Failure(error.kind())
            }
            Ok(Err(_elapsed)) => Outcome::Failure(HttpError::Timeout(timeout).kind()),
            Err(_panic) => {
                warn!("Worker {} caught a panic while issuing a request", self.id);
                Outcome::Failure("panic")
            }
        }
    }
}
