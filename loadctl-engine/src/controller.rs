//! Test Run Controller
//!
//! Owns one run's lifecycle:
//!
//! ```text
//! created --start()--> running --{deadline | stop()}--> completed | stopped
//! created --start() with a bad config--> failed
//! ```
//!
//! `start()` spawns the workers plus a supervisor task and returns at once.
//! The supervisor waits for the deadline or a stop request, cancels the
//! workers, waits a bounded time for them to exit, then freezes the stats
//! and records the terminal status. Terminal states are final.

use chrono::{DateTime, Utc};
use loadctl_core::{LoadResult, LoadTestError, Stats, TestConfig, TestId, TestRun, TestStatus};
use loadctl_http::{LoadClient, RequestSpec};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio::time::{sleep_until, Instant};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::limiter::RateLimiter;
use crate::settings::EngineSettings;
use crate::stats::StatAccumulator;
use crate::worker::Worker;

#[derive(Debug)]
struct RunState {
    status: TestStatus,
    start_time: Option<DateTime<Utc>>,
    end_time: Option<DateTime<Utc>>,
    /// Monotonic bounds of the run, used for throughput
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    /// Set together with the terminal status
    final_stats: Option<Stats>,
    error: Option<String>,
}

impl RunState {
    fn new() -> Self {
        Self {
            status: TestStatus::Created,
            start_time: None,
            end_time: None,
            started_at: None,
            ended_at: None,
            final_stats: None,
            error: None,
        }
    }

    fn finish(&mut self, status: TestStatus, stats: Option<Stats>) {
        self.status = status;
        self.end_time = Some(Utc::now());
        if self.started_at.is_some() {
            self.ended_at = Some(Instant::now());
        }
        self.final_stats = stats;
    }
}

/// Drives one load test
pub struct TestRunController {
    id: TestId,
    config: TestConfig,
    settings: EngineSettings,
    client: Arc<dyn LoadClient>,
    stats: Arc<StatAccumulator>,
    cancel: CancellationToken,
    state: Mutex<RunState>,
    done: watch::Sender<bool>,
}

impl TestRunController {
    /// Create a controller in the `created` state
    ///
    /// A zero concurrency becomes one worker and a zero duration becomes
    /// the engine's default duration.
    pub fn new(
        id: TestId,
        mut config: TestConfig,
        settings: EngineSettings,
        client: Arc<dyn LoadClient>,
    ) -> Self {
        if config.concurrency == 0 {
            config.concurrency = 1;
        }
        if config.duration == 0 {
            config.duration = settings.default_duration.as_secs().max(1);
        }

        let (done, _) = watch::channel(false);
        Self {
            id,
            config,
            settings,
            client,
            stats: Arc::new(StatAccumulator::new()),
            cancel: CancellationToken::new(),
            state: Mutex::new(RunState::new()),
            done,
        }
    }

    pub fn id(&self) -> TestId {
        self.id
    }

    /// The run's configuration after defaults were applied
    pub fn config(&self) -> &TestConfig {
        &self.config
    }

    pub fn status(&self) -> TestStatus {
        self.state.lock().status
    }

    /// Validate the configuration and launch the workers
    ///
    /// Must be called from within a tokio runtime. Returns as soon as the
    /// workers are spawned. A configuration error moves the run to
    /// `failed` and is returned to the caller; no worker is started.
    pub fn start(self: &Arc<Self>) -> LoadResult<()> {
        let mut state = self.state.lock();
        if state.status != TestStatus::Created {
            return Err(LoadTestError::InvalidState(format!(
                "{} cannot be started while {}",
                self.id, state.status
            )));
        }

        let request = match self.prepare_request() {
            Ok(request) => Arc::new(request),
            Err(e) => {
                warn!("Load test {} failed to start: {}", self.id, e);
                state.error = Some(e.to_string());
                state.finish(TestStatus::Failed, Some(Stats::default()));
                self.done.send_replace(true);
                return Err(e);
            }
        };

        let started_at = Instant::now();
        let deadline = started_at + self.config.duration();
        let drain_timeout = self.settings.drain_timeout(request.timeout);
        let limiter = Arc::new(RateLimiter::new(
            self.config.requests_per_sec,
            self.config.concurrency,
        ));

        let mut workers = JoinSet::new();
        for worker_id in 0..self.config.concurrency {
            let worker = Worker::new(
                worker_id,
                Arc::clone(&self.client),
                Arc::clone(&request),
                Arc::clone(&limiter),
                Arc::clone(&self.stats),
                self.cancel.clone(),
                deadline,
            );
            workers.spawn(worker.run());
        }

        state.status = TestStatus::Running;
        state.start_time = Some(Utc::now());
        state.started_at = Some(started_at);
        drop(state);

        info!(
            "Load test {} started: {} {} with {} workers for {}s at {}",
            self.id,
            self.config.method,
            self.config.url,
            self.config.concurrency,
            self.config.duration,
            match self.config.requests_per_sec {
                0 => "max rate".to_string(),
                rate => format!("{} req/s", rate),
            }
        );

        let controller = Arc::clone(self);
        tokio::spawn(async move {
            controller.supervise(workers, deadline, drain_timeout).await;
        });

        Ok(())
    }

    fn prepare_request(&self) -> LoadResult<RequestSpec> {
        if self.config.url.trim().is_empty() {
            return Err(LoadTestError::invalid_config("url is required"));
        }
        if self.config.concurrency > self.settings.max_concurrency {
            return Err(LoadTestError::invalid_config(format!(
                "concurrency {} exceeds the maximum of {}",
                self.config.concurrency, self.settings.max_concurrency
            )));
        }
        if self.config.duration() > self.settings.max_duration {
            return Err(LoadTestError::invalid_config(format!(
                "duration {}s exceeds the maximum of {}s",
                self.config.duration,
                self.settings.max_duration.as_secs()
            )));
        }
        if let Some(timeout_ms) = self.config.timeout_ms {
            if u128::from(timeout_ms) > self.settings.max_duration.as_millis() {
                return Err(LoadTestError::invalid_config(format!(
                    "timeout_ms {} exceeds the maximum duration of {}s",
                    timeout_ms,
                    self.settings.max_duration.as_secs()
                )));
            }
        }

        RequestSpec::from_config(&self.config, self.settings.request_timeout)
            .map_err(|e| LoadTestError::InvalidConfig(e.to_string()))
    }

    async fn supervise(self: Arc<Self>, mut workers: JoinSet<u64>, deadline: Instant, drain_timeout: Duration) {
        let stopped = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => true,
            _ = sleep_until(deadline) => false,
        };
        if stopped {
            info!("Load test {} stop requested, draining workers", self.id);
        } else {
            debug!("Load test {} reached its duration, draining workers", self.id);
        }
        self.cancel.cancel();

        let drained = tokio::time::timeout(drain_timeout, async {
            let mut issued = 0u64;
            while let Some(result) = workers.join_next().await {
                match result {
                    Ok(count) => issued += count,
                    Err(e) if e.is_panic() => warn!("Load test {} worker panicked: {}", self.id, e),
                    Err(e) => debug!("Load test {} worker ended abnormally: {}", self.id, e),
                }
            }
            issued
        })
        .await;

        match drained {
            Ok(issued) => debug!("Load test {} workers exited after {} requests", self.id, issued),
            Err(_) => {
                warn!(
                    "Load test {}: {} workers still running after {:?}, aborting them",
                    self.id,
                    workers.len(),
                    drain_timeout
                );
                workers.shutdown().await;
            }
        }

        let final_stats = self.stats.freeze();
        let status = if stopped {
            TestStatus::Stopped
        } else {
            TestStatus::Completed
        };
        info!(
            "Load test {} {}: {} requests ({} ok, {} failed), avg {:.2}ms",
            self.id,
            status,
            final_stats.total_requests,
            final_stats.success_requests,
            final_stats.failed_requests,
            final_stats.avg_response_time
        );

        self.state.lock().finish(status, Some(final_stats));
        self.done.send_replace(true);
    }

    /// Stop the run and return its terminal snapshot
    ///
    /// Idempotent. A running test is cancelled and this waits until every
    /// worker has exited; a request already in flight when the stop is
    /// signalled may still land one more outcome before the totals freeze.
    /// A test that never started moves straight to `stopped`.
    pub async fn stop(&self) -> TestRun {
        let running = {
            let mut state = self.state.lock();
            match state.status {
                TestStatus::Created => {
                    state.finish(TestStatus::Stopped, Some(self.stats.freeze()));
                    self.done.send_replace(true);
                    false
                }
                TestStatus::Running => true,
                _ => false,
            }
        };

        if running {
            self.cancel.cancel();
            return self.wait().await;
        }
        self.snapshot()
    }

    /// Wait for the run to reach a terminal state
    ///
    /// Never returns for a run that is not started or stopped.
    pub async fn wait(&self) -> TestRun {
        let mut done = self.done.subscribe();
        // The sender lives as long as `self`, so this only ends on completion
        let _ = done.wait_for(|finished| *finished).await;
        self.snapshot()
    }

    /// Point-in-time copy of the run
    pub fn snapshot(&self) -> TestRun {
        let state = self.state.lock();
        let stats = match &state.final_stats {
            Some(stats) => stats.clone(),
            None => self.stats.snapshot(),
        };

        let elapsed = match (state.started_at, state.ended_at) {
            (Some(start), Some(end)) => end.duration_since(start),
            (Some(start), None) => start.elapsed(),
            _ => Duration::ZERO,
        };
        let requests_per_second = if elapsed.is_zero() {
            0.0
        } else {
            stats.total_requests as f64 / elapsed.as_secs_f64()
        };

        TestRun {
            id: self.id,
            config: self.config.clone(),
            status: state.status,
            start_time: state.start_time,
            end_time: state.end_time,
            stats,
            requests_per_second,
            error: state.error.clone(),
        }
    }
}
