//! Test Registry
//!
//! The process-wide map from test id to controller. Runs are inserted only
//! after they started successfully, so a rejected configuration never shows
//! up in [`TestRegistry::list`].

use loadctl_config::LoadctlConfig;
use loadctl_core::{LoadResult, LoadTestError, TestConfig, TestId, TestRun};
use loadctl_http::{LoadClient, ReqwestLoadClient};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::info;

use crate::controller::TestRunController;
use crate::settings::EngineSettings;

pub struct TestRegistry {
    runs: RwLock<HashMap<TestId, Arc<TestRunController>>>,
    next_id: AtomicU64,
    client: Arc<dyn LoadClient>,
    settings: EngineSettings,
}

impl TestRegistry {
    /// Registry whose runs issue requests through `client`
    pub fn new(client: Arc<dyn LoadClient>, settings: EngineSettings) -> Self {
        Self {
            runs: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            client,
            settings,
        }
    }

    /// Registry backed by a reqwest client built from configuration
    pub fn from_config(config: &LoadctlConfig) -> LoadResult<Self> {
        let client = ReqwestLoadClient::new(config.http.clone().into())
            .map_err(|e| LoadTestError::Setup(e.to_string()))?;
        Ok(Self::new(Arc::new(client), EngineSettings::from(config)))
    }

    /// Start a new run and return its first snapshot
    ///
    /// Does not wait for the run. Ids increase strictly in creation order;
    /// a rejected configuration may leave a gap in the sequence.
    pub fn create(&self, config: TestConfig) -> LoadResult<TestRun> {
        let id = TestId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let controller = Arc::new(TestRunController::new(
            id,
            config,
            self.settings.clone(),
            Arc::clone(&self.client),
        ));
        controller.start()?;

        self.runs.write().insert(id, Arc::clone(&controller));
        Ok(controller.snapshot())
    }

    /// Snapshots of every known run, ordered by id
    pub fn list(&self) -> Vec<TestRun> {
        let controllers: Vec<_> = self.runs.read().values().cloned().collect();
        let mut runs: Vec<_> = controllers.iter().map(|c| c.snapshot()).collect();
        runs.sort_by_key(|run| run.id);
        runs
    }

    pub fn get(&self, id: TestId) -> LoadResult<TestRun> {
        Ok(self.controller(id)?.snapshot())
    }

    /// Live controller for a run
    pub fn controller(&self, id: TestId) -> LoadResult<Arc<TestRunController>> {
        self.runs
            .read()
            .get(&id)
            .cloned()
            .ok_or(LoadTestError::NotFound(id))
    }

    /// Stop a run; stopping a finished run returns its final snapshot
    pub async fn stop(&self, id: TestId) -> LoadResult<TestRun> {
        let controller = self.controller(id)?;
        Ok(controller.stop().await)
    }

    /// Forget a run, stopping it first if it is still active
    pub async fn remove(&self, id: TestId) -> LoadResult<TestRun> {
        let controller = self
            .runs
            .write()
            .remove(&id)
            .ok_or(LoadTestError::NotFound(id))?;
        Ok(controller.stop().await)
    }

    /// Stop every active run, returning how many were stopped
    pub async fn shutdown(&self) -> usize {
        let active: Vec<_> = self
            .runs
            .read()
            .values()
            .filter(|controller| controller.status().is_active())
            .cloned()
            .collect();

        if !active.is_empty() {
            info!("Stopping {} active load tests", active.len());
        }
        futures::future::join_all(active.iter().map(|controller| controller.stop())).await;
        active.len()
    }

    pub fn len(&self) -> usize {
        self.runs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.read().is_empty()
    }
}
