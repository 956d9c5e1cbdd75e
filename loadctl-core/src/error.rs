//! Core error types for loadctl

use thiserror::Error;

use crate::run::TestId;

/// Errors surfaced to callers of the engine
///
/// Per-request failures never show up here: a timed-out or refused request
/// is recorded as a failed outcome in the run's statistics instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadTestError {
    /// The submitted configuration was rejected before any worker started
    #[error("Invalid test configuration: {0}")]
    InvalidConfig(String),

    /// Setup failed after validation (e.g. the HTTP client could not be built)
    #[error("Test setup failed: {0}")]
    Setup(String),

    /// No test is registered under the given id
    #[error("Load test not found: {0}")]
    NotFound(TestId),

    /// The operation is not valid for the run's current status
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl LoadTestError {
    /// Shorthand for a configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        LoadTestError::InvalidConfig(message.into())
    }
}

/// Result type alias for engine operations
pub type LoadResult<T> = std::result::Result<T, LoadTestError>;
