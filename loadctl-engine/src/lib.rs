//! Load generation engine for loadctl
//!
//! A [`TestRegistry`] owns every run in the process. Each run is driven by a
//! [`TestRunController`], which spawns a set of [`Worker`] tasks that share
//! one [`RateLimiter`] and one [`StatAccumulator`] and stop cooperatively on
//! a shared cancellation token.
//!
//! Workers are tokio tasks. On a multi-threaded runtime they run in
//! parallel across the worker threads; the controller's supervisor is one
//! more task per run.

pub mod controller;
pub mod limiter;
pub mod registry;
pub mod settings;
pub mod stats;
pub mod worker;

#[cfg(test)]
pub(crate) mod testing;

pub use controller::TestRunController;
pub use limiter::{Permit, RateLimiter};
pub use registry::TestRegistry;
pub use settings::EngineSettings;
pub use stats::{Outcome, StatAccumulator};
pub use worker::Worker;
