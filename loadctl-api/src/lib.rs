//! Management REST API for loadctl
//!
//! A thin JSON layer over [`loadctl_engine::TestRegistry`]: create, list,
//! inspect, stop and delete load tests.

pub mod app;
pub mod cors;
pub mod errors;
pub mod handlers;

pub use app::{create_app, AppState};
pub use errors::{ApiError, ApiResult};
