//! Core domain models and types for loadctl
//!
//! This crate contains the data model shared by the engine, the management
//! API and the CLI: test configurations, run identifiers and statuses,
//! aggregate statistics and the error taxonomy. It has minimal dependencies
//! and no runtime behaviour of its own.

pub mod config;
pub mod error;
pub mod run;
pub mod stats;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::TestConfig;
pub use error::{LoadResult, LoadTestError};
pub use run::{TestId, TestRun, TestStatus};
pub use stats::Stats;
pub use types::{HttpMethod, ParseError};
