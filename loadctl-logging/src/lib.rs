//! Structured logging setup for loadctl
//!
//! Every crate in the workspace logs through `tracing`; this crate installs
//! the global subscriber from a [`LoggingConfig`].

pub mod init;

pub use init::{build_env_filter, init_logging_from_config, init_simple_tracing};
pub use loadctl_config::{LogFormat, LogLevel, LoggingConfig};
