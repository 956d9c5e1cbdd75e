//! Domain-driven configuration management for loadctl
//!
//! Configuration is split by functional domain (engine, HTTP client,
//! logging, server), each with its own defaults and validation, and can be
//! loaded from YAML with `LOADCTL_*` environment variable overrides.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

// Re-export domain configurations
pub use domains::{
    engine::EngineConfig,
    http::HttpConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::ServerConfig,
    LoadctlConfig,
};
