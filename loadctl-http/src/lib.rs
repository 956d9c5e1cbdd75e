//! Outbound HTTP for loadctl
//!
//! Workers never talk to reqwest directly. A test's configuration is turned
//! into a [`RequestSpec`] once, before any worker starts, and every request
//! goes through the [`LoadClient`] trait so the engine can be exercised
//! against in-process fakes.

pub mod client;
pub mod config;
pub mod errors;
pub mod request;

// Re-export main types for convenience
pub use client::{is_success_status, LoadClient, ReqwestLoadClient, ResponseInfo};
pub use config::HttpClientConfig;
pub use errors::HttpError;
pub use request::{reqwest_method, RequestSpec};
