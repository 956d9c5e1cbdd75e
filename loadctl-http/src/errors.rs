//! HTTP error types

use std::time::Duration;

/// Error type for HTTP operations
///
/// Request-time variants are absorbed by the worker and recorded as failed
/// outcomes. The `Invalid*` variants come from request preparation and
/// reject a test before it starts.
#[derive(Debug, thiserror::Error)]
pub enum HttpError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Connection failed: {0}")]
    Connect(String),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("Failed to read response body: {0}")]
    Body(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(String),

    #[error("Invalid value for header {0}")]
    InvalidHeaderValue(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl HttpError {
    /// Classify a reqwest failure
    pub fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            HttpError::Timeout(timeout)
        } else if err.is_connect() {
            HttpError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            HttpError::Body(err.to_string())
        } else {
            HttpError::Request(err.to_string())
        }
    }

    /// Short label used as the key in a run's status breakdown
    pub fn kind(&self) -> &'static str {
        match self {
            HttpError::Timeout(_) => "timeout",
            HttpError::Connect(_) => "connect_error",
            HttpError::Request(_) => "request_error",
            HttpError::Body(_) => "body_error",
            HttpError::InvalidUrl(_)
            | HttpError::InvalidHeaderName(_)
            | HttpError::InvalidHeaderValue(_) => "invalid_request",
            HttpError::ConfigError(_) => "config_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(HttpError::Timeout(Duration::from_secs(1)).kind(), "timeout");
        assert_eq!(HttpError::Connect("refused".into()).kind(), "connect_error");
        assert_eq!(HttpError::InvalidUrl("x".into()).kind(), "invalid_request");
    }
}
