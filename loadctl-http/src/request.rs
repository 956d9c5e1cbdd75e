//! Prepared request description

use bytes::Bytes;
use loadctl_core::{HttpMethod, TestConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use url::Url;

use crate::errors::HttpError;

/// Map a domain method onto reqwest's
pub fn reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Head => reqwest::Method::HEAD,
        HttpMethod::Options => reqwest::Method::OPTIONS,
    }
}

/// A test's request, parsed and validated once before the workers start
///
/// Every worker of a run shares the same `RequestSpec`; cloning the body
/// only bumps a reference count.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: reqwest::Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<Bytes>,
    pub timeout: Duration,
}

impl RequestSpec {
    /// Build from a test configuration
    ///
    /// `default_timeout` applies when the test does not set `timeout_ms`.
    pub fn from_config(config: &TestConfig, default_timeout: Duration) -> Result<Self, HttpError> {
        let url = parse_target_url(&config.url)?;

        let mut headers = HeaderMap::with_capacity(config.headers.len());
        for (name, value) in &config.headers {
            let header_name = HeaderName::from_bytes(name.trim().as_bytes())
                .map_err(|_| HttpError::InvalidHeaderName(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| HttpError::InvalidHeaderValue(name.clone()))?;
            headers.insert(header_name, header_value);
        }

        let timeout = match config.timeout_ms {
            Some(0) => {
                return Err(HttpError::ConfigError(
                    "timeout_ms must be greater than 0".to_string(),
                ))
            }
            Some(ms) => Duration::from_millis(ms),
            None => default_timeout,
        };

        Ok(Self {
            method: reqwest_method(config.method),
            url,
            headers,
            body: config
                .effective_body()
                .map(|body| Bytes::copy_from_slice(body.as_bytes())),
            timeout,
        })
    }
}

fn parse_target_url(raw: &str) -> Result<Url, HttpError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(HttpError::InvalidUrl("URL is required".to_string()));
    }

    let url = Url::parse(trimmed).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(HttpError::InvalidUrl(format!(
                "unsupported scheme '{}', expected http or https",
                other
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(HttpError::InvalidUrl(format!("{}: missing host", trimmed)));
    }

    Ok(url)
}
