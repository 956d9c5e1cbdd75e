//! HTTP client implementation

use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use tracing::{debug, trace};

use crate::config::HttpClientConfig;
use crate::errors::HttpError;
use crate::request::RequestSpec;

/// What a worker learns from one completed request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseInfo {
    pub status: u16,
    pub bytes: u64,
}

/// 2xx and 3xx responses count as successes
pub fn is_success_status(status: u16) -> bool {
    (200..400).contains(&status)
}

/// Issues one request and reports how it went
///
/// Implementations must be shareable across every worker of every run.
/// A returned error is a request-level failure; it never aborts the run.
#[async_trait]
pub trait LoadClient: Send + Sync {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseInfo, HttpError>;
}

/// [`LoadClient`] backed by a pooled reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestLoadClient {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestLoadClient {
    /// Build the underlying client from configuration
    pub fn new(config: HttpClientConfig) -> Result<Self, HttpError> {
        let redirect = if config.max_redirects == 0 {
            Policy::none()
        } else {
            Policy::limited(config.max_redirects as usize)
        };

        debug!(
            "Building HTTP client: timeout {:?}, connect timeout {:?}, max redirects {}",
            config.timeout, config.connect_timeout, config.max_redirects
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .user_agent(config.user_agent.clone())
            .redirect(redirect)
            .danger_accept_invalid_certs(!config.verify_ssl)
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .build()
            .map_err(|e| HttpError::ConfigError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }
}

#[async_trait]
impl LoadClient for ReqwestLoadClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseInfo, HttpError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| HttpError::from_reqwest(e, request.timeout))?;
        let status = response.status().as_u16();

        // Drain the body so the connection goes back to the pool
        let body = response
            .bytes()
            .await
            .map_err(|e| HttpError::from_reqwest(e, request.timeout))?;

        trace!("{} {} -> {} ({} bytes)", request.method, request.url, status, body.len());

        Ok(ResponseInfo {
            status,
            bytes: body.len() as u64,
        })
    }
}
