//! Management API server configuration

use crate::error::ConfigResult;
use crate::validation::{validate_port_range, validate_required_string, validate_url, Validatable};
use serde::{Deserialize, Serialize};

/// HTTP server settings for the management API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path prefix for the load test routes
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    /// Origins allowed by CORS
    #[serde(default = "default_cors_allowed_origins")]
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            api_prefix: default_api_prefix(),
            cors_allowed_origins: default_cors_allowed_origins(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding a listener
    pub fn socket_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Validatable for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;

        if !self.api_prefix.starts_with('/') {
            return Err(self.validation_error(format!(
                "api_prefix must start with '/', got '{}'",
                self.api_prefix
            )));
        }

        for origin in &self.cors_allowed_origins {
            if origin != "*" {
                validate_url(origin, "cors_allowed_origins", self.domain_name())?;
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "server"
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:5173".to_string(),
        "http://localhost:3000".to_string(),
    ]
}
