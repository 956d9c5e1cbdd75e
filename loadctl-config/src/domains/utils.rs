//! Utility functions and helpers for configuration

use std::time::Duration;

/// Parse a duration given either as whole seconds ("30") or in humantime
/// form ("30s", "250ms", "1m 30s")
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if let Ok(seconds) = value.parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }
    humantime_serde::re::humantime::parse_duration(value).map_err(|e| e.to_string())
}

/// Default functions for serde
pub fn default_true() -> bool {
    true
}
