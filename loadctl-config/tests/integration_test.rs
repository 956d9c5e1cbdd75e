//! Integration tests for loadctl-config

use loadctl_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

fn no_vars() -> Vec<(&'static str, Option<&'static str>)> {
    Vec::new()
}

#[test]
fn test_default_config_validation() {
    let config = LoadctlConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("LOADCTL_HTTP_TIMEOUT", Some("750ms")),
        ("LOADCTL_LOG_LEVEL", Some("debug")),
        ("LOADCTL_MAX_CONCURRENCY", Some("64")),
        ("LOADCTL_DEFAULT_DURATION", Some("30")),
        ("LOADCTL_SERVER_CORS_ORIGINS", Some("http://a.test, http://b.test")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.http.timeout, Duration::from_millis(750));
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.engine.max_concurrency, 64);
        assert_eq!(config.engine.default_duration, Duration::from_secs(30));
        assert_eq!(
            config.server.cors_allowed_origins,
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("LOADCTL_SERVER_PORT", Some("eighty"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
        assert!(err.to_string().contains("SERVER_PORT"));
    });
}

#[test]
fn test_default_loader_reads_loadctl_prefix() {
    with_vars(vec![("LOADCTL_MAX_CONCURRENCY", Some("12"))], || {
        let config = ConfigLoader::default().from_env().unwrap();
        assert_eq!(config.engine.max_concurrency, 12);
    });
}

#[test]
fn test_custom_prefix() {
    with_vars(vec![("LT_HTTP_MAX_REDIRECTS", Some("0"))], || {
        let config = ConfigLoader::with_prefix("LT").from_env().unwrap();
        assert_eq!(config.http.max_redirects, 0);
    });
}

#[test]
fn test_yaml_config_serialization() {
    let yaml = LoadctlConfig::generate_sample();
    let parsed: LoadctlConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.http.timeout, Duration::from_secs(5));
}

#[test]
fn test_load_from_file() {
    let yaml = r#"
engine:
  default_duration: 15s
  max_concurrency: 200
  drain_grace_factor: 3

http:
  timeout: 2s
  connect_timeout: 500ms
  max_redirects: 3
  user_agent: "bench/1.0"

logging:
  level: warn
  format: json

server:
  port: 9090
  api_prefix: /v1
"#;
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    // Hold the temp-env lock so overrides from other tests cannot leak in
    let config = with_vars(no_vars(), || ConfigLoader::new().load(Some(file.path())).unwrap());

    assert_eq!(config.engine.default_duration, Duration::from_secs(15));
    assert_eq!(config.engine.max_concurrency, 200);
    assert_eq!(config.engine.drain_grace_factor, 3);
    assert_eq!(config.http.connect_timeout, Duration::from_millis(500));
    assert_eq!(config.http.user_agent, "bench/1.0");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.server.port, 9090);
    assert_eq!(config.server.api_prefix, "/v1");
}

#[test]
fn test_invalid_file_fails_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"engine:\n  max_concurrency: 0\n").unwrap();

    let err = with_vars(no_vars(), || ConfigLoader::new().from_file(file.path()).unwrap_err());
    assert!(matches!(err, ConfigError::DomainError { .. }));
}

#[test]
fn test_missing_file() {
    let err = ConfigLoader::new()
        .from_file("/definitely/not/here/loadctl.yaml")
        .unwrap_err();
    assert!(matches!(err, ConfigError::FileReadError(_)));
}
