use loadctl_logging::{
    build_env_filter, init_logging_from_config, init_simple_tracing, LogFormat, LogLevel,
    LoggingConfig,
};

#[test]
fn test_filter_from_level_and_directives() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let config = LoggingConfig {
        level: LogLevel::Warn,
        filter: Some("loadctl_engine=debug".to_string()),
        ..Default::default()
    };

    let filter = build_env_filter(&config).unwrap();
    let rendered = filter.to_string();
    assert!(rendered.contains("warn"));
    assert!(rendered.contains("loadctl_engine=debug"));
}

#[test]
fn test_invalid_directives_are_an_error() {
    if std::env::var("RUST_LOG").is_ok() {
        return;
    }
    let config = LoggingConfig {
        filter: Some("loadctl_engine=notalevel".to_string()),
        ..Default::default()
    };
    assert!(build_env_filter(&config).is_err());
}

#[test]
fn test_repeated_initialisation_is_harmless() {
    let config = LoggingConfig {
        format: LogFormat::Json,
        ..Default::default()
    };

    init_logging_from_config(&config).unwrap();
    init_logging_from_config(&config).unwrap();
    init_simple_tracing("debug").unwrap();

    tracing::info!(test = "logging", "subscriber installed");
}
