//! Engine runs against real local HTTP targets

mod common;

use common::{closed_port, start_target};
use loadctl_config::LoadctlConfig;
use loadctl_core::{HttpMethod, LoadTestError, TestConfig, TestRun, TestStatus};
use loadctl_engine::TestRegistry;
use std::time::Duration;

fn registry() -> TestRegistry {
    TestRegistry::from_config(&LoadctlConfig::default()).unwrap()
}

async fn run_to_end(registry: &TestRegistry, config: TestConfig) -> TestRun {
    let id = registry.create(config).unwrap().id;
    registry.controller(id).unwrap().wait().await
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rate_limited_run_against_ok_target() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(target.url("/ok"))
        .with_concurrency(10)
        .with_duration(2)
        .with_rate(50);
    let run = run_to_end(&registry, config).await;

    assert_eq!(run.status, TestStatus::Completed);
    assert!(run.end_time.is_some());
    let stats = &run.stats;
    assert!((90..=110).contains(&stats.success_requests), "success = {}", stats.success_requests);
    assert_eq!(stats.failed_requests, 0);
    assert!(stats.is_consistent());
    assert!(stats.min_response_time >= 10.0);
    assert!(stats.avg_response_time < 100.0, "avg = {}", stats.avg_response_time);
    assert_eq!(stats.status_counts.get("200"), Some(&stats.total_requests));
    assert_eq!(target.hits(), stats.total_requests);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_server_errors_count_as_failures() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(target.url("/error"))
        .with_concurrency(4)
        .with_duration(1)
        .with_rate(100);
    let run = run_to_end(&registry, config).await;

    assert!(run.stats.total_requests > 0);
    assert_eq!(run.stats.success_requests, 0);
    assert_eq!(run.stats.failed_requests, run.stats.total_requests);
    assert_eq!(run.stats.status_counts.get("500"), Some(&run.stats.total_requests));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_per_request_timeout() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(target.url("/slow"))
        .with_concurrency(2)
        .with_duration(1)
        .with_timeout_ms(200);
    let run = run_to_end(&registry, config).await;

    let stats = &run.stats;
    assert!(stats.total_requests >= 2);
    // Two workers, 200ms per attempt, one second of issuing
    assert!(stats.total_requests <= 12, "total = {}", stats.total_requests);
    assert_eq!(stats.failed_requests, stats.total_requests);
    assert_eq!(stats.status_counts.get("timeout"), Some(&stats.total_requests));
    assert!(stats.max_response_time < 1_000.0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_refused_connections_are_recorded() {
    let addr = closed_port().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(format!("http://{}/", addr))
        .with_concurrency(2)
        .with_duration(1)
        .with_rate(20);
    let run = run_to_end(&registry, config).await;

    assert_eq!(run.status, TestStatus::Completed);
    assert!(run.stats.total_requests > 0);
    assert_eq!(run.stats.failed_requests, run.stats.total_requests);
    assert_eq!(
        run.stats.status_counts.get("connect_error"),
        Some(&run.stats.total_requests)
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_stop_freezes_totals() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let id = registry
        .create(TestConfig::new(target.url("/ok")).with_concurrency(4).with_duration(30))
        .unwrap()
        .id;
    tokio::time::sleep(Duration::from_millis(500)).await;

    let stopped = registry.stop(id).await.unwrap();
    assert_eq!(stopped.status, TestStatus::Stopped);
    assert!(stopped.stats.total_requests > 0);

    tokio::time::sleep(Duration::from_millis(300)).await;
    let later = registry.get(id).unwrap();
    assert_eq!(later.stats, stopped.stats);
    assert_eq!(target.hits(), stopped.stats.total_requests);

    let again = registry.stop(id).await.unwrap();
    assert_eq!(again, stopped);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_method_headers_and_body_are_sent() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(target.url("/echo"))
        .with_method(HttpMethod::Post)
        .with_header("Content-Type", "application/json")
        .with_header("X-Token", "secret")
        .with_body(r#"{"name":"load"}"#)
        .with_concurrency(2)
        .with_duration(1)
        .with_rate(20);
    let run = run_to_end(&registry, config).await;

    assert!(run.stats.total_requests > 0);
    assert_eq!(run.stats.success_requests, run.stats.total_requests);
    assert_eq!(run.stats.status_counts.get("201"), Some(&run.stats.total_requests));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_redirects_are_followed() {
    let target = start_target().await.unwrap();
    let registry = registry();

    let config = TestConfig::new(target.url("/redirect"))
        .with_duration(1)
        .with_rate(10);
    let run = run_to_end(&registry, config).await;

    assert!(run.stats.total_requests > 0);
    assert_eq!(run.stats.status_counts.get("200"), Some(&run.stats.total_requests));
    // Every request hit both the redirect and its destination
    assert_eq!(target.hits(), run.stats.total_requests * 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_invalid_configs_are_rejected() {
    let registry = registry();

    for config in [
        TestConfig::new(""),
        TestConfig::new("not a url"),
        TestConfig::new("ftp://example.test/file"),
        TestConfig::new("http://example.test").with_header("bad header", "x"),
    ] {
        let err = registry.create(config).unwrap_err();
        assert!(matches!(err, LoadTestError::InvalidConfig(_)), "{err:?}");
    }
    assert!(registry.list().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_shutdown_stops_everything() {
    let target = start_target().await.unwrap();
    let registry = registry();

    for _ in 0..3 {
        registry
            .create(TestConfig::new(target.url("/ok")).with_concurrency(2).with_duration(30))
            .unwrap();
    }
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(registry.shutdown().await, 3);
    assert!(registry
        .list()
        .iter()
        .all(|run| run.status == TestStatus::Stopped));
}
