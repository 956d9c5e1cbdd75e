//! `loadctl run`

use anyhow::{anyhow, Context, Result};
use colored::Colorize;
use loadctl_config::LoadctlConfig;
use loadctl_core::{HttpMethod, TestConfig, TestRun, TestStatus};
use loadctl_engine::{TestRegistry, TestRunController};
use std::future::Future;
use std::time::Duration;
use tokio::signal;
use tracing::info;

use crate::cli::RunArgs;

/// Build a test configuration from command-line arguments
pub fn test_config_from_args(args: &RunArgs) -> Result<TestConfig> {
    let method: HttpMethod = args.method.parse()?;

    let mut config = TestConfig::new(args.url.clone())
        .with_method(method)
        .with_concurrency(args.concurrency)
        .with_duration(args.duration)
        .with_rate(args.rate);

    for header in &args.headers {
        let (name, value) = parse_header(header)?;
        config = config.with_header(name, value);
    }
    if let Some(body) = &args.body {
        config = config.with_body(body.clone());
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    Ok(config)
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| anyhow!("Invalid header '{}', expected \"Name: value\"", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("Invalid header '{}', name is empty", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Run one load test in-process, printing progress every second
pub async fn run_command(config: LoadctlConfig, args: RunArgs) -> Result<()> {
    let test_config = test_config_from_args(&args)?;
    let registry = TestRegistry::from_config(&config).context("Failed to set up load test engine")?;

    let run = registry.create(test_config).context("Load test rejected")?;
    let controller = registry.controller(run.id)?;
    info!("Started load test {}", run.id);
    if !args.json {
        println!(
            "{} {} {} with {} workers for {}s",
            "Running".bold(),
            run.config.method,
            run.config.url,
            run.config.concurrency,
            run.config.duration
        );
    }

    let result = watch_run(&controller, signal::ctrl_c(), !args.json).await;

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&result).context("Failed to format result as JSON")?
        );
    } else {
        print_summary(&result);
    }
    Ok(())
}

/// Wait for the run to finish, stopping it early once `interrupt` resolves
async fn watch_run<F: Future>(controller: &TestRunController, interrupt: F, progress: bool) -> TestRun {
    let finished = controller.wait();
    tokio::pin!(finished);
    tokio::pin!(interrupt);
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.tick().await;

    loop {
        tokio::select! {
            result = &mut finished => break result,
            _ = &mut interrupt => {
                info!("Interrupted, stopping load test {}", controller.id());
                break controller.stop().await;
            }
            _ = ticker.tick() => {
                if progress {
                    print_progress(&controller.snapshot());
                }
            }
        }
    }
}

fn print_progress(run: &TestRun) {
    let elapsed = run
        .elapsed_at(chrono::Utc::now())
        .map(|d| d.num_milliseconds() as f64 / 1000.0)
        .unwrap_or_default();
    println!(
        "  [{:>6.1}s] {} requests, {} failed, {:.1} req/s, avg {:.2}ms",
        elapsed,
        run.stats.total_requests,
        run.stats.failed_requests,
        run.requests_per_second,
        run.stats.avg_response_time
    );
}

fn print_summary(run: &TestRun) {
    let status = match run.status {
        TestStatus::Completed => run.status.as_str().green(),
        TestStatus::Stopped => run.status.as_str().yellow(),
        _ => run.status.as_str().red(),
    };
    let stats = &run.stats;

    println!();
    println!("{} {} ({})", "Load test".bold(), run.id, status);
    println!("  Requests:      {}", stats.total_requests);
    println!("  Succeeded:     {}", stats.success_requests.to_string().green());
    let failed = stats.failed_requests.to_string();
    println!(
        "  Failed:        {} ({:.1}%)",
        if stats.failed_requests > 0 { failed.red() } else { failed.normal() },
        stats.error_rate() * 100.0
    );
    println!("  Throughput:    {:.2} req/s", run.requests_per_second);
    println!(
        "  Latency (ms):  min {:.2} / avg {:.2} / max {:.2}",
        stats.min_response_time, stats.avg_response_time, stats.max_response_time
    );
    if !stats.status_counts.is_empty() {
        println!("  Outcomes:");
        for (outcome, count) in &stats.status_counts {
            println!("    {:<14} {}", outcome, count);
        }
    }
}
