//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the management API server
    Serve {
        /// Address to bind to (overrides configuration)
        #[arg(long, value_name = "HOST")]
        host: Option<String>,

        /// Port to listen on (overrides configuration)
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,
    },

    /// Run a single load test and print a summary
    Run(RunArgs),

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        config_cmd: ConfigCommands,
    },
}

#[derive(clap::Args, Debug)]
pub struct RunArgs {
    /// Target URL
    #[arg(long, value_name = "URL")]
    pub url: String,

    /// HTTP method
    #[arg(long, short = 'X', value_name = "METHOD", default_value = "GET")]
    pub method: String,

    /// Request header as "Name: value"; may be repeated
    #[arg(long = "header", short = 'H', value_name = "HEADER")]
    pub headers: Vec<String>,

    /// Request body
    #[arg(long, short = 'd', value_name = "BODY")]
    pub body: Option<String>,

    /// Number of concurrent workers
    #[arg(long, short = 'c', value_name = "N", default_value_t = 10)]
    pub concurrency: u32,

    /// Test duration in seconds (0 uses the configured default)
    #[arg(long, short = 't', value_name = "SECONDS", default_value_t = 0)]
    pub duration: u64,

    /// Target requests per second across all workers (0 = unlimited)
    #[arg(long, short = 'r', value_name = "RPS", default_value_t = 0)]
    pub rate: u32,

    /// Per-request timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub timeout_ms: Option<u64>,

    /// Print the final snapshot as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        #[arg(long, value_name = "PATH")]
        config_file: PathBuf,
    },

    /// Write a sample configuration file with every default spelled out
    Generate {
        /// Output file path
        #[arg(long, value_name = "PATH")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run() {
        let cli = Cli::try_parse_from([
            "loadctl",
            "--log-level",
            "debug",
            "run",
            "--url",
            "http://localhost:9000/ok",
            "-X",
            "post",
            "-H",
            "Content-Type: application/json",
            "-H",
            "X-Trace: 1",
            "--body",
            "{}",
            "-c",
            "4",
            "-t",
            "2",
            "-r",
            "50",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        let Commands::Run(args) = cli.command else {
            panic!("expected run command");
        };
        assert_eq!(args.url, "http://localhost:9000/ok");
        assert_eq!(args.method, "post");
        assert_eq!(args.headers.len(), 2);
        assert_eq!(args.concurrency, 4);
        assert_eq!(args.duration, 2);
        assert_eq!(args.rate, 50);
        assert!(!args.json);
    }

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["loadctl", "serve"]).unwrap();
        assert!(matches!(cli.command, Commands::Serve { host: None, port: None }));
    }

    #[test]
    fn test_run_requires_url() {
        assert!(Cli::try_parse_from(["loadctl", "run"]).is_err());
    }
}
