//! Websweep main entry point
//!
//! Command-line interface for the websweep crawler: resolves a keyword to
//! seed pages through the configured search API, runs the bounded batch
//! crawl, and prints the accepted URLs plus a final summary.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::atomic::Ordering;
use tracing_subscriber::EnvFilter;
use websweep::config::{load_config, validate, validate_credentials, Config};
use websweep::crawler::build_http_client;
use websweep::output::{CrawlReport, StdoutSink};
use websweep::search::resolve_seeds;
use websweep::{Crawler, SweepError};

/// Websweep: a bounded, polite breadth-first web crawler
///
/// Starting from the top search results for a keyword, websweep explores
/// outbound links breadth-first until its page budget is spent, honoring
/// per-site robots exclusions and skipping binary/media resources.
#[derive(Parser, Debug)]
#[command(name = "websweep")]
#[command(version)]
#[command(about = "A bounded, polite breadth-first web crawler", long_about = None)]
struct Cli {
    /// Search keyword used to resolve the seed pages
    #[arg(value_name = "KEYWORD")]
    keyword: String,

    /// Maximum total number of URLs to dispatch
    #[arg(short, long)]
    budget: Option<u32>,

    /// Number of URLs fetched concurrently per batch
    #[arg(long)]
    batch_size: Option<u32>,

    /// Number of seed results to request from the search API (1-10)
    #[arg(long)]
    seed_count: Option<u32>,

    /// Per-request fetch timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Wall-clock limit for the whole run in seconds
    #[arg(long)]
    max_runtime_secs: Option<u64>,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error log output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Startup misconfiguration is the only non-zero exit
    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{:#}", e);
            return ExitCode::FAILURE;
        }
    };

    match run_crawl(&cli.keyword, config).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(SweepError::SeedResolution(message)) => {
            // No seeds means no crawl, but that is a graceful outcome
            eprintln!("websweep: seed resolution failed: {}", message);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("websweep=info,warn"),
            1 => EnvFilter::new("websweep=debug,info"),
            2 => EnvFilter::new("websweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Assembles the effective configuration: file, then CLI flags, then env
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    if let Some(budget) = cli.budget {
        config.crawler.budget = budget;
    }
    if let Some(batch_size) = cli.batch_size {
        config.crawler.batch_size = batch_size;
    }
    if let Some(seed_count) = cli.seed_count {
        config.search.result_count = seed_count;
    }
    if let Some(secs) = cli.timeout_secs {
        config.crawler.fetch_timeout_ms = secs.saturating_mul(1_000);
    }
    if let Some(secs) = cli.max_runtime_secs {
        config.crawler.max_runtime_ms = Some(secs.saturating_mul(1_000));
    }

    config.apply_env_credentials();

    // Flags can invalidate a valid file, so validate the merged result
    validate(&config).context("invalid configuration")?;
    validate_credentials(&config.search).context("missing search credentials")?;

    Ok(config)
}

/// Resolves seeds and runs the crawl to completion
async fn run_crawl(keyword: &str, config: Config) -> Result<CrawlReport, SweepError> {
    let client = build_http_client(&config.user_agent)?;
    let seeds = resolve_seeds(&client, &config.search, keyword).await?;

    let mut crawler = Crawler::new(
        config.crawler.clone(),
        &config.user_agent,
        Box::new(StdoutSink::new()),
    )?;

    // Ctrl-C stops dispatching after the current batch's join
    let cancel = crawler.cancel_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, finishing current batch");
            cancel.store(true, Ordering::Relaxed);
        }
    });

    crawler.seed(seeds).await;
    Ok(crawler.run().await)
}
