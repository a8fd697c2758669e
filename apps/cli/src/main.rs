use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use dotenv::dotenv;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use url_submitter::submitter::{
    CompositeProgressReporter, TracingProgressReporter, DEFAULT_ENDPOINT,
};
use url_submitter::{
    BatchSubmitter, ConsoleProgressReporter, IntoProgressCallback, SubmitterConfigBuilder,
    load_urls,
};

const DEFAULT_URLS_FILE: &str = "gotham_urls/test-urls.json";

/// Submit a JSON list of URLs to the submission service in throttled batches
#[derive(Parser, Debug)]
#[command(name = "submit-urls", version, about)]
#[command(after_help = "Examples:
  submit-urls                                  # all URLs from the default file
  submit-urls urls.json 100                    # first 100 URLs
  submit-urls urls.json 100 5                  # first 100 URLs, 5 in flight
  submit-urls urls.json --batch-size 10 --check-health")]
struct Cli {
    /// JSON file containing an array of URL strings
    #[arg(value_name = "URLS_FILE", default_value = DEFAULT_URLS_FILE)]
    urls_file: PathBuf,

    /// Only submit the first N URLs
    #[arg(value_name = "LIMIT")]
    limit: Option<usize>,

    /// Maximum number of submissions in flight at once
    #[arg(value_name = "MAX_CONCURRENT", default_value_t = 3)]
    max_concurrent: usize,

    /// URLs per batch
    #[arg(long, default_value_t = 25)]
    batch_size: usize,

    /// Submission endpoint
    #[arg(long, env = "SUBMIT_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Pause between batches, in seconds
    #[arg(long, default_value_t = 2)]
    batch_delay_secs: u64,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    /// Check the service is up before submitting anything
    #[arg(long)]
    check_health: bool,

    /// Only print failures and the final summary
    #[arg(long, short)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let urls = load_urls(&cli.urls_file, cli.limit)
        .await
        .with_context(|| format!("Failed to load URLs from {}", cli.urls_file.display()))?;

    match cli.limit.filter(|&n| n > 0) {
        Some(limit) => println!("📝 Processing first {} URLs from {}", limit, cli.urls_file.display()),
        None => println!("📝 Processing all {} URLs from {}", urls.len(), cli.urls_file.display()),
    }
    println!("🔧 Settings: concurrency={}, batch_size={}", cli.max_concurrent, cli.batch_size);

    let config = SubmitterConfigBuilder::new()
        .endpoint(cli.endpoint)
        .max_concurrent(cli.max_concurrent)
        .batch_size(cli.batch_size)
        .batch_delay(Duration::from_secs(cli.batch_delay_secs))
        .request_timeout(cli.request_timeout_secs.map(Duration::from_secs))
        .build()
        .context("Invalid submitter settings")?;

    let submitter = BatchSubmitter::new(config)?;

    if cli.check_health {
        submitter.check_health().await?;
        info!("Submission service is healthy");
    }

    let progress = CompositeProgressReporter::new()
        .add_reporter(ConsoleProgressReporter::new(!cli.quiet))
        .add_reporter(TracingProgressReporter)
        .into_callback();

    let summary = submitter.process_urls(&urls, Some(progress)).await;
    if !summary.counters.is_complete() {
        warn!(
            success = summary.counters.success,
            error = summary.counters.error,
            total = summary.counters.total,
            "Counters do not add up to the number of URLs"
        );
    }

    println!("\n🔮 Results will arrive via webhook in 24-72 hours.");
    Ok(())
}
