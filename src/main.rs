use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::error;

use price_watcher::config::{self, Args, FetchConfig, NotifierConfig};
use price_watcher::fetcher::Fetcher;
use price_watcher::notifier::EmailNotifier;
use price_watcher::runner::Runner;

fn build_runner(args: Args) -> Result<Runner> {
    let api_key = config::resolve_api_key(
        std::env::var(config::API_KEY_ENV).ok(),
        &args.credentials,
    );

    let fetcher = Fetcher::new(&FetchConfig::default()).context("building HTTP client")?;
    let notifier = EmailNotifier::new(NotifierConfig::new(api_key));

    Ok(Runner::new(args.items, args.email, fetcher, notifier))
}

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing; diagnostics go to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("price_watcher=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let runner = match build_runner(args) {
        Ok(runner) => runner,
        Err(e) => {
            error!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    match runner.run().await {
        Ok(summary) => {
            println!(
                "All done. {} items checked, {} new lows, {} notifications sent, {} skipped.",
                summary.checked, summary.updated, summary.notified, summary.skipped
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
