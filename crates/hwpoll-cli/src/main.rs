//! hwpoll CLI
//!
//! Loads configuration from the environment, wires the review API
//! client to the Telegram notifier, and runs the poll loop.

use std::process::ExitCode;
use std::time::Duration;

use chrono::Utc;
use clap::Parser;
use hwpoll_api::ReviewApiClient;
use hwpoll_notify::TelegramNotifier;
use hwpoll_poller::{Config, CycleOutcome, Poller};
use tracing_subscriber::EnvFilter;

/// Homework review status bot
///
/// Polls the review API for the latest submission's status and relays
/// status changes to a Telegram chat. Requires REVIEW_API_TOKEN,
/// TELEGRAM_BOT_TOKEN, and TELEGRAM_CHAT_ID in the environment or a
/// .env file.
#[derive(Parser, Debug)]
#[command(name = "hwpoll")]
#[command(version, about, long_about = None)]
struct Args {
    /// Poll interval in seconds (overrides POLL_INTERVAL_SECS)
    #[arg(short, long, value_name = "SECS")]
    interval: Option<u64>,

    /// Initial poll cursor: 'now' or an integer epoch timestamp
    #[arg(long, value_name = "WHEN")]
    since: Option<String>,

    /// Run a single poll cycle and exit (non-zero on a failed cycle)
    #[arg(long)]
    once: bool,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("hwpoll starting");

    match run_bot(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Builds the components and runs the loop (or one cycle with --once).
async fn run_bot(args: Args) -> anyhow::Result<()> {
    let mut config = Config::from_env()?;

    if let Some(secs) = args.interval {
        config.poll_interval = Duration::from_secs(secs);
    }
    config.validate()?;

    let cursor = parse_since(args.since.as_deref())?;

    let client = ReviewApiClient::new(
        &config.endpoint,
        &config.api_token,
        config.http_timeout,
    )?;
    let notifier = TelegramNotifier::new(
        &config.bot_token,
        &config.chat_id,
        config.http_timeout,
    )?;

    let mut poller = Poller::new(client, notifier, cursor);

    if args.once {
        return match poller.tick().await {
            CycleOutcome::Failed { message, .. } => Err(anyhow::anyhow!(message)),
            CycleOutcome::Notified(message) => {
                tracing::info!(%message, "single cycle complete");
                Ok(())
            }
            CycleOutcome::Unchanged => {
                tracing::info!("single cycle complete, no updates");
                Ok(())
            }
        };
    }

    tracing::info!(
        endpoint = %config.endpoint,
        interval_secs = config.poll_interval.as_secs(),
        cursor,
        "entering poll loop"
    );
    poller.run(config.poll_interval).await;

    Ok(())
}

/// Parses the --since argument into an epoch-seconds cursor.
///
/// Absent means 0: fetch everything the API will report.
fn parse_since(value: Option<&str>) -> anyhow::Result<i64> {
    match value {
        None => Ok(0),
        Some("now") => Ok(Utc::now().timestamp()),
        Some(raw) => raw.parse().map_err(|_| {
            anyhow::anyhow!("--since expects 'now' or an integer epoch timestamp, got '{raw}'")
        }),
    }
}
