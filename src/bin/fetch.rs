use anyhow::Context;
use clap::Parser;
use lookalike_ingest::{load_rosters, FetchConfig, Fetcher, HttpTransport, DEFAULT_INPUT_ROOT};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Download the profile images listed in every group's members.json
#[derive(Parser, Debug)]
#[command(name = "lookalike-fetch")]
#[command(about = "Download profile images for lookalike", long_about = None)]
struct Args {
    /// Root of the per-group profile folders
    #[arg(long, default_value = DEFAULT_INPUT_ROOT)]
    input_root: PathBuf,

    /// Number of download workers
    #[arg(long, default_value_t = 8)]
    workers: usize,

    /// Items queued ahead of the workers
    #[arg(long, default_value_t = 64)]
    queue_capacity: usize,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    lookalike::logging::init(&args.log_level)?;

    let items = load_rosters(&args.input_root)
        .with_context(|| format!("failed to read rosters under {}", args.input_root.display()))?;
    info!("{} profile images queued", items.len());

    let transport = HttpTransport::new(Duration::from_secs(args.timeout_secs))?;
    let fetcher = Fetcher::new(
        transport,
        FetchConfig {
            workers: args.workers,
            queue_capacity: args.queue_capacity,
        },
    )?;

    let report = fetcher.run(items);
    println!(
        "{} saved, {} failed, {} skipped",
        report.saved, report.failed, report.skipped
    );
    Ok(())
}
