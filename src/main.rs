//! ipi - network address overview
//!
//! Prints the local IP, external IP, default gateway and DNS servers of this
//! host as a table. Each lookup is best-effort: a failed one shows as
//! "unavailable" and the others still run.

mod cli;
mod collector;
mod config;
mod error;
mod logfile;
mod report;
mod snapshot;
mod system;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Args;
use collector::{Collector, Sections};
use config::Config;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(args.log_directive()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = Config::from_args(&args);
    tracing::debug!(?config, "resolved configuration");

    let sections = Sections {
        details: args.details,
        ping: args.ping,
        latency: args.latency,
    };

    let snapshot = Collector::new(config).collect(sections).await?;

    let title = report::title(&snapshot);
    let rows = report::rows(&snapshot);

    ui::print_report(&title, &rows).context("Failed to write the report")?;

    if let Some(path) = &args.logfile {
        logfile::append_report(path, &title, &rows)
            .with_context(|| format!("Failed to append to {}", path.display()))?;
    }

    Ok(())
}
