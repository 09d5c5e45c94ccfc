use chrono::Local;
use clap::Parser;
use sic_manual::cli::Args;
use sic_manual::process::collect_pages;
use sic_manual::request::{DownloadBar, HttpFetcher};
use sic_manual::{info_time, init_tracing, Result};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Args::parse().config();
    let start_time = Local::now();

    let stats = collect_pages(&HttpFetcher::new(), &config, &DownloadBar::new()?).await?;
    info_time!(
        start_time,
        "Collected {} group and {} description links.",
        stats.groups,
        stats.descriptions
    );

    Ok(())
}
