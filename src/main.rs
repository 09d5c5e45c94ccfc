use chrono::Local;
use clap::Parser;
use sic_manual::cli::Args;
use sic_manual::process::{collect_pages, compile_manual};
use sic_manual::request::{DownloadBar, HttpFetcher};
use sic_manual::{info_time, init_tracing, Result};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let config = Args::parse().config();
    let start_time = Local::now();

    collect_pages(&HttpFetcher::new(), &config, &DownloadBar::new()?).await?;
    compile_manual(&config)?;
    info_time!(start_time, "Full program time:");

    Ok(())
}
